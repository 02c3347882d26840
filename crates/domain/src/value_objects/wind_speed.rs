//! Wind speed value object
//!
//! Represents a validated wind speed in meters per second.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a wind speed value is out of range
#[derive(Debug, Clone, Copy, Error, PartialEq)]
#[error("invalid wind speed: {0} m/s is out of range (must be 0 to 120)")]
pub struct InvalidWindSpeed(f64);

/// Wind speed in meters per second
///
/// Bounded above 120 m/s, comfortably beyond the strongest surface gust
/// ever recorded.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct WindSpeed(f64);

impl WindSpeed {
    /// Highest wind speed accepted
    pub const MAX_MPS: f64 = 120.0;

    /// Create a new validated wind speed
    ///
    /// # Errors
    ///
    /// Returns `InvalidWindSpeed` if the value is not finite, negative, or
    /// above 120 m/s.
    pub fn new(mps: f64) -> Result<Self, InvalidWindSpeed> {
        if !mps.is_finite() || !(0.0..=Self::MAX_MPS).contains(&mps) {
            return Err(InvalidWindSpeed(mps));
        }
        Ok(Self(mps))
    }

    /// Get the wind speed in meters per second
    #[must_use]
    pub const fn mps(self) -> f64 {
        self.0
    }

    /// Wind speed in km/h for display
    #[must_use]
    pub fn kmh(self) -> f64 {
        self.0 * 3.6
    }
}

impl fmt::Display for WindSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} m/s", self.0)
    }
}

impl TryFrom<f64> for WindSpeed {
    type Error = InvalidWindSpeed;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WindSpeed> for f64 {
    fn from(w: WindSpeed) -> Self {
        w.0
    }
}

/// Custom deserialization that validates the range
impl<'de> Deserialize<'de> for WindSpeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
