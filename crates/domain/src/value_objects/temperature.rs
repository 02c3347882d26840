//! Temperature value object
//!
//! Represents an air temperature in degrees Celsius, validated against the
//! physical range a surface station can plausibly report.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::Temperature;
//!
//! let t = Temperature::new(21.5).expect("valid temperature");
//! assert!((t.celsius() - 21.5).abs() < f64::EPSILON);
//!
//! assert!(Temperature::new(80.0).is_err());
//! assert!(Temperature::new(f64::NAN).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a temperature value is out of range
#[derive(Debug, Clone, Copy, Error, PartialEq)]
#[error("invalid temperature: {0}°C is out of range (must be -100 to 65)")]
pub struct InvalidTemperature(f64);

/// Air temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Temperature(f64);

impl Temperature {
    /// Lowest temperature accepted (below the coldest reading on record)
    pub const MIN_CELSIUS: f64 = -100.0;

    /// Highest temperature accepted (above the hottest reading on record)
    pub const MAX_CELSIUS: f64 = 65.0;

    /// Create a new validated temperature
    ///
    /// # Errors
    ///
    /// Returns `InvalidTemperature` if the value is not finite or is outside
    /// [-100, 65] °C.
    pub fn new(celsius: f64) -> Result<Self, InvalidTemperature> {
        if !celsius.is_finite() || !(Self::MIN_CELSIUS..=Self::MAX_CELSIUS).contains(&celsius) {
            return Err(InvalidTemperature(celsius));
        }
        Ok(Self(celsius))
    }

    /// Get the temperature in degrees Celsius
    #[must_use]
    pub const fn celsius(self) -> f64 {
        self.0
    }

    /// Check if the temperature is below freezing
    #[must_use]
    pub fn is_freezing(self) -> bool {
        self.0 < 0.0
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.0)
    }
}

impl TryFrom<f64> for Temperature {
    type Error = InvalidTemperature;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Temperature> for f64 {
    fn from(t: Temperature) -> Self {
        t.0
    }
}

/// Custom deserialization that validates the physical range
impl<'de> Deserialize<'de> for Temperature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
