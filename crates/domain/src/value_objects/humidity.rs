//! Relative humidity value object
//!
//! Providers report humidity as a whole percent, so this wraps a `u8` and
//! only guards the upper bound.
//!
//! ```
//! use domain::value_objects::Humidity;
//!
//! let muggy = Humidity::new(87).expect("in range");
//! assert_eq!(muggy.to_string(), "87%");
//! assert!(Humidity::new(101).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned for a percentage above 100
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("humidity {0}% exceeds 100%")]
pub struct InvalidHumidity(u8);

/// Relative humidity as a whole percent in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Humidity(u8);

impl Humidity {
    /// Upper bound of the percentage scale
    pub const MAX: u8 = 100;

    /// Validate a reported percentage
    ///
    /// # Errors
    ///
    /// Returns `InvalidHumidity` above 100; the lower bound is free with
    /// the unsigned representation.
    pub const fn new(value: u8) -> Result<Self, InvalidHumidity> {
        if value > Self::MAX {
            Err(InvalidHumidity(value))
        } else {
            Ok(Self(value))
        }
    }

    /// The percentage as reported
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Humidity as a float, for metric comparisons against alert thresholds
    #[must_use]
    pub const fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

impl fmt::Display for Humidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for Humidity {
    type Error = InvalidHumidity;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Humidity> for u8 {
    fn from(h: Humidity) -> Self {
        h.0
    }
}

// Deserialization funnels through the validating constructor so a stored or
// wire value above 100 is rejected at the boundary.
impl<'de> Deserialize<'de> for Humidity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_full_scale() {
        assert!(Humidity::new(0).is_ok());
        assert!(Humidity::new(42).is_ok());
        assert!(Humidity::new(Humidity::MAX).is_ok());
    }

    #[test]
    fn test_rejects_above_scale() {
        let err = Humidity::new(101).unwrap_err();
        assert_eq!(err.to_string(), "humidity 101% exceeds 100%");
    }

    #[test]
    fn test_display_appends_percent() {
        assert_eq!(Humidity::new(42).unwrap().to_string(), "42%");
    }

    #[test]
    fn test_as_f64_for_threshold_comparison() {
        assert!((Humidity::new(42).unwrap().as_f64() - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_try_from_u8() {
        assert!(Humidity::try_from(42u8).is_ok());
        assert!(Humidity::try_from(255u8).is_err());
    }

    #[test]
    fn test_serializes_as_bare_number() {
        let json = serde_json::to_string(&Humidity::new(42).unwrap()).expect("serialize");
        assert_eq!(json, "42");
    }

    #[test]
    fn test_deserialization_validates() {
        assert!(serde_json::from_str::<Humidity>("42").is_ok());
        assert!(serde_json::from_str::<Humidity>("101").is_err());
    }

    #[test]
    fn test_ordering_follows_percentage() {
        assert!(Humidity::new(30).unwrap() < Humidity::new(70).unwrap());
    }
}
