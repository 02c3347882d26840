//! Coordinate pair of an observed site
//!
//! ```
//! use domain::value_objects::GeoLocation;
//!
//! let berlin = GeoLocation::new(52.52, 13.405).expect("in range");
//! assert!((berlin.latitude() - 52.52).abs() < f64::EPSILON);
//! assert!(GeoLocation::new(100.0, 0.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error carrying the rejected coordinate pair
#[derive(Debug, Clone, Copy, Error, PartialEq)]
#[error("coordinates ({latitude}, {longitude}) out of range (lat ±90, lon ±180)")]
pub struct InvalidCoordinates {
    latitude: f64,
    longitude: f64,
}

/// Where a site sits on the globe, as passed to the weather provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
}

impl GeoLocation {
    /// Validate a coordinate pair
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` when latitude leaves [-90, 90] or
    /// longitude leaves [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees north
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees east
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}°, {:.4}°", self.latitude, self.longitude)
    }
}
