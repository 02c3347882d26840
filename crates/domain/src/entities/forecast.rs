//! Forecast result entity
//!
//! Produced by the external forecasting collaborator; this crate only
//! defines the value it hands back.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value_objects::{LocationId, ObservationTimestamp};

/// Error returned when a confidence interval is inverted
#[derive(Debug, Clone, Copy, Error, PartialEq)]
#[error("invalid confidence interval: lower {lower} exceeds upper {upper}")]
pub struct InvalidInterval {
    lower: f64,
    upper: f64,
}

/// A bounded uncertainty range around a predicted value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Lower bound
    pub lower: f64,
    /// Upper bound
    pub upper: f64,
}

impl ConfidenceInterval {
    /// Create a new interval
    ///
    /// # Errors
    ///
    /// Returns `InvalidInterval` if `lower > upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self, InvalidInterval> {
        if lower > upper {
            return Err(InvalidInterval { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Whether a value lies within the interval (inclusive)
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }

    /// Width of the interval
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// A single predicted future value for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Location the prediction is for
    pub location_id: LocationId,
    /// Future instant the prediction covers
    pub timestamp: ObservationTimestamp,
    /// Predicted metric value (temperature in °C for the default model)
    pub predicted_value: f64,
    /// Uncertainty range around the prediction
    pub confidence: ConfidenceInterval,
}
