//! Observation entity - one timestamped weather reading for one location

use serde::{Deserialize, Serialize};

use crate::entities::alert_rule::Metric;
use crate::value_objects::{
    Condition, Humidity, LocationId, ObservationTimestamp, Temperature, WindSpeed,
};

/// Unique key of an observation within the historical record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObservationKey {
    /// Location the reading belongs to
    pub location_id: LocationId,
    /// Minute-precision UTC timestamp of the reading
    pub observed_at: ObservationTimestamp,
}

impl std::fmt::Display for ObservationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.location_id, self.observed_at)
    }
}

/// A single weather reading
///
/// All fields are validated value objects, so a constructed `Observation` is
/// always physically plausible. Observations are immutable once written to
/// the store; the (location, timestamp) key is unique there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Location the reading belongs to
    pub location_id: LocationId,
    /// When the reading was taken (UTC, minute precision)
    pub observed_at: ObservationTimestamp,
    /// Air temperature
    pub temperature: Temperature,
    /// Relative humidity
    pub humidity: Humidity,
    /// Wind speed
    pub wind_speed: WindSpeed,
    /// Reported condition bucket
    pub condition: Condition,
}

impl Observation {
    /// Create a new observation
    #[must_use]
    pub const fn new(
        location_id: LocationId,
        observed_at: ObservationTimestamp,
        temperature: Temperature,
        humidity: Humidity,
        wind_speed: WindSpeed,
        condition: Condition,
    ) -> Self {
        Self {
            location_id,
            observed_at,
            temperature,
            humidity,
            wind_speed,
            condition,
        }
    }

    /// The store key of this observation
    #[must_use]
    pub fn key(&self) -> ObservationKey {
        ObservationKey {
            location_id: self.location_id.clone(),
            observed_at: self.observed_at,
        }
    }

    /// Read the numeric value of a metric, for threshold comparison
    #[must_use]
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Temperature => self.temperature.celsius(),
            Metric::Humidity => self.humidity.as_f64(),
            Metric::WindSpeed => self.wind_speed.mps(),
        }
    }

    /// Whether another observation carries identical measured values
    ///
    /// Used to distinguish an idempotent re-ingest (same key, same values)
    /// from a conflicting write (same key, different values).
    #[must_use]
    pub fn same_values(&self, other: &Self) -> bool {
        self.temperature == other.temperature
            && self.humidity == other.humidity
            && self.wind_speed == other.wind_speed
            && self.condition == other.condition
    }
}
