//! Observed locations and alert rules as configured

use domain::entities::{AlertRule, Location, Metric, Operator};
use domain::value_objects::{GeoLocation, InvalidCoordinates, InvalidLocationId, LocationId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A configured entry that failed domain validation
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("Invalid location id: {0}")]
    LocationId(#[from] InvalidLocationId),

    #[error("Invalid coordinates: {0}")]
    Coordinates(#[from] InvalidCoordinates),
}

/// One observed location as it appears in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Stable slug identifier, e.g. "berlin"
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl LocationConfig {
    /// Validate into a domain location
    ///
    /// # Errors
    ///
    /// Returns an error when the id is not a valid slug or the
    /// coordinates are out of range.
    pub fn to_location(&self) -> Result<Location, SiteError> {
        Ok(Location::new(
            LocationId::new(&self.id)?,
            self.name.clone(),
            GeoLocation::new(self.latitude, self.longitude)?,
        ))
    }
}

/// One alert rule as it appears in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRuleConfig {
    /// Metric to compare
    pub metric: Metric,
    /// Comparison operator
    pub operator: Operator,
    /// Threshold in the metric's unit
    pub threshold: f64,
    /// Restrict the rule to one location id; absent means all locations
    #[serde(default)]
    pub location: Option<String>,
}

impl AlertRuleConfig {
    /// Validate into a domain rule
    ///
    /// # Errors
    ///
    /// Returns an error when `location` is set but not a valid slug.
    pub fn to_rule(&self) -> Result<AlertRule, SiteError> {
        let rule = AlertRule::new(self.metric, self.operator, self.threshold);
        match &self.location {
            Some(id) => Ok(rule.for_location(LocationId::new(id)?)),
            None => Ok(rule),
        }
    }
}
