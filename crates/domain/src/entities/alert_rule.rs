//! Alert rule entity - a threshold condition evaluated against observations

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::observation::Observation;
use crate::value_objects::LocationId;

/// Metric an alert rule compares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Air temperature in °C
    Temperature,
    /// Relative humidity in %
    Humidity,
    /// Wind speed in m/s
    WindSpeed,
}

impl Metric {
    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::WindSpeed => "wind speed",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Comparison operator of an alert rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Strictly greater than
    GreaterThan,
    /// Strictly less than
    LessThan,
    /// Greater than or equal
    GreaterOrEqual,
    /// Less than or equal
    LessOrEqual,
}

impl Operator {
    /// Apply the comparison
    #[must_use]
    pub fn compare(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::GreaterThan => value > threshold,
            Self::LessThan => value < threshold,
            Self::GreaterOrEqual => value >= threshold,
            Self::LessOrEqual => value <= threshold,
        }
    }

    /// Symbolic form for display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Which locations a rule applies to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", untagged)]
pub enum LocationScope {
    /// The rule applies to every configured location
    #[default]
    All,
    /// The rule applies to a single location
    Only(LocationId),
}

impl LocationScope {
    /// Whether the scope covers the given location
    #[must_use]
    pub fn covers(&self, location_id: &LocationId) -> bool {
        match self {
            Self::All => true,
            Self::Only(id) => id == location_id,
        }
    }
}

/// A threshold condition evaluated against each new observation
///
/// Rules are stateless: evaluation depends only on the rule and the
/// observation at hand, never on prior matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRule {
    /// Metric to compare
    pub metric: Metric,
    /// Comparison operator
    pub operator: Operator,
    /// Threshold value in the metric's unit
    pub threshold: f64,
    /// Locations the rule applies to
    #[serde(default)]
    pub scope: LocationScope,
}

impl AlertRule {
    /// Create a rule that applies to all locations
    #[must_use]
    pub const fn new(metric: Metric, operator: Operator, threshold: f64) -> Self {
        Self {
            metric,
            operator,
            threshold,
            scope: LocationScope::All,
        }
    }

    /// Restrict the rule to a single location
    #[must_use]
    pub fn for_location(mut self, location_id: LocationId) -> Self {
        self.scope = LocationScope::Only(location_id);
        self
    }

    /// Whether this rule matches the given observation
    ///
    /// False when the scope does not cover the observation's location.
    #[must_use]
    pub fn matches(&self, observation: &Observation) -> bool {
        self.scope.covers(&observation.location_id)
            && self
                .operator
                .compare(observation.metric(self.metric), self.threshold)
    }
}

impl fmt::Display for AlertRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.metric, self.operator, self.threshold)?;
        if let LocationScope::Only(id) = &self.scope {
            write!(f, " @ {id}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{
        Condition, Humidity, ObservationTimestamp, Temperature, WindSpeed,
    };

    fn obs(location: &str, temp: f64) -> Observation {
        Observation::new(
            LocationId::new(location).unwrap(),
            ObservationTimestamp::from_unix(1_700_000_000).unwrap(),
            Temperature::new(temp).unwrap(),
            Humidity::new(10).unwrap(),
            WindSpeed::new(3.0).unwrap(),
            Condition::Clear,
        )
    }

    #[test]
    fn test_operator_compare() {
        assert!(Operator::GreaterThan.compare(41.0, 40.0));
        assert!(!Operator::GreaterThan.compare(40.0, 40.0));
        assert!(Operator::LessThan.compare(-1.0, 0.0));
        assert!(Operator::GreaterOrEqual.compare(40.0, 40.0));
        assert!(Operator::LessOrEqual.compare(40.0, 40.0));
        assert!(!Operator::LessOrEqual.compare(40.1, 40.0));
    }

    #[test]
    fn test_rule_matches_above_threshold() {
        let rule = AlertRule::new(Metric::Temperature, Operator::GreaterThan, 40.0);
        assert!(rule.matches(&obs("cairo", 41.0)));
    }

    #[test]
    fn test_rule_does_not_match_below_threshold() {
        let rule = AlertRule::new(Metric::Temperature, Operator::GreaterThan, 42.0);
        assert!(!rule.matches(&obs("cairo", 41.0)));
    }

    #[test]
    fn test_scope_restricts_rule() {
        let rule = AlertRule::new(Metric::Temperature, Operator::GreaterThan, 40.0)
            .for_location(LocationId::new("cairo").unwrap());
        assert!(rule.matches(&obs("cairo", 41.0)));
        assert!(!rule.matches(&obs("oslo", 41.0)));
    }

    #[test]
    fn test_scope_all_covers_everything() {
        let scope = LocationScope::All;
        assert!(scope.covers(&LocationId::new("anywhere").unwrap()));
    }

    #[test]
    fn test_rule_display() {
        let rule = AlertRule::new(Metric::Temperature, Operator::GreaterThan, 35.0);
        assert_eq!(rule.to_string(), "temperature > 35");

        let scoped = rule.for_location(LocationId::new("tunis").unwrap());
        assert_eq!(scoped.to_string(), "temperature > 35 @ tunis");
    }

    #[test]
    fn test_rule_serde_round_trip() {
        let rule = AlertRule::new(Metric::WindSpeed, Operator::GreaterOrEqual, 20.0)
            .for_location(LocationId::new("sydney").unwrap());
        let json = serde_json::to_string(&rule).expect("serialize");
        let back: AlertRule = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, rule);
    }

    #[test]
    fn test_scope_default_is_all() {
        let json = r#"{"metric":"temperature","operator":"greater_than","threshold":35.0}"#;
        let rule: AlertRule = serde_json::from_str(json).expect("deserialize");
        assert_eq!(rule.scope, LocationScope::All);
    }
}
