//! Alert event entity - emitted when a rule matches an observation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::alert_rule::AlertRule;
use crate::entities::observation::Observation;

/// A threshold crossing detected during evaluation
///
/// Events are pure values: evaluating the same observation against the same
/// rules at the same instant yields identical events. Delivery, suppression,
/// and rate limiting are the notification channel's concern, not this
/// entity's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    /// The rule that matched
    pub rule: AlertRule,
    /// The observation that triggered the match
    pub observation: Observation,
    /// When the evaluation ran
    pub triggered_at: DateTime<Utc>,
}

impl AlertEvent {
    /// Create a new alert event
    #[must_use]
    pub const fn new(rule: AlertRule, observation: Observation, triggered_at: DateTime<Utc>) -> Self {
        Self {
            rule,
            observation,
            triggered_at,
        }
    }

    /// One-line summary suitable for logs and notification subjects
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}: {} (rule: {})",
            self.observation.location_id,
            self.observation.metric(self.rule.metric),
            self.rule
        )
    }
}
