//! Alert evaluation
//!
//! Pure threshold evaluation of one observation against a rule set. No
//! hidden state: the result depends only on the arguments, so repeated
//! calls with the same inputs produce identical events.

use chrono::{DateTime, Utc};
use domain::entities::{AlertEvent, AlertRule, Observation};

/// Evaluate an observation against a set of alert rules
///
/// Every rule whose location scope covers the observation and whose
/// comparison holds emits one event. Simultaneous matches all emit
/// independently; suppression and deduplication are the notification
/// channel's concern.
#[must_use]
pub fn evaluate(
    observation: &Observation,
    rules: &[AlertRule],
    triggered_at: DateTime<Utc>,
) -> Vec<AlertEvent> {
    rules
        .iter()
        .filter(|rule| rule.matches(observation))
        .map(|rule| AlertEvent::new(rule.clone(), observation.clone(), triggered_at))
        .collect()
}
