//! Alert sink that emits events to the tracing pipeline
//!
//! The default notification channel: every triggered alert becomes a
//! structured WARN record. Log shippers pick these up downstream, so no
//! dedicated delivery integration is needed for the base deployment.

use application::error::ApplicationError;
use application::ports::AlertSinkPort;
use async_trait::async_trait;
use domain::entities::AlertEvent;
use tracing::warn;

/// Alert sink backed by structured logging
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAlertSink;

impl TracingAlertSink {
    /// Create a new tracing alert sink
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AlertSinkPort for TracingAlertSink {
    async fn publish(&self, event: &AlertEvent) -> Result<(), ApplicationError> {
        warn!(
            location = %event.observation.location_id,
            observed_at = %event.observation.observed_at,
            rule = %event.rule,
            value = event.observation.metric(event.rule.metric),
            "Weather alert triggered"
        );
        Ok(())
    }
}
