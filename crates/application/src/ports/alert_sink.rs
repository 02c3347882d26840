//! Alert sink port
//!
//! Hands alert events to an external delivery mechanism. The pipeline only
//! produces events; it never sends notifications itself, and it performs no
//! suppression or deduplication (rate limiting is the delivery side's job).

use async_trait::async_trait;
use domain::entities::AlertEvent;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for publishing alert events to a notification channel
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AlertSinkPort: Send + Sync {
    /// Publish one event
    async fn publish(&self, event: &AlertEvent) -> Result<(), ApplicationError>;
}
