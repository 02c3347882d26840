//! Forecaster port
//!
//! Boundary to the external forecasting collaborator. The pipeline defines
//! only this input/output contract; model choice, training, and accuracy
//! evaluation live on the other side of the port.

use async_trait::async_trait;
use chrono::Duration;
use domain::entities::{ForecastResult, Observation};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for producing predicted future values from historical observations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecasterPort: Send + Sync {
    /// Produce predictions covering `horizon` past the end of `history`
    ///
    /// `history` is time-ordered, ascending. Implementations read the
    /// store only through the history handed to them; they never write.
    async fn forecast(
        &self,
        history: &[Observation],
        horizon: Duration,
    ) -> Result<Vec<ForecastResult>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn ForecasterPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ForecasterPort>();
    }
}
