//! Forecast orchestration
//!
//! Reads historical observations for a location and hands them to the
//! external forecasting collaborator through [`ForecasterPort`]. Runs out of
//! band: it only reads the store and never touches the ingestion path.

use std::sync::Arc;

use chrono::Duration;
use domain::entities::ForecastResult;
use domain::value_objects::{LocationId, ObservationTimestamp};
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::{ForecasterPort, ObservationStorePort, TimeRange};

/// Service that prepares history and invokes the forecaster
pub struct ForecastService<S, F> {
    store: Arc<S>,
    forecaster: Arc<F>,
}

impl<S, F> std::fmt::Debug for ForecastService<S, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastService").finish_non_exhaustive()
    }
}

impl<S, F> ForecastService<S, F>
where
    S: ObservationStorePort,
    F: ForecasterPort,
{
    /// Create a new forecast service
    #[must_use]
    pub const fn new(store: Arc<S>, forecaster: Arc<F>) -> Self {
        Self { store, forecaster }
    }

    /// Produce predictions for one location
    ///
    /// Loads the trailing `history_window` of observations ending now and
    /// asks the forecaster for predictions covering `horizon`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Validation`] when no history exists for
    /// the location, and propagates store and forecaster errors.
    #[instrument(skip(self), fields(location = %location_id))]
    pub async fn forecast_location(
        &self,
        location_id: &LocationId,
        history_window: Duration,
        horizon: Duration,
    ) -> Result<Vec<ForecastResult>, ApplicationError> {
        let end = ObservationTimestamp::now();
        let start = ObservationTimestamp::new(end.as_datetime() - history_window);
        let range = TimeRange::new(start, end)?;

        let history = self.store.query(location_id, range).await?;
        if history.is_empty() {
            return Err(ApplicationError::Validation(format!(
                "no observation history for {location_id} in the last {history_window}"
            )));
        }

        debug!(points = history.len(), "Invoking forecaster");
        self.forecaster.forecast(&history, horizon).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MockForecasterPort, MockObservationStorePort};
    use domain::entities::{ConfidenceInterval, Observation};
    use domain::value_objects::{Condition, Humidity, Temperature, WindSpeed};

    fn history_point(minutes_ago: i64) -> Observation {
        Observation::new(
            LocationId::new("berlin").unwrap(),
            ObservationTimestamp::now().offset_minutes(-minutes_ago),
            Temperature::new(10.0).unwrap(),
            Humidity::new(60).unwrap(),
            WindSpeed::new(5.0).unwrap(),
            Condition::Clouds,
        )
    }

    #[tokio::test]
    async fn forwards_history_to_forecaster() {
        let mut store = MockObservationStorePort::new();
        store
            .expect_query()
            .times(1)
            .returning(|_, _| Ok(vec![history_point(120), history_point(60)]));

        let mut forecaster = MockForecasterPort::new();
        forecaster
            .expect_forecast()
            .times(1)
            .withf(|history, horizon| history.len() == 2 && *horizon == Duration::hours(6))
            .returning(|history, _| {
                Ok(vec![ForecastResult {
                    location_id: history[0].location_id.clone(),
                    timestamp: ObservationTimestamp::now().offset_minutes(60),
                    predicted_value: 11.0,
                    confidence: ConfidenceInterval::new(9.0, 13.0).unwrap(),
                }])
            });

        let svc = ForecastService::new(Arc::new(store), Arc::new(forecaster));
        let results = svc
            .forecast_location(
                &LocationId::new("berlin").unwrap(),
                Duration::days(7),
                Duration::hours(6),
            )
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].location_id.as_str(), "berlin");
    }

    #[tokio::test]
    async fn empty_history_is_a_validation_error() {
        let mut store = MockObservationStorePort::new();
        store.expect_query().times(1).returning(|_, _| Ok(vec![]));

        let mut forecaster = MockForecasterPort::new();
        forecaster.expect_forecast().times(0);

        let svc = ForecastService::new(Arc::new(store), Arc::new(forecaster));
        let err = svc
            .forecast_location(
                &LocationId::new("berlin").unwrap(),
                Duration::days(7),
                Duration::hours(6),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Validation(_)));
    }

    #[tokio::test]
    async fn store_errors_propagate() {
        let mut store = MockObservationStorePort::new();
        store
            .expect_query()
            .times(1)
            .returning(|_, _| Err(ApplicationError::StoreUnavailable("io".to_string())));

        let forecaster = MockForecasterPort::new();

        let svc = ForecastService::new(Arc::new(store), Arc::new(forecaster));
        let err = svc
            .forecast_location(
                &LocationId::new("berlin").unwrap(),
                Duration::days(7),
                Duration::hours(6),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::StoreUnavailable(_)));
    }
}
