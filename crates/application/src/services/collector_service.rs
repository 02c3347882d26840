//! Collector service - one scheduled tick of the ingestion pipeline
//!
//! On each tick the collector fetches the current observation for every
//! configured location, appends it to the store, evaluates alert rules
//! against the new reading, and hands resulting events to the alert sink.
//!
//! Locations are independent: fetches run with bounded parallelism and one
//! location's failure never aborts its siblings.

use std::sync::Arc;

use chrono::Utc;
use domain::entities::{AlertRule, Location};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{AlertSinkPort, AppendMode, AppendOutcome, ObservationStorePort, WeatherProviderPort};
use crate::services::alert_evaluator;

/// Outcome of processing a single location within a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationOutcome {
    /// Observation fetched, appended, and evaluated; carries the number of
    /// alert events emitted
    Appended(usize),
    /// The identical observation was already stored (provider had not
    /// refreshed since the last tick)
    Duplicate,
    /// The provider response failed validation and was dropped
    Invalid,
    /// Fetch or append failed
    Failed,
}

/// Aggregated result of one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Observations written to the store
    pub appended: usize,
    /// Idempotent re-ingestions skipped as no-ops
    pub duplicates: usize,
    /// Provider responses dropped by validation
    pub invalid: usize,
    /// Locations that failed after retries
    pub failed: usize,
    /// Alert events handed to the sink
    pub alerts: usize,
}

impl TickSummary {
    /// Total number of locations processed
    #[must_use]
    pub const fn total(&self) -> usize {
        self.appended + self.duplicates + self.invalid + self.failed
    }

    fn record(&mut self, outcome: LocationOutcome) {
        match outcome {
            LocationOutcome::Appended(alerts) => {
                self.appended += 1;
                self.alerts += alerts;
            },
            LocationOutcome::Duplicate => self.duplicates += 1,
            LocationOutcome::Invalid => self.invalid += 1,
            LocationOutcome::Failed => self.failed += 1,
        }
    }
}

/// Service that runs the fetch-append-evaluate pipeline
pub struct CollectorService<P, S, A> {
    provider: Arc<P>,
    store: Arc<S>,
    alert_sink: Arc<A>,
    rules: Arc<[AlertRule]>,
    locations: Arc<[Location]>,
    append_mode: AppendMode,
    max_concurrent_fetches: usize,
}

impl<P, S, A> std::fmt::Debug for CollectorService<P, S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectorService")
            .field("locations", &self.locations.len())
            .field("rules", &self.rules.len())
            .field("max_concurrent_fetches", &self.max_concurrent_fetches)
            .finish_non_exhaustive()
    }
}

impl<P, S, A> CollectorService<P, S, A>
where
    P: WeatherProviderPort + 'static,
    S: ObservationStorePort + 'static,
    A: AlertSinkPort + 'static,
{
    /// Create a new collector service
    #[must_use]
    pub fn new(
        provider: Arc<P>,
        store: Arc<S>,
        alert_sink: Arc<A>,
        rules: Vec<AlertRule>,
        locations: Vec<Location>,
        append_mode: AppendMode,
        max_concurrent_fetches: usize,
    ) -> Self {
        Self {
            provider,
            store,
            alert_sink,
            rules: rules.into(),
            locations: locations.into(),
            append_mode,
            max_concurrent_fetches: max_concurrent_fetches.max(1),
        }
    }

    /// Run one tick: process every configured location
    #[instrument(skip(self), fields(locations = self.locations.len()))]
    pub async fn tick(&self) -> TickSummary {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_fetches));
        let mut workers: JoinSet<LocationOutcome> = JoinSet::new();

        for location in self.locations.iter().cloned() {
            let semaphore = Arc::clone(&semaphore);
            let provider = Arc::clone(&self.provider);
            let store = Arc::clone(&self.store);
            let alert_sink = Arc::clone(&self.alert_sink);
            let rules = Arc::clone(&self.rules);
            let mode = self.append_mode;

            workers.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    // The semaphore is never closed while workers run
                    return LocationOutcome::Failed;
                };
                Self::process_location(&provider, &store, &alert_sink, &rules, &location, mode)
                    .await
            });
        }

        let mut summary = TickSummary::default();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(outcome) => summary.record(outcome),
                Err(e) => {
                    error!(error = %e, "Collector worker panicked");
                    summary.record(LocationOutcome::Failed);
                },
            }
        }

        info!(
            appended = summary.appended,
            duplicates = summary.duplicates,
            invalid = summary.invalid,
            failed = summary.failed,
            alerts = summary.alerts,
            "Tick complete"
        );
        summary
    }

    /// Fetch, append, and evaluate a single location
    async fn process_location(
        provider: &P,
        store: &S,
        alert_sink: &A,
        rules: &[AlertRule],
        location: &Location,
        mode: AppendMode,
    ) -> LocationOutcome {
        let observation = match provider.fetch_current(location).await {
            Ok(observation) => observation,
            Err(ApplicationError::Validation(reason)) => {
                warn!(location = %location.id, reason = %reason, "Dropping invalid observation");
                return LocationOutcome::Invalid;
            },
            Err(e) => {
                error!(location = %location.id, error = %e, "Fetch failed");
                return LocationOutcome::Failed;
            },
        };

        match store.append(&observation, mode).await {
            Ok(AppendOutcome::Inserted) => {},
            Ok(AppendOutcome::AlreadyExists) => {
                debug!(location = %location.id, at = %observation.observed_at, "Observation already stored");
                return LocationOutcome::Duplicate;
            },
            Err(ApplicationError::DuplicateKey(key)) => {
                // Same key, different values (or any repeat in strict mode):
                // the record is immutable, keep the first write and surface
                // the conflict
                warn!(location = %location.id, key = %key, "Conflicting re-ingest rejected");
                return LocationOutcome::Failed;
            },
            Err(e) => {
                error!(location = %location.id, error = %e, "Append failed, skipping location until next tick");
                return LocationOutcome::Failed;
            },
        }

        let events = alert_evaluator::evaluate(&observation, rules, Utc::now());
        let mut published = 0usize;
        for event in &events {
            match alert_sink.publish(event).await {
                Ok(()) => published += 1,
                Err(e) => {
                    error!(location = %location.id, error = %e, "Failed to publish alert event");
                },
            }
        }

        if published > 0 {
            info!(location = %location.id, alerts = published, "Alert events published");
        }
        LocationOutcome::Appended(published)
    }
}
