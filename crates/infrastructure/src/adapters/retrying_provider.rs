//! Retrying decorator for the weather provider port
//!
//! Wraps any provider implementation with the backoff policy from
//! [`crate::retry`]. Only transient fetch failures are repeated; a
//! validation or configuration error surfaces immediately.

use application::error::ApplicationError;
use application::ports::WeatherProviderPort;
use async_trait::async_trait;
use domain::entities::{Location, Observation};
use tracing::instrument;

use crate::retry::{RetryConfig, with_retry};

/// Weather provider wrapped with bounded retries
#[derive(Debug)]
pub struct RetryingProvider<P> {
    inner: P,
    config: RetryConfig,
}

impl<P> RetryingProvider<P> {
    /// Wrap a provider with the given retry policy
    #[must_use]
    pub const fn new(inner: P, config: RetryConfig) -> Self {
        Self { inner, config }
    }
}

#[async_trait]
impl<P> WeatherProviderPort for RetryingProvider<P>
where
    P: WeatherProviderPort,
{
    #[instrument(skip(self, location), fields(location = %location.id))]
    async fn fetch_current(&self, location: &Location) -> Result<Observation, ApplicationError> {
        with_retry(&self.config, || self.inner.fetch_current(location))
            .await
            .into_result()
    }

    async fn is_available(&self) -> bool {
        self.inner.is_available().await
    }
}
