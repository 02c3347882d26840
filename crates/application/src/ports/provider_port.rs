//! Weather provider port
//!
//! Defines the interface to the external weather data provider. One
//! implementation lives in the `integration_openweather` crate; tests use
//! the generated mock.

use async_trait::async_trait;
use domain::entities::{Location, Observation};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for fetching current weather observations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherProviderPort: Send + Sync {
    /// Fetch the current observation for a location
    ///
    /// Transient provider failures surface as
    /// [`ApplicationError::TransientFetch`]; responses that cannot be turned
    /// into a valid [`Observation`] surface as
    /// [`ApplicationError::Validation`].
    async fn fetch_current(&self, location: &Location) -> Result<Observation, ApplicationError>;

    /// Check if the provider is reachable
    async fn is_available(&self) -> bool;
}
