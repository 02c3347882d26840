//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure and integration layers
//! implement these ports.

mod alert_sink;
mod forecaster_port;
mod observation_store;
mod provider_port;

#[cfg(test)]
pub use alert_sink::MockAlertSinkPort;
pub use alert_sink::AlertSinkPort;
#[cfg(test)]
pub use forecaster_port::MockForecasterPort;
pub use forecaster_port::ForecasterPort;
#[cfg(test)]
pub use observation_store::MockObservationStorePort;
pub use observation_store::{AppendMode, AppendOutcome, ObservationStorePort, TimeRange};
#[cfg(test)]
pub use provider_port::MockWeatherProviderPort;
pub use provider_port::WeatherProviderPort;
