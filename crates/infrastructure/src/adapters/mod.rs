//! Port adapters
//!
//! Decorators and local implementations of application ports.

mod alert_sink;
mod retrying_provider;

pub use alert_sink::TracingAlertSink;
pub use retrying_provider::RetryingProvider;
