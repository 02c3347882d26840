//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: SQLite persistence
//! for the historical record, retry with backoff around the provider,
//! cron scheduling for collection ticks, configuration loading, and
//! tracing setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod retry;
pub mod scheduler;
pub mod telemetry;

pub use adapters::{RetryingProvider, TracingAlertSink};
pub use config::{
    AlertRuleConfig, AppConfig, CollectorConfig, DatabaseConfig, LocationConfig, ProviderConfig,
    RetryAppConfig, TelemetryConfig,
};
pub use persistence::{ConnectionPool, DatabaseError, SqliteObservationStore, create_pool};
pub use retry::{RetryConfig, Retryable, with_retry};
pub use scheduler::{SchedulerError, TaskScheduler, TaskStats, collection_task, schedules};
pub use telemetry::init_tracing;
