//! Application configuration
//!
//! Split into focused sub-modules:
//! - `database`: SQLite database settings
//! - `provider`: weather provider endpoint and credentials
//! - `collector`: schedule, concurrency and ingest mode
//! - `sites`: observed locations and alert rules
//!
//! Configuration is layered: a `config.toml` (or `config.json`/`config.yaml`)
//! in the working directory, overridden by `SKYWATCH_*` environment
//! variables. Nested fields use a double underscore between the section and
//! the field, e.g. `SKYWATCH_PROVIDER__API_KEY` or `SKYWATCH_DATABASE__PATH`,
//! so field names that themselves contain underscores stay addressable.

mod collector;
mod database;
mod provider;
mod sites;

use serde::{Deserialize, Serialize};

pub use collector::CollectorConfig;
pub use database::DatabaseConfig;
pub use provider::{ProviderConfig, RetryAppConfig};
pub use sites::{AlertRuleConfig, LocationConfig, SiteError};

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Environment override source for `SKYWATCH_*` variables
///
/// The field separator is a double underscore so multi-word field names
/// survive: `SKYWATCH_PROVIDER__API_KEY` maps to `provider.api_key`, not
/// `provider.api.key`.
fn env_source() -> config::Environment {
    config::Environment::with_prefix("SKYWATCH")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log filter directive, e.g. "info" or "skywatch=debug,info"
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit logs as JSON lines instead of human-readable text
    #[serde(default)]
    pub json_logs: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            json_logs: false,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Weather provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Collection schedule and concurrency
    #[serde(default)]
    pub collector: CollectorConfig,

    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Observed locations
    #[serde(default)]
    pub locations: Vec<LocationConfig>,

    /// Alert rules evaluated against every new observation
    #[serde(default)]
    pub alerts: Vec<AlertRuleConfig>,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// # Errors
    ///
    /// Returns an error when the file or environment values cannot be
    /// parsed into the expected shape.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a named file plus the environment
    ///
    /// # Errors
    ///
    /// Returns an error when the file or environment values cannot be
    /// parsed into the expected shape.
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name(file).required(false))
            // Override with environment variables (e.g., SKYWATCH_DATABASE__PATH)
            .add_source(env_source());

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Resolve the configured locations into domain entities
    ///
    /// # Errors
    ///
    /// Returns the first invalid entry; a misconfigured site should stop
    /// startup rather than be silently skipped.
    pub fn locations(&self) -> Result<Vec<domain::entities::Location>, SiteError> {
        self.locations.iter().map(LocationConfig::to_location).collect()
    }

    /// Resolve the configured alert rules into domain entities
    ///
    /// # Errors
    ///
    /// Returns the first invalid entry.
    pub fn alert_rules(&self) -> Result<Vec<domain::entities::AlertRule>, SiteError> {
        self.alerts.iter().map(AlertRuleConfig::to_rule).collect()
    }
}
