//! Collector configuration

use application::ports::AppendMode;
use serde::{Deserialize, Serialize};

/// Collection schedule and concurrency settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Cron expression for collection ticks (6-field, with seconds).
    /// Default fires at the top of every hour.
    #[serde(default = "default_schedule")]
    pub schedule: String,

    /// Maximum number of locations fetched in parallel per tick
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,

    /// How repeated (location, minute) keys are treated on append.
    /// The scheduled path defaults to idempotent so an overlapping tick
    /// cannot corrupt the record.
    #[serde(default = "default_append_mode")]
    pub append_mode: AppendMode,
}

fn default_schedule() -> String {
    "0 0 * * * *".to_string()
}

const fn default_max_concurrent_fetches() -> usize {
    4
}

const fn default_append_mode() -> AppendMode {
    AppendMode::Idempotent
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            schedule: default_schedule(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
            append_mode: default_append_mode(),
        }
    }
}
