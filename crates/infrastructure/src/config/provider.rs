//! Weather provider configuration

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::retry::RetryConfig;

/// Weather provider endpoint and credentials
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the provider API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry behavior for transient provider failures
    #[serde(default)]
    pub retry: RetryAppConfig,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            retry: RetryAppConfig::default(),
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .field("retry", &self.retry)
            .finish()
    }
}

/// Retry settings as they appear in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryAppConfig {
    /// Initial delay before first retry in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay between retries in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Multiplier for exponential backoff
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Maximum number of retry attempts
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

const fn default_initial_delay_ms() -> u64 {
    500
}

const fn default_max_delay_ms() -> u64 {
    30_000
}

const fn default_multiplier() -> f64 {
    2.0
}

const fn default_max_retries() -> u32 {
    3
}

impl Default for RetryAppConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            multiplier: default_multiplier(),
            max_retries: default_max_retries(),
        }
    }
}

impl RetryAppConfig {
    /// Convert to the runtime retry configuration
    #[must_use]
    pub const fn to_retry_config(&self) -> RetryConfig {
        RetryConfig::new(
            self.initial_delay_ms,
            self.max_delay_ms,
            self.multiplier,
            self.max_retries,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn defaults() {
        let config = ProviderConfig::default();
        assert_eq!(config.base_url, "https://api.openweathermap.org/data/2.5");
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.retry.max_retries, 3);
    }

    #[test]
    fn api_key_deserializes_but_never_serializes() {
        let json = r#"{"api_key":"hunter2"}"#;
        let config: ProviderConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            config.api_key.as_ref().map(ExposeSecret::expose_secret),
            Some("hunter2")
        );

        let serialized = serde_json::to_string(&config).unwrap();
        assert!(!serialized.contains("hunter2"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let json = r#"{"api_key":"hunter2"}"#;
        let config: ProviderConfig = serde_json::from_str(json).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn retry_converts_to_runtime_config() {
        let app = RetryAppConfig {
            initial_delay_ms: 200,
            max_delay_ms: 5000,
            multiplier: 1.5,
            max_retries: 5,
        };
        let retry = app.to_retry_config();
        assert_eq!(retry.initial_delay_ms, 200);
        assert_eq!(retry.max_delay_ms, 5000);
        assert!((retry.multiplier - 1.5).abs() < f64::EPSILON);
        assert_eq!(retry.max_retries, 5);
        assert!(retry.jitter_enabled);
    }
}
