//! OpenWeatherMap HTTP client
//!
//! Implements the weather provider port against the OpenWeatherMap
//! current-weather API. Requests use `units=metric` so temperatures come
//! back in Celsius and wind speeds in m/s, matching the domain units.
//!
//! Error mapping:
//! - network failures, timeouts, 429 and 5xx responses are transient
//! - 401/403 is a configuration problem (bad API key), never retried
//! - everything else that prevents building a valid observation is a
//!   validation failure; the reading is dropped

use application::error::ApplicationError;
use application::ports::WeatherProviderPort;
use async_trait::async_trait;
use domain::entities::{Location, Observation};
use domain::value_objects::{Humidity, ObservationTimestamp, Temperature, WindSpeed};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::models::CurrentWeatherResponse;

/// OpenWeatherMap client configuration
#[derive(Clone, Deserialize)]
pub struct OpenWeatherConfig {
    /// API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key, required for every request
    pub api_key: SecretString,

    /// Connection timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl std::fmt::Debug for OpenWeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl OpenWeatherConfig {
    /// Create a configuration with the default endpoint and timeout
    #[must_use]
    pub fn new(api_key: SecretString) -> Self {
        Self {
            base_url: default_base_url(),
            api_key,
            timeout_secs: default_timeout(),
        }
    }
}

/// OpenWeatherMap HTTP client
#[derive(Debug)]
pub struct OpenWeatherClient {
    client: Client,
    config: OpenWeatherConfig,
}

impl OpenWeatherClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Configuration`] when the API key is
    /// empty or the HTTP client cannot be initialized.
    pub fn new(config: OpenWeatherConfig) -> Result<Self, ApplicationError> {
        if config.api_key.expose_secret().is_empty() {
            return Err(ApplicationError::Configuration(
                "OpenWeatherMap API key is empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

        Ok(Self { client, config })
    }

    async fn request_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentWeatherResponse, ApplicationError> {
        let url = format!("{}/weather", self.config.base_url);
        debug!(lat = latitude, lon = longitude, "Fetching current weather");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("units", "metric".to_string()),
                ("appid", self.config.api_key.expose_secret().to_string()),
            ])
            .send()
            .await
            .map_err(|e| ApplicationError::TransientFetch(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ApplicationError::Configuration(format!(
                "API key rejected (HTTP {status})"
            )));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Err(ApplicationError::TransientFetch(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(ApplicationError::Validation(format!("HTTP {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| ApplicationError::Validation(e.to_string()))
    }

    fn to_observation(
        location: &Location,
        response: &CurrentWeatherResponse,
    ) -> Result<Observation, ApplicationError> {
        let observed_at = ObservationTimestamp::from_unix(response.dt).ok_or_else(|| {
            ApplicationError::Validation(format!("unrepresentable timestamp {}", response.dt))
        })?;
        let temperature = Temperature::new(response.main.temp)
            .map_err(|e| ApplicationError::Validation(e.to_string()))?;
        let humidity = Humidity::new(response.main.humidity)
            .map_err(|e| ApplicationError::Validation(e.to_string()))?;
        let wind_speed = WindSpeed::new(response.wind.speed)
            .map_err(|e| ApplicationError::Validation(e.to_string()))?;

        Ok(Observation::new(
            location.id.clone(),
            observed_at,
            temperature,
            humidity,
            wind_speed,
            response.condition(),
        ))
    }
}

#[async_trait]
impl WeatherProviderPort for OpenWeatherClient {
    #[instrument(skip(self, location), fields(location = %location.id))]
    async fn fetch_current(&self, location: &Location) -> Result<Observation, ApplicationError> {
        let response = self
            .request_current(
                location.coordinates.latitude(),
                location.coordinates.longitude(),
            )
            .await?;
        Self::to_observation(location, &response)
    }

    async fn is_available(&self) -> bool {
        // Probe with fixed coordinates; any well-formed answer counts
        self.request_current(52.52, 13.405).await.is_ok()
    }
}
