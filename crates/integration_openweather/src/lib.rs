//! OpenWeatherMap provider integration
//!
//! HTTP client for the OpenWeatherMap current-weather API
//! (<https://openweathermap.org/current>), implementing the application's
//! weather provider port. Requires an API key.

pub mod client;
mod models;

pub use client::{OpenWeatherClient, OpenWeatherConfig};
pub use models::{
    CurrentWeatherResponse, MainData, WeatherEntry, WindData, condition_from_code,
};
