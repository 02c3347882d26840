//! OpenWeatherMap wire format
//!
//! Response shapes for the `/weather` endpoint, reduced to the fields the
//! pipeline consumes. Unknown fields are ignored.

use domain::value_objects::Condition;
use serde::Deserialize;

/// Response body of the current-weather endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherResponse {
    /// Condition entries; the first one is the primary condition
    #[serde(default)]
    pub weather: Vec<WeatherEntry>,
    /// Temperature and humidity block
    pub main: MainData,
    /// Wind block
    pub wind: WindData,
    /// Measurement time as a Unix timestamp in seconds, UTC
    pub dt: i64,
}

/// One condition entry
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherEntry {
    /// Numeric condition code (group encoded in the hundreds digit)
    pub id: u16,
}

/// Temperature and humidity readings
#[derive(Debug, Clone, Deserialize)]
pub struct MainData {
    /// Air temperature; degrees Celsius with `units=metric`
    pub temp: f64,
    /// Relative humidity percentage
    pub humidity: u8,
}

/// Wind readings
#[derive(Debug, Clone, Deserialize)]
pub struct WindData {
    /// Wind speed; meters per second with `units=metric`
    pub speed: f64,
}

impl CurrentWeatherResponse {
    /// The primary condition, mapped onto the domain buckets
    ///
    /// A response without any condition entry maps to
    /// [`Condition::Unknown`] rather than failing the whole observation.
    #[must_use]
    pub fn condition(&self) -> Condition {
        self.weather
            .first()
            .map_or(Condition::Unknown, |entry| condition_from_code(entry.id))
    }
}

/// Map a provider condition code onto a domain condition bucket
///
/// The hundreds digit selects the group: 2xx thunderstorm, 3xx drizzle,
/// 5xx rain, 6xx snow, 7xx atmosphere (mist, fog, dust), 800 clear,
/// 801-804 cloud cover.
#[must_use]
pub const fn condition_from_code(code: u16) -> Condition {
    match code {
        200..=299 => Condition::Thunderstorm,
        300..=399 => Condition::Drizzle,
        500..=599 => Condition::Rain,
        600..=699 => Condition::Snow,
        700..=799 => Condition::Atmosphere,
        800 => Condition::Clear,
        801..=804 => Condition::Clouds,
        _ => Condition::Unknown,
    }
}
