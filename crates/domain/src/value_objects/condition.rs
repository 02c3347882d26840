//! Weather condition classification
//!
//! Coarse condition buckets matching the groups the upstream provider
//! reports. Integration crates are responsible for mapping provider-specific
//! numeric codes onto this enum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weather condition bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Clear sky
    Clear,
    /// Cloud cover of any degree
    Clouds,
    /// Drizzle
    Drizzle,
    /// Rain
    Rain,
    /// Thunderstorm
    Thunderstorm,
    /// Snow
    Snow,
    /// Reduced visibility: mist, fog, haze, dust, smoke
    Atmosphere,
    /// Condition not reported or unmapped
    Unknown,
}

impl Condition {
    /// Stable string form used for persistence
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Clouds => "clouds",
            Self::Drizzle => "drizzle",
            Self::Rain => "rain",
            Self::Thunderstorm => "thunderstorm",
            Self::Snow => "snow",
            Self::Atmosphere => "atmosphere",
            Self::Unknown => "unknown",
        }
    }

    /// Parse the persisted string form; unrecognized input maps to `Unknown`
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "clear" => Self::Clear,
            "clouds" => Self::Clouds,
            "drizzle" => Self::Drizzle,
            "rain" => Self::Rain,
            "thunderstorm" => Self::Thunderstorm,
            "snow" => Self::Snow,
            "atmosphere" => Self::Atmosphere,
            _ => Self::Unknown,
        }
    }

    /// Whether any form of precipitation is falling
    #[must_use]
    pub const fn is_precipitation(&self) -> bool {
        matches!(self, Self::Drizzle | Self::Rain | Self::Thunderstorm | Self::Snow)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
