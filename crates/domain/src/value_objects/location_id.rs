//! Location identifier value object

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a location id is malformed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid location id: {0:?} (must be 1-64 chars of [a-z0-9_-])")]
pub struct InvalidLocationId(String);

/// Stable identifier for a configured observation location
///
/// A short lowercase slug (`berlin`, `new-york`) used as the partition key
/// of the historical record. Validated so it can be embedded safely in file
/// paths, queries, and log fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LocationId(String);

impl LocationId {
    /// Maximum length in bytes
    pub const MAX_LEN: usize = 64;

    /// Create a new validated location id
    ///
    /// # Errors
    ///
    /// Returns `InvalidLocationId` if the slug is empty, longer than 64
    /// bytes, or contains characters outside `[a-z0-9_-]`.
    pub fn new(slug: impl Into<String>) -> Result<Self, InvalidLocationId> {
        let slug = slug.into();
        let valid = !slug.is_empty()
            && slug.len() <= Self::MAX_LEN
            && slug
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-');
        if valid {
            Ok(Self(slug))
        } else {
            Err(InvalidLocationId(slug))
        }
    }

    /// Get the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for LocationId {
    type Err = InvalidLocationId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for LocationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Custom deserialization that validates the slug
impl<'de> Deserialize<'de> for LocationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
