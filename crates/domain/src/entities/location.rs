//! Location entity - a configured observation site

use serde::{Deserialize, Serialize};

use crate::value_objects::{GeoLocation, LocationId};

/// A site the collector fetches observations for
///
/// Static configuration: the set of locations is loaded once at process
/// start and never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Stable identifier, used as the store partition key
    pub id: LocationId,
    /// Human-readable name for display and logs
    pub display_name: String,
    /// Coordinates passed to the weather provider
    pub coordinates: GeoLocation,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub const fn new(id: LocationId, display_name: String, coordinates: GeoLocation) -> Self {
        Self {
            id,
            display_name,
            coordinates,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name, self.id)
    }
}
