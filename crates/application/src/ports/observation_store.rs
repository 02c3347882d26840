//! Observation store port
//!
//! Defines the interface to the durable historical record. Appends are
//! write-then-acknowledge: a successful return means the observation is
//! committed.

use async_trait::async_trait;
use domain::entities::Observation;
use domain::value_objects::{LocationId, ObservationTimestamp};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Caller intent for re-ingesting an existing key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppendMode {
    /// A repeated (location, timestamp) key is always an error
    Strict,
    /// A repeated key with identical values is a no-op; differing values
    /// are still an error
    Idempotent,
}

/// Result of a successful append
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The observation was written
    Inserted,
    /// The identical observation was already present (idempotent mode)
    AlreadyExists,
}

/// Inclusive time range over minute-precision timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// First timestamp included
    pub start: ObservationTimestamp,
    /// Last timestamp included
    pub end: ObservationTimestamp,
}

impl TimeRange {
    /// Create a range, validating that it is not inverted
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Validation`] when `start > end`.
    pub fn new(
        start: ObservationTimestamp,
        end: ObservationTimestamp,
    ) -> Result<Self, ApplicationError> {
        if start > end {
            return Err(ApplicationError::Validation(format!(
                "inverted time range: {start} > {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Whether a timestamp falls inside the range (inclusive on both ends)
    #[must_use]
    pub fn contains(&self, at: ObservationTimestamp) -> bool {
        self.start <= at && at <= self.end
    }
}

/// Port for the durable observation record
///
/// Implementations must make `append` safe under concurrent calls from
/// multiple collector workers: uniqueness of (location, timestamp) is
/// enforced atomically per key, not by a global lock.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObservationStorePort: Send + Sync {
    /// Append one observation
    ///
    /// Fails with [`ApplicationError::DuplicateKey`] according to `mode`,
    /// and with [`ApplicationError::StoreUnavailable`] when the record
    /// cannot accept writes. Durability is guaranteed before returning.
    async fn append(
        &self,
        observation: &Observation,
        mode: AppendMode,
    ) -> Result<AppendOutcome, ApplicationError>;

    /// All observations for a location within the range, ascending by
    /// timestamp
    async fn query(
        &self,
        location_id: &LocationId,
        range: TimeRange,
    ) -> Result<Vec<Observation>, ApplicationError>;

    /// The most recent observation for a location, if any
    async fn latest(
        &self,
        location_id: &LocationId,
    ) -> Result<Option<Observation>, ApplicationError>;
}
