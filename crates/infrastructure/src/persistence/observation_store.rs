//! SQLite-based observation persistence
//!
//! The composite primary key on (location_id, observed_at) is the single
//! point that enforces uniqueness; concurrent appends race on the INSERT
//! and the loser resolves the conflict by reading the committed row back.

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{AppendMode, AppendOutcome, ObservationStorePort, TimeRange},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::entities::Observation;
use domain::value_objects::{
    Condition, Humidity, LocationId, ObservationTimestamp, Temperature, WindSpeed,
};
use rusqlite::{OptionalExtension, Row, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

const SELECT_COLUMNS: &str =
    "location_id, observed_at, temperature, humidity, wind_speed, condition";

/// SQLite-based observation store
#[derive(Debug, Clone)]
pub struct SqliteObservationStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteObservationStore {
    /// Create a new SQLite observation store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ObservationStorePort for SqliteObservationStore {
    #[instrument(skip(self, observation), fields(key = %observation.key()))]
    async fn append(
        &self,
        observation: &Observation,
        mode: AppendMode,
    ) -> Result<AppendOutcome, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let observation = observation.clone();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::StoreUnavailable(e.to_string()))?;

            let inserted = conn.execute(
                "INSERT INTO observations (
                    location_id, observed_at, temperature, humidity,
                    wind_speed, condition, recorded_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    observation.location_id.as_str(),
                    observation.observed_at.to_rfc3339(),
                    observation.temperature.celsius(),
                    observation.humidity.value(),
                    observation.wind_speed.mps(),
                    observation.condition.as_str(),
                    Utc::now().to_rfc3339(),
                ],
            );

            match inserted {
                Ok(_) => {
                    debug!("Appended observation");
                    Ok(AppendOutcome::Inserted)
                },
                Err(e) if is_constraint_violation(&e) => {
                    resolve_conflict(&conn, &observation, mode)
                },
                Err(e) => Err(ApplicationError::StoreUnavailable(e.to_string())),
            }
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self), fields(location = %location_id))]
    async fn query(
        &self,
        location_id: &LocationId,
        range: TimeRange,
    ) -> Result<Vec<Observation>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let location = location_id.as_str().to_string();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::StoreUnavailable(e.to_string()))?;

            // RFC 3339 UTC text sorts chronologically, so the BETWEEN runs
            // on the primary key index
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM observations
                     WHERE location_id = ?1 AND observed_at >= ?2 AND observed_at <= ?3
                     ORDER BY observed_at ASC"
                ))
                .map_err(|e| ApplicationError::StoreUnavailable(e.to_string()))?;

            let observations: Vec<Observation> = stmt
                .query_map(
                    params![location, range.start.to_rfc3339(), range.end.to_rfc3339()],
                    row_to_observation,
                )
                .map_err(|e| ApplicationError::StoreUnavailable(e.to_string()))?
                .collect::<rusqlite::Result<_>>()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            debug!(count = observations.len(), "Queried observations");
            Ok(observations)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self), fields(location = %location_id))]
    async fn latest(
        &self,
        location_id: &LocationId,
    ) -> Result<Option<Observation>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let location = location_id.as_str().to_string();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::StoreUnavailable(e.to_string()))?;

            conn.query_row(
                &format!(
                    "SELECT {SELECT_COLUMNS} FROM observations
                     WHERE location_id = ?1
                     ORDER BY observed_at DESC LIMIT 1"
                ),
                [&location],
                row_to_observation,
            )
            .optional()
            .map_err(|e| ApplicationError::StoreUnavailable(e.to_string()))
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}

/// Decide the outcome of an INSERT that hit the primary key
///
/// Idempotent mode tolerates an exact re-ingest; a row with differing
/// values is a conflict in either mode.
fn resolve_conflict(
    conn: &rusqlite::Connection,
    observation: &Observation,
    mode: AppendMode,
) -> Result<AppendOutcome, ApplicationError> {
    let existing = conn
        .query_row(
            &format!(
                "SELECT {SELECT_COLUMNS} FROM observations
                 WHERE location_id = ?1 AND observed_at = ?2"
            ),
            params![
                observation.location_id.as_str(),
                observation.observed_at.to_rfc3339()
            ],
            row_to_observation,
        )
        .map_err(|e| ApplicationError::StoreUnavailable(e.to_string()))?;

    if mode == AppendMode::Idempotent && existing.same_values(observation) {
        debug!("Observation already present, idempotent no-op");
        return Ok(AppendOutcome::AlreadyExists);
    }

    Err(ApplicationError::DuplicateKey(observation.key().to_string()))
}

fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Convert a database row to an Observation domain entity
///
/// Rows only enter the table through validated value objects, so a parse
/// failure here means external tampering and surfaces as a column error.
fn row_to_observation(row: &Row<'_>) -> rusqlite::Result<Observation> {
    let location_str: String = row.get(0)?;
    let observed_at_str: String = row.get(1)?;
    let temperature: f64 = row.get(2)?;
    let humidity: u8 = row.get(3)?;
    let wind_speed: f64 = row.get(4)?;
    let condition_str: String = row.get(5)?;

    let location_id = LocationId::new(&location_str).map_err(|e| column_error(0, e))?;
    let observed_at = parse_timestamp(&observed_at_str).ok_or_else(|| {
        column_error(
            1,
            std::io::Error::new(std::io::ErrorKind::InvalidData, "invalid timestamp"),
        )
    })?;
    let temperature = Temperature::new(temperature).map_err(|e| column_error(2, e))?;
    let humidity = Humidity::new(humidity).map_err(|e| column_error(3, e))?;
    let wind_speed = WindSpeed::new(wind_speed).map_err(|e| column_error(4, e))?;
    let condition = Condition::parse(&condition_str);

    Ok(Observation::new(
        location_id,
        observed_at,
        temperature,
        humidity,
        wind_speed,
        condition,
    ))
}

fn parse_timestamp(s: &str) -> Option<ObservationTimestamp> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| ObservationTimestamp::new(dt.with_timezone(&Utc)))
}

fn column_error(
    index: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(err))
}
