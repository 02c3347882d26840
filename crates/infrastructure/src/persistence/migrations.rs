//! Database migrations
//!
//! Manages database schema versioning and migrations.
//!
//! ## Adding New Migrations
//!
//! 1. Increment the `SCHEMA_VERSION` constant
//! 2. Add a new `migrate_vX` function
//! 3. Update `run_migrations` to call the new function

use rusqlite::Connection;
use tracing::{debug, error, info};

use super::connection::DatabaseError;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current_version = get_schema_version(conn)?;

    if current_version < SCHEMA_VERSION {
        info!(
            from_version = current_version,
            to_version = SCHEMA_VERSION,
            "Running database migrations"
        );

        if current_version < 1 {
            if let Err(e) = migrate_v1(conn) {
                error!(version = 1, error = %e, "Migration V001 (observations) failed");
                return Err(e);
            }
        }

        set_schema_version(conn, SCHEMA_VERSION)?;
        info!(version = SCHEMA_VERSION, "Database migrations complete");
    } else {
        debug!(version = current_version, "Database schema is up to date");
    }

    Ok(())
}

/// Get current schema version
fn get_schema_version(conn: &Connection) -> Result<i32, DatabaseError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    Ok(version)
}

/// Set schema version
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Migration to version 1: Observation record
///
/// Timestamps are stored as RFC 3339 UTC text: fixed-width and UTC-only,
/// so lexicographic order matches chronological order and range scans can
/// use the primary key index directly. The composite primary key is what
/// enforces at-most-one observation per (location, minute).
fn migrate_v1(conn: &Connection) -> Result<(), DatabaseError> {
    debug!("Applying migration V001: Observation record");

    conn.execute_batch(
        "
        -- One row per (location, minute); the natural key doubles as the
        -- uniqueness guard for concurrent appends.
        CREATE TABLE IF NOT EXISTS observations (
            location_id TEXT NOT NULL,
            observed_at TEXT NOT NULL,
            temperature REAL NOT NULL,
            humidity INTEGER NOT NULL,
            wind_speed REAL NOT NULL,
            condition TEXT NOT NULL,
            recorded_at TEXT NOT NULL,
            PRIMARY KEY (location_id, observed_at)
        );

        -- Cross-location scans by time
        CREATE INDEX IF NOT EXISTS idx_observations_observed_at ON observations(observed_at);
        ",
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "
            PRAGMA foreign_keys = ON;
            PRAGMA journal_mode = WAL;
            ",
        )
        .unwrap();
        conn
    }

    #[test]
    fn run_migrations_creates_tables() {
        let conn = create_test_connection();
        run_migrations(&conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(Result::ok)
            .collect();

        assert!(tables.contains(&"observations".to_string()));
        assert!(tables.contains(&"schema_version".to_string()));
    }

    #[test]
    fn migrations_are_idempotent() {
        let conn = create_test_connection();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap(); // Should not fail
    }

    #[test]
    fn schema_version_tracked() {
        let conn = create_test_connection();
        run_migrations(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn primary_key_rejects_duplicate_minute() {
        let conn = create_test_connection();
        run_migrations(&conn).unwrap();

        conn.execute(
            "INSERT INTO observations (location_id, observed_at, temperature, humidity, wind_speed, condition, recorded_at)
             VALUES ('berlin', '2026-01-01T12:00:00+00:00', 3.5, 80, 4.2, 'clouds', '2026-01-01T12:00:30+00:00')",
            [],
        )
        .unwrap();

        let dup = conn.execute(
            "INSERT INTO observations (location_id, observed_at, temperature, humidity, wind_speed, condition, recorded_at)
             VALUES ('berlin', '2026-01-01T12:00:00+00:00', 4.0, 75, 3.0, 'clear', '2026-01-01T12:00:45+00:00')",
            [],
        );
        assert!(dup.is_err());

        // Same minute at a different location is fine
        conn.execute(
            "INSERT INTO observations (location_id, observed_at, temperature, humidity, wind_speed, condition, recorded_at)
             VALUES ('oslo', '2026-01-01T12:00:00+00:00', -2.0, 90, 8.0, 'snow', '2026-01-01T12:00:30+00:00')",
            [],
        )
        .unwrap();
    }
}
