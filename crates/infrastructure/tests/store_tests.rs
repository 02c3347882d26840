//! Integration tests for the file-backed observation store
//!
//! These tests run against a real database file: writes must survive
//! reopening the pool, and concurrent appends from parallel workers must
//! resolve duplicates through the unique key rather than corrupt the
//! record.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::cast_precision_loss)]

use std::sync::Arc;

use application::ports::{AppendMode, AppendOutcome, ObservationStorePort, TimeRange};
use domain::entities::Observation;
use domain::value_objects::{
    Condition, Humidity, LocationId, ObservationTimestamp, Temperature, WindSpeed,
};
use infrastructure::{DatabaseConfig, SqliteObservationStore, create_pool};

// Aligned to a minute boundary so offsets stay within the same keys
const T0: i64 = 1_700_000_000 - (1_700_000_000 % 60);

fn file_config(dir: &tempfile::TempDir) -> DatabaseConfig {
    DatabaseConfig {
        path: dir
            .path()
            .join("observations.db")
            .to_string_lossy()
            .into_owned(),
        max_connections: 4,
        run_migrations: true,
    }
}

fn open_store(config: &DatabaseConfig) -> SqliteObservationStore {
    let pool = create_pool(config).expect("pool");
    SqliteObservationStore::new(Arc::new(pool))
}

fn observation(location: &str, minutes_after_t0: i64, temp: f64) -> Observation {
    Observation::new(
        LocationId::new(location).unwrap(),
        ObservationTimestamp::from_unix(T0).unwrap().offset_minutes(minutes_after_t0),
        Temperature::new(temp).unwrap(),
        Humidity::new(60).unwrap(),
        WindSpeed::new(3.0).unwrap(),
        Condition::Clouds,
    )
}

#[tokio::test]
async fn writes_survive_reopening_the_database() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = file_config(&dir);

    {
        let store = open_store(&config);
        for minute in 0..3 {
            let outcome = store
                .append(&observation("berlin", minute, 10.0 + minute as f64), AppendMode::Strict)
                .await
                .expect("append");
            assert_eq!(outcome, AppendOutcome::Inserted);
        }
    }

    // Fresh pool over the same file
    let store = open_store(&config);
    let range = TimeRange::new(
        ObservationTimestamp::from_unix(T0).unwrap(),
        ObservationTimestamp::from_unix(T0).unwrap().offset_minutes(10),
    )
    .expect("range");
    let rows = store
        .query(&LocationId::new("berlin").unwrap(), range)
        .await
        .expect("query");

    assert_eq!(rows.len(), 3);
    assert!((rows[0].temperature.celsius() - 10.0).abs() < f64::EPSILON);
    assert!((rows[2].temperature.celsius() - 12.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn concurrent_appends_of_distinct_keys_all_land() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(open_store(&file_config(&dir)));

    let mut handles = Vec::new();
    for minute in 0..8 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .append(&observation("oslo", minute, 5.0), AppendMode::Strict)
                .await
        }));
    }

    for handle in handles {
        let outcome = handle.await.expect("join").expect("append");
        assert_eq!(outcome, AppendOutcome::Inserted);
    }

    let range = TimeRange::new(
        ObservationTimestamp::from_unix(T0).unwrap(),
        ObservationTimestamp::from_unix(T0).unwrap().offset_minutes(8),
    )
    .expect("range");
    let rows = store
        .query(&LocationId::new("oslo").unwrap(), range)
        .await
        .expect("query");
    assert_eq!(rows.len(), 8);

    // Ascending by timestamp
    for pair in rows.windows(2) {
        assert!(pair[0].observed_at < pair[1].observed_at);
    }
}

#[tokio::test]
async fn concurrent_identical_appends_keep_exactly_one_row() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(open_store(&file_config(&dir)));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .append(&observation("tokyo", 0, 21.0), AppendMode::Idempotent)
                .await
        }));
    }

    let mut inserted = 0;
    let mut already = 0;
    for handle in handles {
        match handle.await.expect("join").expect("append") {
            AppendOutcome::Inserted => inserted += 1,
            AppendOutcome::AlreadyExists => already += 1,
        }
    }

    // Exactly one racer wins the insert; the rest observe the no-op
    assert_eq!(inserted, 1);
    assert_eq!(already, 7);

    let latest = store
        .latest(&LocationId::new("tokyo").unwrap())
        .await
        .expect("latest")
        .expect("row");
    assert!((latest.temperature.celsius() - 21.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn conflicting_value_never_replaces_the_first_write() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = open_store(&file_config(&dir));

    store
        .append(&observation("cairo", 0, 30.0), AppendMode::Idempotent)
        .await
        .expect("first append");

    let err = store
        .append(&observation("cairo", 0, 31.0), AppendMode::Idempotent)
        .await
        .expect_err("conflicting append must fail");
    assert!(matches!(
        err,
        application::error::ApplicationError::DuplicateKey(_)
    ));

    let latest = store
        .latest(&LocationId::new("cairo").unwrap())
        .await
        .expect("latest")
        .expect("row");
    assert!((latest.temperature.celsius() - 30.0).abs() < f64::EPSILON);
}
