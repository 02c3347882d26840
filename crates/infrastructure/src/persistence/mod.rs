//! Persistence layer
//!
//! SQLite-backed durable record of weather observations.

pub mod connection;
pub mod migrations;
pub mod observation_store;

pub use connection::{ConnectionPool, DatabaseError, PooledConn, create_pool};
pub use observation_store::SqliteObservationStore;
