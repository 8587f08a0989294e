//! Error types for the data layer.
//!
//! All errors are propagated via [`DbError`] which wraps the underlying
//! [`sqlx`] errors with additional context about which operation failed.

use conway_types::BoardId;

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored grid could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored row violates an invariant the schema cannot express.
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    /// The board was written by someone else between load and update.
    #[error("board {id} is no longer at generation {expected}")]
    Conflict {
        /// The contested board.
        id: BoardId,
        /// Generation the update was based on.
        expected: u64,
    },

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
