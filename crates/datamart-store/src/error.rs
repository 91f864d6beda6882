//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur during store operations.
///
/// These are infrastructure faults, distinct from the domain errors the
/// registry and ledger report (not-found, unauthorized, and so on).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A lock guarding shared state was poisoned by a panicking thread.
    #[error("lock poisoned: {0}")]
    Poisoned(String),

    /// A blocking task could not be joined.
    #[error("blocking task failed: {0}")]
    Runtime(String),

    /// The id counter would overflow. Practically unreachable with u64 ids.
    #[error("data id space exhausted")]
    IdExhausted,

    /// Invalid data in storage.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
