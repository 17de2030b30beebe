//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from DuckDB.
    #[error("database error: {0}")]
    Database(#[from] duckdb::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Connection string names a backend this build cannot reach.
    #[error("unsupported connection scheme: {0}")]
    UnsupportedScheme(String),

    /// Database or collection name is not a plain identifier.
    #[error("invalid {kind} name: {name:?}")]
    InvalidName { kind: &'static str, name: String },

    /// Document rejected before reaching the database.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// Insert refused by the store.
    #[error("insert rejected: {0}")]
    Rejected(String),
}
