//! Document store collaborators for jsonseed.
//!
//! The runner only ever needs two operations from a store, captured by
//! [`DocumentStore`]: insert one document, and insert a batch. Two
//! implementations ship here:
//!
//! - [`CollectionStore`] keeps each collection as a DuckDB table of JSON
//!   documents, one table per collection inside a schema per database
//! - [`MemoryStore`] records every call in memory, for dry runs and tests
//!
//! [`connect`] picks one from a [`StoreConfig`].

mod collection;
mod connection;
mod document;
mod error;
mod memory;

pub use collection::CollectionStore;
pub use connection::{ConnectionTarget, StoreConfig, connect};
pub use error::{StorageError, StorageResult};
pub use memory::{InsertCall, MemoryStore};

use jsonseed_types::SeedValue;
use tracing::warn;

/// A collection that accepts documents.
///
/// Both operations either fail as a whole or report how much was written.
pub trait DocumentStore {
    /// Inserts a single document, returning its `_id`.
    fn insert_one(&mut self, document: &SeedValue) -> StorageResult<String>;

    /// Inserts a batch of documents in order, returning their `_id`s.
    fn insert_many(&mut self, documents: &[SeedValue]) -> StorageResult<Vec<String>>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for Box<S> {
    fn insert_one(&mut self, document: &SeedValue) -> StorageResult<String> {
        (**self).insert_one(document)
    }

    fn insert_many(&mut self, documents: &[SeedValue]) -> StorageResult<Vec<String>> {
        (**self).insert_many(documents)
    }
}

/// Open a DuckDB connection with stale WAL recovery.
///
/// If the initial open fails and a `.wal` file exists alongside the database,
/// it is removed and the open is retried once. This handles the common case
/// where an unclean shutdown leaves a WAL file that prevents reopening.
pub fn open_duckdb_with_wal_recovery(path: &std::path::Path) -> StorageResult<duckdb::Connection> {
    match duckdb::Connection::open(path) {
        Ok(conn) => Ok(conn),
        Err(first_err) => {
            let wal_path = path.with_extension(
                path.extension()
                    .map(|ext| format!("{}.wal", ext.to_string_lossy()))
                    .unwrap_or_else(|| "wal".to_string()),
            );
            if wal_path.exists() {
                warn!(path = %wal_path.display(), "DuckDB open failed, removing stale WAL and retrying");
                if std::fs::remove_file(&wal_path).is_ok() {
                    return duckdb::Connection::open(path).map_err(Into::into);
                }
            }
            Err(first_err.into())
        }
    }
}
