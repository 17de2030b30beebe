//! DuckDB-backed document collections.
//!
//! A database maps to a DuckDB schema and a collection to a table inside it:
//!
//! ```sql
//! CREATE TABLE "<database>"."<collection>" (
//!     _id         VARCHAR PRIMARY KEY,
//!     body        VARCHAR NOT NULL,   -- the document as JSON text
//!     inserted_at TIMESTAMP DEFAULT current_timestamp
//! );
//! ```
//!
//! Both are created on open if missing.

use crate::document::{PreparedDocument, prepare};
use crate::{DocumentStore, StorageError, StorageResult, open_duckdb_with_wal_recovery};
use duckdb::{Connection, params};
use jsonseed_types::SeedValue;
use std::path::Path;
use tracing::debug;

/// One collection in a DuckDB database.
pub struct CollectionStore {
    conn: Connection,
    database: String,
    collection: String,
    table: String,
}

impl CollectionStore {
    /// Opens (or creates) a collection in the DuckDB file at `path`.
    pub fn open(path: &Path, database: &str, collection: &str) -> StorageResult<Self> {
        let conn = open_duckdb_with_wal_recovery(path)?;
        Self::with_conn(conn, database, collection)
    }

    /// Opens a collection in a fresh in-memory database.
    pub fn open_in_memory(database: &str, collection: &str) -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_conn(conn, database, collection)
    }

    /// Opens a collection on an existing connection.
    pub fn with_conn(conn: Connection, database: &str, collection: &str) -> StorageResult<Self> {
        validate_identifier("database", database)?;
        validate_identifier("collection", collection)?;

        let store = Self {
            conn,
            database: database.to_string(),
            collection: collection.to_string(),
            table: format!("\"{database}\".\"{collection}\""),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StorageResult<()> {
        self.conn.execute_batch(&format!(
            "
            CREATE SCHEMA IF NOT EXISTS \"{database}\";

            CREATE TABLE IF NOT EXISTS {table} (
                _id VARCHAR PRIMARY KEY,
                body VARCHAR NOT NULL,
                inserted_at TIMESTAMP DEFAULT current_timestamp
            );
            ",
            database = self.database,
            table = self.table,
        ))?;
        Ok(())
    }

    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Number of documents in the collection.
    pub fn count(&self) -> StorageResult<usize> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", self.table),
            params![],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// All documents, in insertion order.
    pub fn documents(&self) -> StorageResult<Vec<serde_json::Value>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT body FROM {} ORDER BY rowid", self.table))?;
        let bodies = stmt.query_map(params![], |row| row.get::<_, String>(0))?;

        let mut documents = Vec::new();
        for body in bodies {
            documents.push(serde_json::from_str(&body?)?);
        }
        Ok(documents)
    }

    /// Looks up one document by `_id`.
    pub fn find_by_id(&self, id: &str) -> StorageResult<Option<serde_json::Value>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT body FROM {} WHERE _id = ?", self.table))?;
        let mut rows = stmt.query_map(params![id], |row| row.get::<_, String>(0))?;
        match rows.next() {
            Some(body) => Ok(Some(serde_json::from_str(&body?)?)),
            None => Ok(None),
        }
    }

    fn insert_sql(&self) -> String {
        format!("INSERT INTO {} (_id, body) VALUES (?, ?)", self.table)
    }
}

impl DocumentStore for CollectionStore {
    fn insert_one(&mut self, document: &SeedValue) -> StorageResult<String> {
        let PreparedDocument { id, body } = prepare(document)?;
        self.conn
            .execute(&self.insert_sql(), params![id, body.to_string()])?;
        debug!(collection = %self.collection, id = %id, "Document inserted");
        Ok(id)
    }

    fn insert_many(&mut self, documents: &[SeedValue]) -> StorageResult<Vec<String>> {
        if documents.is_empty() {
            return Err(StorageError::InvalidDocument(
                "insert_many requires at least one document".to_string(),
            ));
        }
        let prepared = documents
            .iter()
            .map(prepare)
            .collect::<StorageResult<Vec<_>>>()?;

        let sql = self.insert_sql();
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&sql)?;
            for doc in &prepared {
                stmt.execute(params![doc.id, doc.body.to_string()])?;
            }
        }
        tx.commit()?;

        debug!(collection = %self.collection, count = prepared.len(), "Batch inserted");
        Ok(prepared.into_iter().map(|doc| doc.id).collect())
    }
}

pub(crate) fn validate_identifier(kind: &'static str, name: &str) -> StorageResult<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidName {
            kind,
            name: name.to_string(),
        })
    }
}
