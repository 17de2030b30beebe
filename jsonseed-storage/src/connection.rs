//! Connection strings and store selection.

use crate::collection::validate_identifier;
use crate::{CollectionStore, DocumentStore, MemoryStore, StorageError, StorageResult};
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// Where and what to insert into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub connection_string: String,
    pub database: String,
    pub collection: String,
}

/// The backend a connection string points at.
///
/// | connection string | target |
/// |-------------------|--------|
/// | `duckdb://path/to/file.db`, `path/to/file.db` | DuckDB file |
/// | `duckdb://:memory:`, `:memory:` | in-memory DuckDB |
/// | `memory://` | [`MemoryStore`] (dry run) |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    DuckDbFile(PathBuf),
    DuckDbMemory,
    Recorder,
}

impl ConnectionTarget {
    pub fn parse(connection_string: &str) -> StorageResult<Self> {
        let raw = connection_string.trim();
        if raw.is_empty() {
            return Err(StorageError::UnsupportedScheme(
                "empty connection string".to_string(),
            ));
        }

        let Some((scheme, rest)) = raw.split_once("://") else {
            return Ok(Self::duckdb(raw));
        };
        match scheme.to_ascii_lowercase().as_str() {
            "duckdb" if rest.is_empty() => Err(StorageError::UnsupportedScheme(
                "duckdb:// needs a path or :memory:".to_string(),
            )),
            "duckdb" => Ok(Self::duckdb(rest)),
            "memory" => Ok(Self::Recorder),
            other => Err(StorageError::UnsupportedScheme(other.to_string())),
        }
    }

    fn duckdb(location: &str) -> Self {
        if location == ":memory:" {
            Self::DuckDbMemory
        } else {
            Self::DuckDbFile(PathBuf::from(location))
        }
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuckDbFile(path) => write!(f, "duckdb file {}", path.display()),
            Self::DuckDbMemory => write!(f, "in-memory duckdb"),
            Self::Recorder => write!(f, "in-memory recorder"),
        }
    }
}

/// Opens the collection named by `config`.
pub fn connect(config: &StoreConfig) -> StorageResult<Box<dyn DocumentStore>> {
    let target = ConnectionTarget::parse(&config.connection_string)?;
    validate_identifier("database", &config.database)?;
    validate_identifier("collection", &config.collection)?;

    info!(
        target = %target,
        database = %config.database,
        collection = %config.collection,
        "Connecting to document store"
    );
    let store: Box<dyn DocumentStore> = match target {
        ConnectionTarget::DuckDbFile(path) => {
            Box::new(CollectionStore::open(&path, &config.database, &config.collection)?)
        }
        ConnectionTarget::DuckDbMemory => Box::new(CollectionStore::open_in_memory(
            &config.database,
            &config.collection,
        )?),
        ConnectionTarget::Recorder => Box::new(MemoryStore::new()),
    };
    Ok(store)
}
