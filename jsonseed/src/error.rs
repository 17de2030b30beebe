//! Error types for a seeding run.

use jsonseed_storage::StorageError;
use jsonseed_template::TemplateError;
use thiserror::Error;

/// Result type for run operations.
pub type RunResult<T> = Result<T, RunError>;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Invalid run settings.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Expanded payload is neither an object nor an array.
    #[error("payload must be an object or an array of objects, got {0}")]
    PayloadShape(&'static str),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
