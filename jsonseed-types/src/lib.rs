//! Core type definitions for jsonseed.
//!
//! This crate defines the shared types used by the template
//! engine, the storage layer and the runner:
//! - [`SeedValue`], the ordered JSON-like tree that templates expand into
//! - [`Timestamp`], a naive wall-clock instant tagged with the clock it came from
//! - [`DocumentId`], the UUID v7 identifier assigned to stored documents
//!
//! Nothing here performs I/O.

mod ids;
mod timestamp;
mod value;

pub use ids::DocumentId;
pub use timestamp::{Clock, Timestamp};
pub use value::{Object, SeedValue};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
