//! Seeds a document store from a JSON payload template.
//!
//! A run loads the payload once, then for each cycle expands its tokens
//! afresh and sends the result to the store: an object as a single insert,
//! an array in chunks of at most `max_batch_size` documents.
//!
//! ```no_run
//! use jsonseed::{RunConfig, execute};
//! use jsonseed_storage::StoreConfig;
//!
//! let store = StoreConfig {
//!     connection_string: "duckdb://seed.duckdb".to_string(),
//!     database: "shop".to_string(),
//!     collection: "orders".to_string(),
//! };
//! let config = RunConfig::new(store, "orders.json").with_repeat(9);
//! let report = execute(&config)?;
//! println!("{} documents", report.documents);
//! # Ok::<(), jsonseed::RunError>(())
//! ```

mod config;
mod context;
mod dispatch;
mod error;
mod run;

pub use config::{DEFAULT_MAX_BATCH_SIZE, RunConfig};
pub use context::RunContext;
pub use dispatch::{DispatchSummary, dispatch};
pub use error::{RunError, RunResult};
pub use run::{RunReport, execute, run};
