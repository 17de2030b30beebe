//! jsonseed command line.
//!
//! Usage:
//!   jsonseed --connection-string duckdb://seed.duckdb --database shop \
//!       --collection orders --payload orders.json --repeat 9
//!
//! Use `--connection-string memory://` for a dry run that expands and
//! chunks the payload without persisting anything.

use anyhow::{Context, Result};
use clap::Parser;
use jsonseed::{RunConfig, execute};
use jsonseed_storage::StoreConfig;
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "jsonseed")]
#[command(about = "Expand a JSON payload template and insert it into a document store")]
struct Args {
    /// Store to write to: `duckdb://<path>`, a file path, `:memory:` or `memory://`
    #[arg(long)]
    connection_string: String,

    /// Database (DuckDB schema) name
    #[arg(long)]
    database: String,

    /// Collection (table) name
    #[arg(long)]
    collection: String,

    /// Path to the JSON payload template
    #[arg(long)]
    payload: PathBuf,

    /// Largest number of documents per insert
    #[arg(long, default_value = "100")]
    max_batch_size: usize,

    /// Extra cycles after the first
    #[arg(long, default_value = "0")]
    repeat: usize,

    /// Seed for reproducible `$randBetween` values
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> Result<RunConfig> {
        let store = StoreConfig {
            connection_string: self.connection_string,
            database: self.database,
            collection: self.collection,
        };
        Ok(RunConfig::new(store, self.payload)
            .with_max_batch_size(self.max_batch_size)?
            .with_repeat(self.repeat)
            .with_seed(self.seed))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let config = args.into_config()?;
    let report = execute(&config).with_context(|| {
        format!(
            "failed to seed {}.{} from {}",
            config.store.database,
            config.store.collection,
            config.payload.display()
        )
    })?;

    info!(
        cycles = report.cycles,
        chunks = report.chunks,
        documents = report.documents,
        "Seeding finished"
    );
    Ok(())
}
