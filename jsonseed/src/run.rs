//! The run loop.

use crate::{DispatchSummary, RunConfig, RunContext, RunResult, dispatch};
use jsonseed_storage::DocumentStore;
use std::num::NonZeroUsize;
use tracing::info;

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub cycles: usize,
    pub chunks: usize,
    pub documents: usize,
}

/// Runs one expand-and-dispatch cycle, then `repeat` more.
///
/// Every cycle expands the template again. Any error aborts the remaining
/// chunks and cycles; documents already inserted stay inserted.
pub fn run<S: DocumentStore>(
    context: &mut RunContext<S>,
    max_batch_size: NonZeroUsize,
    repeat: usize,
) -> RunResult<RunReport> {
    let mut report = RunReport::default();
    for cycle in 0..=repeat {
        let payload = context.next_payload()?;
        let DispatchSummary { chunks, documents } =
            dispatch(context.store_mut(), &payload, max_batch_size)?;

        info!(cycle = cycle + 1, chunks, documents, "Cycle complete");
        report.cycles += 1;
        report.chunks += chunks;
        report.documents += documents;
    }
    Ok(report)
}

/// Opens a [`RunContext`] from `config` and runs it.
pub fn execute(config: &RunConfig) -> RunResult<RunReport> {
    let mut context = RunContext::open(config)?;
    info!(
        payload = %context.source().path().display(),
        cycles = config.cycles(),
        max_batch_size = config.max_batch_size.get(),
        "Starting run"
    );
    run(&mut context, config.max_batch_size, config.repeat)
}
