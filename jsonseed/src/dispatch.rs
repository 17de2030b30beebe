use crate::{RunError, RunResult};
use jsonseed_storage::DocumentStore;
use jsonseed_types::SeedValue;
use std::num::NonZeroUsize;
use tracing::debug;

/// What one dispatch sent to the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Store calls made.
    pub chunks: usize,
    pub documents: usize,
}

impl std::ops::AddAssign for DispatchSummary {
    fn add_assign(&mut self, other: Self) {
        self.chunks += other.chunks;
        self.documents += other.documents;
    }
}

/// Sends an expanded payload to the store.
///
/// An array goes out as consecutive chunks of at most `max_batch_size`
/// documents, one `insert_many` each, in order; an empty array sends
/// nothing. An object goes out as one `insert_one`. The first failing call
/// stops the dispatch.
pub fn dispatch<S: DocumentStore + ?Sized>(
    store: &mut S,
    payload: &SeedValue,
    max_batch_size: NonZeroUsize,
) -> RunResult<DispatchSummary> {
    match payload {
        SeedValue::Array(documents) => {
            let mut summary = DispatchSummary::default();
            for (index, chunk) in documents.chunks(max_batch_size.get()).enumerate() {
                debug!(chunk = index, size = chunk.len(), "Inserting chunk");
                store.insert_many(chunk)?;
                summary += DispatchSummary {
                    chunks: 1,
                    documents: chunk.len(),
                };
            }
            Ok(summary)
        }
        SeedValue::Object(_) => {
            let id = store.insert_one(payload)?;
            debug!(id = %id, "Inserted document");
            Ok(DispatchSummary {
                chunks: 1,
                documents: 1,
            })
        }
        other => Err(RunError::PayloadShape(other.kind())),
    }
}
