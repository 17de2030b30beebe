//! In-memory store that records every insert call.

use crate::document::prepare;
use crate::{DocumentStore, StorageError, StorageResult};
use jsonseed_types::SeedValue;
use tracing::debug;

/// One call made against a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum InsertCall {
    One(serde_json::Value),
    Many(Vec<serde_json::Value>),
}

impl InsertCall {
    /// Number of documents carried by the call.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(docs) => docs.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keeps inserted documents in memory, grouped by the call that sent them.
///
/// Used for dry runs (`memory://`) and as a test double. A store built
/// with [`failing_after`](Self::failing_after) accepts that many calls and
/// rejects every later one.
#[derive(Debug, Default)]
pub struct MemoryStore {
    calls: Vec<InsertCall>,
    fail_after: Option<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every call after the first `accepted` ones.
    #[must_use]
    pub fn failing_after(accepted: usize) -> Self {
        Self {
            calls: Vec::new(),
            fail_after: Some(accepted),
        }
    }

    /// Accepted calls, in order.
    #[must_use]
    pub fn calls(&self) -> &[InsertCall] {
        &self.calls
    }

    /// Every accepted document, flattened in insertion order.
    #[must_use]
    pub fn documents(&self) -> Vec<&serde_json::Value> {
        self.calls
            .iter()
            .flat_map(|call| match call {
                InsertCall::One(doc) => std::slice::from_ref(doc).iter(),
                InsertCall::Many(docs) => docs.iter(),
            })
            .collect()
    }

    fn check_accepting(&self) -> StorageResult<()> {
        match self.fail_after {
            Some(limit) if self.calls.len() >= limit => Err(StorageError::Rejected(format!(
                "memory store configured to accept {limit} call(s)"
            ))),
            _ => Ok(()),
        }
    }
}

impl DocumentStore for MemoryStore {
    fn insert_one(&mut self, document: &SeedValue) -> StorageResult<String> {
        self.check_accepting()?;
        let prepared = prepare(document)?;
        debug!(id = %prepared.id, "Recorded document");
        self.calls.push(InsertCall::One(prepared.body));
        Ok(prepared.id)
    }

    fn insert_many(&mut self, documents: &[SeedValue]) -> StorageResult<Vec<String>> {
        self.check_accepting()?;
        if documents.is_empty() {
            return Err(StorageError::InvalidDocument(
                "insert_many requires at least one document".to_string(),
            ));
        }
        let prepared = documents
            .iter()
            .map(prepare)
            .collect::<StorageResult<Vec<_>>>()?;

        debug!(count = prepared.len(), "Recorded batch");
        let (ids, bodies): (Vec<String>, Vec<serde_json::Value>) = prepared
            .into_iter()
            .map(|doc| (doc.id, doc.body))
            .unzip();
        self.calls.push(InsertCall::Many(bodies));
        Ok(ids)
    }
}
