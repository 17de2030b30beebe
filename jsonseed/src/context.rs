//! Resources shared by every cycle of a run.

use crate::{RunConfig, RunResult};
use jsonseed_storage::{DocumentStore, connect};
use jsonseed_template::{Entropy, SeededEntropy, SystemEntropy, TemplateSource};
use jsonseed_types::SeedValue;
use tracing::debug;

/// The connected store, the loaded template and the entropy source.
///
/// Built once per run and handed to [`run`](crate::run); nothing is cached
/// outside it.
pub struct RunContext<S = Box<dyn DocumentStore>> {
    store: S,
    source: TemplateSource,
    entropy: Box<dyn Entropy>,
}

impl RunContext {
    /// Loads the payload template, then connects to the store.
    ///
    /// The template is read first so a bad payload path never creates a
    /// database file.
    pub fn open(config: &RunConfig) -> RunResult<Self> {
        let source = TemplateSource::load(&config.payload)?;
        let store = connect(&config.store)?;
        let entropy: Box<dyn Entropy> = match config.seed {
            Some(seed) => {
                debug!(seed, "Using seeded entropy");
                Box::new(SeededEntropy::new(seed))
            }
            None => Box::new(SystemEntropy),
        };
        Ok(Self::new(store, source, entropy))
    }
}

impl<S: DocumentStore> RunContext<S> {
    pub fn new(store: S, source: TemplateSource, entropy: Box<dyn Entropy>) -> Self {
        Self {
            store,
            source,
            entropy,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// A freshly expanded payload.
    pub fn next_payload(&mut self) -> RunResult<SeedValue> {
        Ok(self.source.get_payload(self.entropy.as_mut())?)
    }
}
