use crate::{RunError, RunResult};
use jsonseed_storage::StoreConfig;
use std::num::NonZeroUsize;
use std::path::PathBuf;

pub const DEFAULT_MAX_BATCH_SIZE: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(size) => size,
    None => unreachable!(),
};

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub store: StoreConfig,
    pub payload: PathBuf,
    pub max_batch_size: NonZeroUsize,
    /// Extra cycles after the first.
    pub repeat: usize,
    /// Seeds `$randBetween`; `None` samples from the thread RNG.
    pub seed: Option<u64>,
}

impl RunConfig {
    #[must_use]
    pub fn new(store: StoreConfig, payload: impl Into<PathBuf>) -> Self {
        Self {
            store,
            payload: payload.into(),
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            repeat: 0,
            seed: None,
        }
    }

    /// Sets the batch size, rejecting zero.
    pub fn with_max_batch_size(mut self, size: usize) -> RunResult<Self> {
        self.max_batch_size = NonZeroUsize::new(size)
            .ok_or_else(|| RunError::Config("max batch size must be at least 1".to_string()))?;
        Ok(self)
    }

    #[must_use]
    pub fn with_repeat(mut self, repeat: usize) -> Self {
        self.repeat = repeat;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Total number of cycles a run performs.
    #[must_use]
    pub fn cycles(&self) -> usize {
        self.repeat.saturating_add(1)
    }
}
