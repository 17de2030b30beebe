//! Sources of randomness and wall-clock time for token resolution.

use jsonseed_types::Timestamp;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies the nondeterministic inputs of expansion.
///
/// `rand_between` is only called with `min <= max`.
pub trait Entropy {
    fn rand_between(&mut self, min: i64, max: i64) -> i64;
    fn now(&mut self) -> Timestamp;
    fn utc_now(&mut self) -> Timestamp;
}

/// Thread-local RNG and the system clocks.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEntropy;

impl Entropy for SystemEntropy {
    fn rand_between(&mut self, min: i64, max: i64) -> i64 {
        rand::thread_rng().gen_range(min..=max)
    }

    fn now(&mut self) -> Timestamp {
        Timestamp::now()
    }

    fn utc_now(&mut self) -> Timestamp {
        Timestamp::utc_now()
    }
}

/// Seeded RNG, with optionally pinned clocks.
///
/// Two instances built from the same seed produce the same sequence of
/// `$randBetween` values.
#[derive(Debug, Clone)]
pub struct SeededEntropy {
    rng: StdRng,
    clocks: Option<(Timestamp, Timestamp)>,
}

impl SeededEntropy {
    /// Seeded RNG, system clocks.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            clocks: None,
        }
    }

    /// Seeded RNG; `$now` always returns `local` and `$utcNow` always `utc`.
    #[must_use]
    pub fn with_fixed_clocks(seed: u64, local: Timestamp, utc: Timestamp) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            clocks: Some((local, utc)),
        }
    }
}

impl Entropy for SeededEntropy {
    fn rand_between(&mut self, min: i64, max: i64) -> i64 {
        self.rng.gen_range(min..=max)
    }

    fn now(&mut self) -> Timestamp {
        match self.clocks {
            Some((local, _)) => local,
            None => Timestamp::now(),
        }
    }

    fn utc_now(&mut self) -> Timestamp {
        match self.clocks {
            Some((_, utc)) => utc,
            None => Timestamp::utc_now(),
        }
    }
}
