//! Injectable choice source for the wildcard interaction.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform index choice over a wildcard pool.
///
/// The engine is deterministic everywhere except the wildcard
/// interaction's pool pick. Injecting the choice source keeps whole runs
/// replayable under test while preserving random selection in production.
pub trait WildcardChoice {
    /// Pick an index in `0..pool_len`. Never called with `pool_len == 0`.
    fn pick(&mut self, pool_len: usize) -> usize;
}

/// Production choice source backed by a seedable RNG.
#[derive(Debug)]
pub struct RngChoice(StdRng);

impl RngChoice {
    /// Replayable source: the same seed yields the same pick sequence.
    pub fn from_seed(seed: u64) -> RngChoice {
        RngChoice(StdRng::seed_from_u64(seed))
    }

    /// OS-entropy source for non-replayable runs.
    pub fn from_entropy() -> RngChoice {
        RngChoice(StdRng::from_entropy())
    }
}

impl WildcardChoice for RngChoice {
    fn pick(&mut self, pool_len: usize) -> usize {
        self.0.gen_range(0..pool_len)
    }
}
