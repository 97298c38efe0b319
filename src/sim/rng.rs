//! Injectable random source for lane generation

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform integer source used for cosmetic lanes and burst draws
pub trait LaneRng {
    /// Uniform value in `[low, high)`; `high` must exceed `low`
    fn next(&mut self, low: u32, high: u32) -> u32;
}

/// PCG-backed RNG that remembers its seed for replay/logging
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u64,
    rng: Pcg32,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl LaneRng for SeededRng {
    fn next(&mut self, low: u32, high: u32) -> u32 {
        self.rng.random_range(low..high)
    }
}

/// Replays a fixed script of values, cycling when exhausted.
///
/// Each value is folded into the requested range, so a script of `[0]`
/// always yields `low`.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<u32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        let mut values = values.into();
        if values.is_empty() {
            values.push(0);
        }
        Self { values, cursor: 0 }
    }

    /// Always yield the same value
    pub fn constant(value: u32) -> Self {
        Self::new(vec![value])
    }
}

impl LaneRng for ScriptedRng {
    fn next(&mut self, low: u32, high: u32) -> u32 {
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        low + value % (high - low).max(1)
    }
}
