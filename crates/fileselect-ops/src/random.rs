//! Random providers backed by `rand`.

use fileselect_core::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws from the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_int(&mut self, max: usize) -> usize {
        rand::thread_rng().gen_range(0..max)
    }
}

/// Reproducible generator for a fixed seed.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Create a generator from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_int(&mut self, max: usize) -> usize {
        self.rng.gen_range(0..max)
    }
}
