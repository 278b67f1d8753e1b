/* ------------------------------------------------------------------ */
/* Seeded PRNG                                                        */
/* ------------------------------------------------------------------ */
//
// Thin wrapper so every random decision in a run (shuffling, seeding the
// generator, categorical draws) comes from one reproducible stream.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng as _, SeedableRng};
use rand_distr::weighted::WeightedIndex;
use rand_distr::Distribution;

use crate::error::{Error, Result};

pub struct Rng {
    inner: StdRng,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { inner: StdRng::seed_from_u64(seed) }
    }

    /// Uniform index in `0..n`. `n` must be non-zero.
    pub fn choice(&mut self, n: usize) -> usize {
        self.inner.random_range(0..n)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    /// One draw from the categorical distribution proportional to `weights`.
    /// Weights need not sum to one.
    pub fn categorical(&mut self, weights: &[f64]) -> Result<usize> {
        let dist = WeightedIndex::new(weights).map_err(|_| Error::DegenerateDistribution)?;
        Ok(dist.sample(&mut self.inner))
    }
}
