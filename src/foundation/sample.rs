use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Explicit random source for sample-data generation.
///
/// Every generator that needs randomness receives one of these instead of reaching for a global
/// RNG, so a fixed seed always reproduces the same inputs.
#[derive(Clone, Debug)]
pub struct SampleSource {
    seed: u64,
    rng: StdRng,
}

impl SampleSource {
    /// Create a source seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed this source was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `lo..=hi`.
    pub fn int_in(&mut self, lo: i64, hi: i64) -> i64 {
        if lo >= hi {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    /// `len` uniform integers in `lo..=hi`.
    pub fn ints(&mut self, len: usize, lo: i64, hi: i64) -> Vec<i64> {
        (0..len).map(|_| self.int_in(lo, hi)).collect()
    }

    /// `len` uniform integers in `lo..=hi`, sorted ascending.
    pub fn sorted_ints(&mut self, len: usize, lo: i64, hi: i64) -> Vec<i64> {
        let mut v = self.ints(len, lo, hi);
        v.sort_unstable();
        v
    }

    /// Pick one element, or `None` for an empty slice.
    pub fn choose<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        items.choose(&mut self.rng).copied()
    }

    /// Shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/sample.rs"]
mod tests;
