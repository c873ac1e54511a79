//! Deterministic random number generation.
//!
//! Every draw the engine makes (factors, distractors, shuffles, the
//! variant of each bank slot) goes through `DrillRng`, so a seed fully
//! determines a drill. Real play seeds from entropy.
//!
//! ```
//! use times_table_drill::core::DrillRng;
//!
//! let mut a = DrillRng::new(7);
//! let mut b = DrillRng::new(7);
//! assert_eq!(a.gen_inclusive(1, 9), b.gen_inclusive(1, 9));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable RNG with forking for independent per-player streams.
#[derive(Clone, Debug)]
pub struct DrillRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl DrillRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this stream started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive a child stream. The n-th fork of a given seed is always the
    /// same stream, and differs from the parent and its siblings.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(fork_seed)
    }

    /// Uniform integer in the closed range `[lo, hi]`.
    pub fn gen_inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        debug_assert!(lo <= hi, "empty range {lo}..={hi}");
        self.inner.gen_range(lo..=hi)
    }

    /// Uniform index in `[0, len)`.
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Shuffle in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Sample `amount` distinct elements without replacement.
    ///
    /// Returns fewer than `amount` only when the slice is shorter.
    pub fn sample_distinct<T: Clone>(&mut self, slice: &[T], amount: usize) -> Vec<T> {
        slice
            .choose_multiple(&mut self.inner, amount)
            .cloned()
            .collect()
    }
}
