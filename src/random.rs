//! Seeded random number generation.
//!
//! Every annealing run owns its own stream. Streams are derived from a
//! `u64` seed so that `base_seed + worker_index` gives each worker a
//! reproducible, independent sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Picks two distinct indices in `0..n`, returned as `(low, high)`.
///
/// # Panics
/// Panics if `n < 2`.
pub fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    assert!(n >= 2, "distinct_pair needs at least two positions, got {n}");
    let i = rng.random_range(0..n);
    // Draw from n-1 slots and skip over i.
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    if i < j {
        (i, j)
    } else {
        (j, i)
    }
}
