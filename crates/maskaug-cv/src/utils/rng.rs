//! Reproducible random number generation

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generator seeded from `seed`, or from OS entropy when no seed is configured
pub fn master_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// One sub-seed per sample, drawn up front so the processing order cannot change results
pub fn sample_seeds<R: Rng + ?Sized>(master: &mut R, count: usize) -> Vec<u64> {
    (0..count).map(|_| master.gen_range(0..=u64::MAX)).collect()
}

pub fn sample_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
