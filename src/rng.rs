//! RNG construction shared by all runners.
//!
//! Every solver draws randomness from an injected [`StdRng`] so seeded runs
//! replay deterministically in tests.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates the runner RNG: seeded when a seed is given, OS-seeded otherwise.
pub(crate) fn seeded(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
