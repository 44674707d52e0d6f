//! Seedable random source shared by every stochastic component.
//!
//! All randomness in a run (shuffles, strategy choice, operator choice,
//! crossover points) flows through one [`StdRng`], so a fixed seed makes a
//! whole optimization reproducible.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates an RNG from `seed`, or from OS entropy when `None`.
pub fn rng_from_option(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => create_rng(s),
        None => create_rng(rand::random()),
    }
}
