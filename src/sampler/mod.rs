//! Random samplers for replica generation
//!
//! Two draws define a replica: how many events it contains (a Poisson draw
//! around the expected yield, [`size::SizeSampler`]) and which events those
//! are (with-replacement index draws, [`bootstrap::BootstrapSampler`]).
//!
//! # Randomness
//!
//! There is no ambient RNG state anywhere in the pipeline. Every sampler
//! takes an explicit generator handle, and each replica-processing unit gets
//! its own stream via [`replica_rng`]: with a fixed base seed, replica `r`
//! uses the `r`-th `long_jump` block of a `Xoshiro256PlusPlus` sequence, so
//! parallel batch invocations sharing one seed draw from provably
//! non-overlapping subsequences. Without a seed, each invocation is
//! entropy-seeded and re-runs produce statistically distinct replicas.

pub mod bootstrap;
pub mod size;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Build the RNG stream for one replica-processing unit.
///
/// With `seed` fixed, the same `(seed, replica_index)` pair always yields
/// the same stream, making a re-run of one replica index idempotent. Each
/// `long_jump` advances 2^192 steps, so streams for distinct indices never
/// overlap in practice.
pub fn replica_rng(seed: Option<u64>, replica_index: u64) -> Xoshiro256PlusPlus {
    match seed {
        Some(seed) => {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
            for _ in 0..replica_index {
                rng.long_jump();
            }
            rng
        }
        None => Xoshiro256PlusPlus::from_entropy(),
    }
}
