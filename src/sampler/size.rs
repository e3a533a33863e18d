//! Replica size sampling
//!
//! The number of events in a replica is itself a random draw from
//! Poisson(mu), where mu is the externally supplied expected yield. Drawing
//! the size rather than fixing it to the original sample size is what makes
//! the ensemble of replicas a valid bootstrap for the yield uncertainty: it
//! captures the shot-noise fluctuation in the event count on top of the
//! shape fluctuation from the weighted draws.

use crate::error::{ResampleError, Result};
use rand::Rng;
use rand_distr::{Distribution, Poisson};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Draws replica sizes from Poisson(mu).
///
/// `mu = 0` is legal and degenerates to size 0 with probability one; a
/// size-0 replica produces zero chunks downstream, not an error.
pub struct SizeSampler<R> {
    mu: f64,
    /// None when mu is exactly zero, which `rand_distr` rejects as a
    /// Poisson parameter.
    poisson: Option<Poisson<f64>>,
    rng: R,
}

impl<R: Rng> SizeSampler<R> {
    /// Create a sampler drawing from the supplied generator.
    ///
    /// Fails with [`ResampleError::SizeDraw`] if `mu` is negative, NaN, or
    /// infinite.
    pub fn with_rng(mu: f64, rng: R) -> Result<Self> {
        if !mu.is_finite() || mu < 0.0 {
            return Err(ResampleError::SizeDraw {
                mu,
                message: "expected yield must be finite and non-negative".to_string(),
            });
        }

        let poisson = if mu == 0.0 {
            None
        } else {
            Some(
                Poisson::new(mu).map_err(|e| ResampleError::SizeDraw {
                    mu,
                    message: e.to_string(),
                })?,
            )
        };

        Ok(Self { mu, poisson, rng })
    }

    /// The expected yield this sampler draws around.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Draw one replica size.
    pub fn draw(&mut self) -> u64 {
        match &self.poisson {
            Some(poisson) => poisson.sample(&mut self.rng) as u64,
            None => 0,
        }
    }

    /// Draw `count` independent replica sizes.
    pub fn draw_many(&mut self, count: usize) -> Vec<u64> {
        (0..count).map(|_| self.draw()).collect()
    }
}

impl SizeSampler<Xoshiro256PlusPlus> {
    /// Create an entropy-seeded sampler.
    pub fn new(mu: f64) -> Result<Self> {
        use rand::SeedableRng;
        Self::with_rng(mu, Xoshiro256PlusPlus::from_entropy())
    }
}
