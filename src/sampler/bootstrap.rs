//! Weighted bootstrap sampling
//!
//! Draws event indices from the table independently and identically, with
//! replacement, with probability proportional to each event's central
//! weight. Sampling with replacement is a correctness requirement, not an
//! option: without replacement successive draws become statistically
//! dependent and the Poisson-process interpretation of the replica ensemble
//! breaks down.
//!
//! Uniform selection (ignoring weights) is a supported degenerate mode for
//! callers that do not need per-event weight differentiation.

use crate::config::SamplingMode;
use crate::error::{ResampleError, Result};
use crate::table::{EventRecord, EventTable};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Draws with-replacement row indices from a weighted event table.
///
/// The weight-proportional lookup table is built once per replica, so the
/// per-draw cost is O(log n) regardless of how many events the replica
/// needs.
#[derive(Debug)]
pub struct BootstrapSampler<'a, R> {
    table: &'a EventTable,
    /// Built only in weighted mode on a non-empty table.
    weighted: Option<WeightedIndex<f64>>,
    rng: R,
}

impl<'a, R: Rng> BootstrapSampler<'a, R> {
    /// Create a sampler over `table` in the given mode.
    ///
    /// In weighted mode the weight vector is validated up front: a negative
    /// weight or an all-zero vector leaves the selection probabilities
    /// undefined and fails with [`ResampleError::NonPositiveWeight`].
    pub fn new(table: &'a EventTable, mode: SamplingMode, rng: R) -> Result<Self> {
        let weighted = match mode {
            SamplingMode::Weighted if !table.is_empty() => Some(build_weighted_index(table)?),
            _ => None,
        };

        Ok(Self {
            table,
            weighted,
            rng,
        })
    }

    /// Draw `n` row indices, i.i.d. with replacement.
    ///
    /// `n = 0` yields an empty draw. A nonzero `n` against an empty table
    /// fails with [`ResampleError::EmptyTable`].
    pub fn draw_indices(&mut self, n: u64) -> Result<Vec<usize>> {
        if n == 0 {
            return Ok(Vec::new());
        }
        if self.table.is_empty() {
            return Err(ResampleError::EmptyTable);
        }

        let n = n as usize;
        let mut indices = Vec::with_capacity(n);
        match &self.weighted {
            Some(dist) => {
                for _ in 0..n {
                    indices.push(dist.sample(&mut self.rng));
                }
            }
            None => {
                let len = self.table.len();
                for _ in 0..n {
                    indices.push(self.rng.gen_range(0..len));
                }
            }
        }
        Ok(indices)
    }

    /// Draw `n` event rows, cloning each selected record.
    ///
    /// Duplicates are expected and must be kept; repeated selection of the
    /// same underlying event is the defining property of a bootstrap
    /// replica.
    pub fn draw_rows(&mut self, n: u64) -> Result<Vec<EventRecord>> {
        let indices = self.draw_indices(n)?;
        Ok(indices
            .into_iter()
            .map(|i| self.table.event(i).clone())
            .collect())
    }
}

/// Validate the weight vector and build the weighted lookup table.
fn build_weighted_index(table: &EventTable) -> Result<WeightedIndex<f64>> {
    let mut sum = 0.0;
    for (row, weight) in table.weights().enumerate() {
        if !weight.is_finite() {
            return Err(ResampleError::NonPositiveWeight {
                detail: format!("event weight at row {row} is not finite ({weight})"),
            });
        }
        if weight < 0.0 {
            return Err(ResampleError::NonPositiveWeight {
                detail: format!("event weight at row {row} is negative ({weight})"),
            });
        }
        sum += weight;
    }
    if sum <= 0.0 {
        return Err(ResampleError::NonPositiveWeight {
            detail: "all event weights are zero".to_string(),
        });
    }

    WeightedIndex::new(table.weights()).map_err(|e| ResampleError::NonPositiveWeight {
        detail: e.to_string(),
    })
}
