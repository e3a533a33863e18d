//! Replica generation pipeline
//!
//! Drives size draw, bootstrap sampling, and chunk publication for one or
//! many replicas. Per replica the pipeline is strictly sequential: draw the
//! size, draw that many rows, chunk and publish. Across replicas nothing is
//! shared except the read-only event table, so the intended production
//! layout is one independent batch job per replica index
//! ([`Orchestrator::run_single`]); the in-process loop
//! ([`Orchestrator::run_ensemble`]) exists for small runs and keeps each
//! replica's failure domain isolated by logging and skipping.
//!
//! Replica `r` draws from RNG stream `r` (see [`crate::sampler::replica_rng`]);
//! the ensemble's up-front size draws use stream `R`, past every replica
//! stream, so the two modes never correlate replicas with each other.

use crate::chunk::manifest::ReplicaManifest;
use crate::chunk::writer::ChunkWriter;
use crate::config::SamplingMode;
use crate::error::{ResampleError, Result};
use crate::sampler::bootstrap::BootstrapSampler;
use crate::sampler::replica_rng;
use crate::sampler::size::SizeSampler;
use crate::table::EventTable;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::path::Path;

/// Summary of one published replica.
#[derive(Debug, Clone)]
pub struct ReplicaReport {
    pub replica_index: u64,
    pub n_events: u64,
    pub n_chunks: usize,
}

/// Drives the resampling pipeline over a frozen event table.
pub struct Orchestrator<'a> {
    table: &'a EventTable,
    mu: f64,
    mode: SamplingMode,
    chunk_capacity: usize,
    seed: Option<u64>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        table: &'a EventTable,
        mu: f64,
        mode: SamplingMode,
        chunk_capacity: usize,
        seed: Option<u64>,
    ) -> Self {
        Self {
            table,
            mu,
            mode,
            chunk_capacity,
            seed,
        }
    }

    /// Generate one replica with an externally supplied index, publishing
    /// its chunks directly under `dest`.
    ///
    /// This is the batch-job entry point: a scheduler invokes the binary
    /// once per replica index, and with a fixed seed a re-run of the same
    /// index reproduces the same replica.
    pub fn run_single(&self, replica_index: u64, dest: &Path) -> Result<ReplicaReport> {
        let mut rng = replica_rng(self.seed, replica_index);
        let target_size = SizeSampler::with_rng(self.mu, &mut rng)?.draw();
        self.generate_replica(replica_index, target_size, &mut rng, dest)
    }

    /// Generate `replicas` replicas in-process, each under
    /// `<dest_root>/replica_<r>/`.
    ///
    /// All sizes are drawn up front, then each replica runs its own
    /// sampling and chunking. A failed replica is reported on stderr and
    /// skipped; if any failed, the run ends with
    /// [`ResampleError::Ensemble`] after the survivors are published.
    pub fn run_ensemble(&self, replicas: usize, dest_root: &Path) -> Result<Vec<ReplicaReport>> {
        let size_rng = replica_rng(self.seed, replicas as u64);
        let sizes = SizeSampler::with_rng(self.mu, size_rng)?.draw_many(replicas);

        let mut reports = Vec::with_capacity(replicas);
        let mut failed = 0;
        for (index, &target_size) in sizes.iter().enumerate() {
            let dest = dest_root.join(format!("replica_{index}"));
            let mut rng = replica_rng(self.seed, index as u64);
            match self.generate_replica(index as u64, target_size, &mut rng, &dest) {
                Ok(report) => reports.push(report),
                Err(err) => {
                    eprintln!("replica {index}: {} failed: {err}", err.step());
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            return Err(ResampleError::Ensemble {
                failed,
                total: replicas,
            });
        }
        Ok(reports)
    }

    /// One replica's Sampling -> Chunking -> Published sequence.
    fn generate_replica(
        &self,
        replica_index: u64,
        target_size: u64,
        rng: &mut Xoshiro256PlusPlus,
        dest: &Path,
    ) -> Result<ReplicaReport> {
        let rows =
            BootstrapSampler::new(self.table, self.mode, rng)?.draw_rows(target_size)?;

        let writer = ChunkWriter::new(dest, self.chunk_capacity);
        let chunk_paths =
            writer.write_replica(self.table.columns(), &rows, self.table.sum_genw_presel())?;

        let manifest = ReplicaManifest::new(
            replica_index,
            self.seed,
            rows.len() as u64,
            self.chunk_capacity,
            &chunk_paths,
        );
        manifest.write(dest)?;

        Ok(ReplicaReport {
            replica_index,
            n_events: rows.len() as u64,
            n_chunks: chunk_paths.len(),
        })
    }
}
