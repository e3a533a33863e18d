//! Error types for replica generation.
//!
//! Every failure the pipeline can hit maps to a distinct variant so that an
//! orchestrating layer running many replicas in parallel can log and skip a
//! failed replica without aborting its siblings. Each variant carries the
//! offending path, field, or row index needed to diagnose the input.
//!
//! # Error Categories
//!
//! | Error Type | Step | Description |
//! |------------|------|-------------|
//! | `Config` | configuration | CLI/TOML parameters invalid |
//! | `PartitionRead` | table load | Partition file unreadable or not valid JSON |
//! | `MissingMetadata` | table load | Required normalization scalar absent |
//! | `SchemaMismatch` | table load | Column sets disagree across partitions |
//! | `NoPartitions` | table load | Input directory has no partition files |
//! | `EmptyTable` | sampling | Zero-row table with a nonzero sampling target |
//! | `NonPositiveWeight` | sampling | Weight vector unusable as probabilities |
//! | `SizeDraw` | size draw | Expected yield rejected by the Poisson law |
//! | `Write` | chunk write | Chunk or manifest could not be published |
//! | `Ensemble` | ensemble | One or more replicas failed in-process |
//!
//! None of these are retried internally; retry is the responsibility of the
//! external batch-submission layer, which may re-invoke a failed replica index.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for replica generation operations.
pub type Result<T> = std::result::Result<T, ResampleError>;

/// Errors that can occur while generating replicas.
#[derive(Error, Debug)]
pub enum ResampleError {
    /// Invalid or inconsistent configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A source partition could not be read or decoded.
    #[error("failed to read partition {}: {message}", .path.display())]
    PartitionRead { path: PathBuf, message: String },

    /// A partition lacks one of the two required normalization scalars.
    #[error("partition {} is missing metadata field '{field}'", .path.display())]
    MissingMetadata { path: PathBuf, field: &'static str },

    /// A partition's column layout is incompatible with the rest of the sample.
    #[error("schema mismatch in {}: expected {expected}, found {found}", .path.display())]
    SchemaMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    /// The input directory contains no partition files at all.
    #[error("no partition files (*.json) found in {}", .dir.display())]
    NoPartitions { dir: PathBuf },

    /// A nonzero number of rows was requested from a zero-row table.
    #[error("cannot draw from an empty event table")]
    EmptyTable,

    /// The weight vector cannot be normalized into selection probabilities.
    #[error("cannot form sampling probabilities: {detail}")]
    NonPositiveWeight { detail: String },

    /// The expected yield was rejected by the Poisson distribution.
    #[error("invalid expected yield {mu}: {message}")]
    SizeDraw { mu: f64, message: String },

    /// A chunk or manifest file could not be published.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One or more replicas failed during an in-process ensemble run.
    #[error("{failed} of {total} replicas failed")]
    Ensemble { failed: usize, total: usize },
}

impl ResampleError {
    /// Name of the pipeline step this error belongs to, for the one-line
    /// diagnostic printed on failure.
    pub fn step(&self) -> &'static str {
        match self {
            ResampleError::Config(_) => "configuration",
            ResampleError::PartitionRead { .. }
            | ResampleError::MissingMetadata { .. }
            | ResampleError::SchemaMismatch { .. }
            | ResampleError::NoPartitions { .. } => "table load",
            ResampleError::SizeDraw { .. } => "size draw",
            ResampleError::EmptyTable | ResampleError::NonPositiveWeight { .. } => "sampling",
            ResampleError::Write { .. } => "chunk write",
            ResampleError::Ensemble { .. } => "ensemble",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_names() {
        let err = ResampleError::EmptyTable;
        assert_eq!(err.step(), "sampling");

        let err = ResampleError::MissingMetadata {
            path: PathBuf::from("part_0.json"),
            field: "sum_genw_presel",
        };
        assert_eq!(err.step(), "table load");

        let err = ResampleError::Write {
            path: PathBuf::from("chunk_0.json"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        assert_eq!(err.step(), "chunk write");
    }

    #[test]
    fn test_display_includes_context() {
        let err = ResampleError::MissingMetadata {
            path: PathBuf::from("nominal/part_3.json"),
            field: "sum_weight_central",
        };
        let msg = err.to_string();
        assert!(msg.contains("part_3.json"));
        assert!(msg.contains("sum_weight_central"));
    }
}
