//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.

pub mod cli;
pub mod toml;
pub mod validator;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Complete run configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// Replica sampling parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Expected yield mu. None means "use the loaded event count", which
    /// reproduces the original sample size on average.
    pub mu: Option<f64>,
    /// Row selection probability mode
    #[serde(default)]
    pub mode: SamplingMode,
    /// Base seed; None means entropy-seeded, re-runs not reproducible
    pub seed: Option<u64>,
    /// Number of replicas for in-process ensemble runs
    #[serde(default = "default_replicas")]
    pub replicas: usize,
    /// Externally supplied replica index for single-replica batch jobs.
    /// Set => single-replica mode, chunks land directly under the
    /// destination.
    pub replica_index: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            mu: None,
            mode: SamplingMode::default(),
            seed: None,
            replicas: default_replicas(),
            replica_index: None,
        }
    }
}

/// Chunk output parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Maximum rows per chunk file
    #[serde(default = "default_chunk_capacity")]
    pub chunk_capacity: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            chunk_capacity: default_chunk_capacity(),
        }
    }
}

/// Runtime behavior flags
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RuntimeConfig {
    /// Validate and print configuration without writing anything
    #[serde(default)]
    pub dry_run: bool,
    /// Emit timing diagnostics to stderr
    #[serde(default)]
    pub debug: bool,
}

/// Row selection probability mode
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SamplingMode {
    /// P(row i) proportional to the row's central weight
    #[default]
    Weighted,
    /// Equal probability for all rows, weights ignored
    Uniform,
}

impl fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingMode::Weighted => write!(f, "weighted"),
            SamplingMode::Uniform => write!(f, "uniform"),
        }
    }
}

fn default_replicas() -> usize {
    1
}

fn default_chunk_capacity() -> usize {
    10_000
}
