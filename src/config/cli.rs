//! CLI argument parsing using clap

use super::SamplingMode;
use clap::Parser;
use std::path::PathBuf;

/// replicamc - Weighted Poisson bootstrap replica generator
#[derive(Parser, Debug)]
#[command(name = "replicamc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory containing source partition files (*.json)
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Destination root for replica chunk files
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Replica index for single-replica batch invocations; chunks are
    /// written directly under OUTPUT_DIR
    #[arg(short = 'r', long, conflicts_with = "replicas")]
    pub replica_index: Option<u64>,

    /// Number of replicas to generate in-process, one subdirectory each
    #[arg(short = 'R', long)]
    pub replicas: Option<usize>,

    /// Expected yield mu (default: the loaded event count)
    #[arg(long, conflicts_with = "mu_file")]
    pub mu: Option<f64>,

    /// Read the expected yield from a one-line text file
    #[arg(long, value_name = "FILE")]
    pub mu_file: Option<PathBuf>,

    /// Row selection probability mode
    #[arg(long, value_enum, default_value = "weighted")]
    pub sampling: SamplingMode,

    /// Maximum rows per chunk file
    #[arg(short = 'c', long, default_value = "10000")]
    pub chunk_capacity: usize,

    /// Base random seed; omit for entropy-seeded, non-reproducible runs
    #[arg(long, env = "REPLICAMC_SEED")]
    pub seed: Option<u64>,

    /// TOML configuration file; CLI arguments take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Validate and print configuration without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Emit timing diagnostics to stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Cross-argument checks clap cannot express
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(replicas) = self.replicas {
            if replicas == 0 {
                anyhow::bail!("--replicas must be at least 1");
            }
        }
        if self.chunk_capacity == 0 {
            anyhow::bail!("--chunk-capacity must be at least 1");
        }
        if let Some(mu) = self.mu {
            if !mu.is_finite() || mu < 0.0 {
                anyhow::bail!("--mu must be finite and non-negative, got {}", mu);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_minimal() {
        let cli = Cli::try_parse_from(["replicamc", "in", "out"]).unwrap();
        assert_eq!(cli.input_dir, PathBuf::from("in"));
        assert_eq!(cli.output_dir, PathBuf::from("out"));
        assert_eq!(cli.sampling, SamplingMode::Weighted);
        assert_eq!(cli.chunk_capacity, 10_000);
        assert!(cli.replica_index.is_none());
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_cli_single_replica_mode() {
        let cli =
            Cli::try_parse_from(["replicamc", "in", "out", "-r", "17", "--seed", "9"]).unwrap();
        assert_eq!(cli.replica_index, Some(17));
        assert_eq!(cli.seed, Some(9));
    }

    #[test]
    fn test_cli_mode_conflict() {
        let result = Cli::try_parse_from(["replicamc", "in", "out", "-r", "1", "-R", "10"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_mu_conflict() {
        let result =
            Cli::try_parse_from(["replicamc", "in", "out", "--mu", "50", "--mu-file", "Nexp.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_uniform_sampling() {
        let cli =
            Cli::try_parse_from(["replicamc", "in", "out", "--sampling", "uniform"]).unwrap();
        assert_eq!(cli.sampling, SamplingMode::Uniform);
    }

    #[test]
    fn test_cli_validate_rejects_bad_values() {
        let cli = Cli::try_parse_from(["replicamc", "in", "out", "-R", "0"]).unwrap();
        assert!(cli.validate().is_err());

        let cli = Cli::try_parse_from(["replicamc", "in", "out", "-c", "0"]).unwrap();
        assert!(cli.validate().is_err());

        let cli = Cli::try_parse_from(["replicamc", "in", "out", "--mu=-5"]).unwrap();
        assert!(cli.validate().is_err());
    }
}
