//! TOML configuration file parsing

use super::cli::Cli;
use super::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config =
        ::toml::from_str(contents).context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    if let Some(mu) = cli.mu {
        config.sampling.mu = Some(mu);
    } else if let Some(ref path) = cli.mu_file {
        config.sampling.mu = Some(read_mu_file(path)?);
    }

    if cli.sampling != super::SamplingMode::default() {
        config.sampling.mode = cli.sampling;
    }

    if let Some(seed) = cli.seed {
        config.sampling.seed = Some(seed);
    }

    if let Some(replicas) = cli.replicas {
        config.sampling.replicas = replicas;
    }

    if let Some(replica_index) = cli.replica_index {
        config.sampling.replica_index = Some(replica_index);
    }

    if cli.chunk_capacity != super::OutputConfig::default().chunk_capacity {
        config.output.chunk_capacity = cli.chunk_capacity;
    }

    config.runtime.dry_run = config.runtime.dry_run || cli.dry_run;
    config.runtime.debug = config.runtime.debug || cli.debug;

    Ok(config)
}

/// Read the expected yield from a one-line text file, as handed off by the
/// external yield provider.
fn read_mu_file(path: &Path) -> Result<f64> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read expected-yield file: {}", path.display()))?;

    contents
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid expected yield in {}", path.display()))
}
