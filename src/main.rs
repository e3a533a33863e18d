//! replicamc CLI entry point

use anyhow::{Context, Result};
use replicamc::config::{cli::Cli, toml as config_toml, validator, Config};
use replicamc::error::ResampleError;
use replicamc::orchestrator::{Orchestrator, ReplicaReport};
use replicamc::table::EventTable;

fn main() {
    let cli = Cli::parse_args();
    if let Err(err) = run(&cli) {
        // One line per failure, naming the step that failed.
        eprintln!("replicamc: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    use std::time::Instant;

    println!("replicamc v{}", env!("CARGO_PKG_VERSION"));
    println!("Weighted Poisson bootstrap replica generator");
    println!();

    cli.validate()?;
    let config = build_config_from_cli(cli)?;
    validator::validate_config(&config).context("configuration validation failed")?;

    print_configuration(cli, &config);

    if config.runtime.dry_run {
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    // Table load: partitions concatenated, normalization constants frozen
    let load_start = Instant::now();
    let table = EventTable::load_dir(&cli.input_dir).map_err(step_error)?;
    if config.runtime.debug {
        eprintln!(
            "DEBUG TIMING: table load: {:.3}s",
            load_start.elapsed().as_secs_f64()
        );
    }

    println!();
    println!(
        "Loaded {} events from {} partitions (sum_weight_central = {:.6}, sum_genw_presel = {:.6})",
        table.len(),
        table.n_partitions(),
        table.sum_weight_central(),
        table.sum_genw_presel()
    );

    let mu = config.sampling.mu.unwrap_or(table.len() as f64);
    let orchestrator = Orchestrator::new(
        &table,
        mu,
        config.sampling.mode,
        config.output.chunk_capacity,
        config.sampling.seed,
    );

    let run_start = Instant::now();
    match config.sampling.replica_index {
        Some(replica_index) => {
            let report = orchestrator
                .run_single(replica_index, &cli.output_dir)
                .map_err(step_error)?;
            print_report(&report);
            println!(
                "Replica {} chunked and saved to {}",
                replica_index,
                cli.output_dir.display()
            );
        }
        None => {
            let reports = orchestrator
                .run_ensemble(config.sampling.replicas, &cli.output_dir)
                .map_err(step_error)?;
            for report in &reports {
                print_report(report);
            }
            println!(
                "All {} replicas chunked and saved under {}",
                reports.len(),
                cli.output_dir.display()
            );
        }
    }
    if config.runtime.debug {
        eprintln!(
            "DEBUG TIMING: replica generation: {:.3}s",
            run_start.elapsed().as_secs_f64()
        );
    }

    Ok(())
}

/// Build configuration from CLI arguments, merging an optional TOML file
fn build_config_from_cli(cli: &Cli) -> Result<Config> {
    let config = if let Some(ref path) = cli.config {
        config_toml::parse_toml_file(path)?
    } else {
        Config::default()
    };

    config_toml::merge_cli_with_config(cli, config)
}

/// Wrap a pipeline error with the name of the step that failed
fn step_error(err: ResampleError) -> anyhow::Error {
    anyhow::anyhow!("{} failed: {err}", err.step())
}

/// Print configuration summary
fn print_configuration(cli: &Cli, config: &Config) {
    println!("Configuration:");
    println!("  Input: {}", cli.input_dir.display());
    println!("  Output: {}", cli.output_dir.display());
    println!("  Sampling:");
    match config.sampling.mu {
        Some(mu) => println!("    Expected yield: {mu}"),
        None => println!("    Expected yield: loaded event count (default)"),
    }
    println!("    Mode: {}", config.sampling.mode);
    match config.sampling.seed {
        Some(seed) => println!("    Seed: {seed}"),
        None => println!("    Seed: entropy (runs not reproducible)"),
    }
    match config.sampling.replica_index {
        Some(index) => println!("    Replica index: {index} (single-replica mode)"),
        None => println!("    Replicas: {}", config.sampling.replicas),
    }
    println!("  Chunk capacity: {}", config.output.chunk_capacity);
}

/// Print one replica's outcome
fn print_report(report: &ReplicaReport) {
    println!(
        "  replica {}: {} events in {} chunks",
        report.replica_index, report.n_events, report.n_chunks
    );
}
