//! Kioku main entry point
//!
//! Command-line interface for the Kioku web preservation runner.

use clap::Parser;
use kioku::config::load_config_with_hash;
use kioku::pipeline::{print_summary, Coordinator, RunMode};
use kioku::store::FrontierStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Kioku: a polite web preservation runner
///
/// Kioku samples seed pages from a frontier file, discovers every URL
/// reachable from them, and feeds the ones missing from the Wayback Machine
/// either straight into the capture endpoint or into an output file for a
/// later pass.
#[derive(Parser, Debug)]
#[command(name = "kioku")]
#[command(version = "1.0.0")]
#[command(about = "A polite web preservation runner", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Record missing URLs to the output file instead of submitting them
    #[arg(long)]
    record: bool,

    /// Validate config and show what would be processed without running
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config)?;
        return Ok(());
    }

    let mode = if cli.record {
        RunMode::Record
    } else {
        RunMode::Archive
    };

    let coordinator = Coordinator::new(config)?;
    let summary = coordinator.run(mode).await?;
    print_summary(&summary);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("kioku=info,warn"),
            1 => EnvFilter::new("kioku=debug,info"),
            2 => EnvFilter::new("kioku=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what a run would do
fn handle_dry_run(config: &kioku::Config) -> anyhow::Result<()> {
    println!("=== Kioku Dry Run ===\n");

    println!("Run:");
    println!("  Max seeds per run: {}", config.run.max_seeds_per_run);
    println!("  Worker pool size: {}", config.run.worker_count);
    println!("  Submission delay: {}ms", config.run.request_delay_ms);
    println!("  Fetch timeout: {}s", config.run.fetch_timeout_secs);

    println!("\nStores:");
    println!("  Frontier: {}", config.stores.frontier_path);
    println!("  Output: {}", config.stores.output_path);

    println!("\nArchive:");
    println!("  Availability: {}", config.archive.availability_endpoint);
    println!("  Save: {}", config.archive.save_endpoint);

    println!("\nGitHub:");
    println!("  Credential variable: {}", config.github.token_env);
    let has_token = std::env::var(&config.github.token_env)
        .map(|v| !v.is_empty())
        .unwrap_or(false);
    println!(
        "  Credential present: {}",
        if has_token { "yes" } else { "no" }
    );

    println!("\nScan patterns ({}):", config.pattern.len());
    for rule in &config.pattern {
        match (&rule.suffix, &rule.rewrite) {
            (Some(suffix), Some(rewrite)) => {
                println!("  - {} ({} -> {})", rule.prefix, suffix, rewrite)
            }
            _ => println!("  - {}", rule.prefix),
        }
    }

    let frontier = FrontierStore::new(&config.stores.frontier_path);
    match frontier.load() {
        Ok(seeds) => {
            println!("\n✓ Configuration is valid");
            println!(
                "✓ Would sample up to {} of {} pending seeds",
                config.run.max_seeds_per_run,
                seeds.len()
            );
        }
        Err(e) => {
            println!("\n✓ Configuration is valid");
            println!("✗ Frontier not readable yet: {}", e);
        }
    }

    Ok(())
}
