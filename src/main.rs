//! Kumo main entry point
//!
//! This is the command-line interface for the kumo site mapper.

use anyhow::Context;
use clap::{CommandFactory, Parser};
use kumo::config::{load_config_with_hash, Config};
use kumo::crawler::crawl;
use kumo::output::print_report;
use kumo::url::{Address, ScopePolicy};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Kumo: a bounded-concurrency site mapper
///
/// Kumo crawls outward from a starting address, visiting every reachable
/// page exactly once under a fixed concurrency budget, and prints the full
/// visited ledger when no work remains.
#[derive(Parser, Debug)]
#[command(name = "kumo")]
#[command(version)]
#[command(about = "A bounded-concurrency site mapper", long_about = None)]
struct Cli {
    /// Address to start crawling from
    #[arg(value_name = "URL")]
    seed: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of concurrent fetches (overrides the config file)
    #[arg(long, value_name = "N")]
    concurrency: Option<u32>,

    /// Link scope policy: same-origin, relative-only, or unrestricted
    #[arg(long, value_name = "POLICY", value_parser = parse_scope)]
    scope: Option<ScopePolicy>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn parse_scope(s: &str) -> Result<ScopePolicy, String> {
    s.parse()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Without a starting address there is nothing to crawl: print usage
    // and exit cleanly
    let Some(seed) = cli.seed.as_deref() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = resolve_config(&cli)?;

    let seed = Address::parse(seed).with_context(|| format!("invalid starting address '{seed}'"))?;

    tracing::info!(
        "Crawling from {} (concurrency: {}, scope: {})",
        seed,
        config.crawler.max_concurrent_fetches,
        config.crawler.scope
    );

    let report = crawl(config, seed).await?;

    print_report(&report);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("kumo=info,warn"),
            1 => EnvFilter::new("kumo=debug,info"),
            2 => EnvFilter::new("kumo=trace,debug"),
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

/// Loads the config file when given and applies command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(concurrency) = cli.concurrency {
        anyhow::ensure!(
            (1..=100).contains(&concurrency),
            "--concurrency must be between 1 and 100, got {concurrency}"
        );
        config.crawler.max_concurrent_fetches = concurrency;
    }

    if let Some(scope) = cli.scope {
        config.crawler.scope = scope;
    }

    Ok(config)
}
