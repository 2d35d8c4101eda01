//! site-sweep main entry point
//!
//! This is the command-line interface for the site-sweep metadata crawler.

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use site_sweep::config::{load_config_with_hash, validate, Config};
use site_sweep::crawler::Coordinator;
use site_sweep::output::{load_statistics, print_statistics, write_report};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// site-sweep: a single-site metadata crawler
///
/// site-sweep walks one web site depth-first from a seed address, records the
/// title, description, keywords and first heading of every page, classifies
/// non-HTML resources and reports the results as CSV.
#[derive(Parser, Debug)]
#[command(name = "site-sweep")]
#[command(version)]
#[command(about = "A single-site metadata crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load(cli.config.as_ref())?;

    if cli.dry_run {
        handle_dry_run(&config);
    } else {
        handle_crawl(config, cli.quiet).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_sweep=info,warn"),
            1 => EnvFilter::new("site_sweep=debug,info"),
            2 => EnvFilter::new("site_sweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration file, or falls back to the defaults
fn load(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::info!("No configuration file given, using defaults");
        let config = Config::default();
        validate(&config)?;
        return Ok(config);
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== site-sweep Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed URL: {}", config.crawler.seed_url);
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Request delay: {}s", config.crawler.request_delay);
    println!("  Request timeout: {}s", config.crawler.request_timeout);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);

    println!("\nOutput:");
    if config.output.file_template.trim().is_empty() {
        println!("  Console");
    } else {
        println!("  File template: {}", config.output.file_template);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, quiet: bool) -> anyhow::Result<()> {
    println!("Crawler start with \"{}\"", config.crawler.seed_url);

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    };

    let output = config.output.clone();
    let state = Coordinator::new(config)?.with_progress(progress).run().await;

    print_statistics(&load_statistics(&state));

    if let Some(path) = write_report(&state, &output).context("Failed to write report")? {
        println!("Saved to \"{}\"", path.display());
    }

    Ok(())
}
