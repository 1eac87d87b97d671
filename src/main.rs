//! Catalog-Crawler main entry point
//!
//! This is the command-line interface for the catalog crawler.

use anyhow::Context;
use catalog_crawler::config::{load_config_with_hash, validate, Config};
use catalog_crawler::crawler::run_and_write;
use catalog_crawler::output::print_statistics;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Catalog-Crawler: a single-site product catalog scraper
///
/// Crawls a shop catalog from a seed URL, following pagination links first,
/// and writes every product found (URL, image, name, price) to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "catalog-crawler")]
#[command(version = "1.0.0")]
#[command(about = "A single-site product catalog scraper", long_about = None)]
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

    /// Override the seed URL from the config
    #[arg(long, value_name = "URL")]
    seed: Option<String>,

    /// Override the CSV output path from the config
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.seed.is_some() || cli.output.is_some() {
        if let Some(seed) = cli.seed {
            config.crawler.seed_url = seed;
        }
        if let Some(output) = cli.output {
            config.output.csv_path = output.to_string_lossy().into_owned();
        }
        validate(&config).context("Invalid command-line override")?;
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(&config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_crawler=info,warn"),
            1 => EnvFilter::new("catalog_crawler=debug,info"),
            2 => EnvFilter::new("catalog_crawler=trace,debug"),
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

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Catalog-Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed URL: {}", config.crawler.seed_url);
    println!("  Catalog prefix: {}", config.crawler.catalog_prefix);
    println!("  On fetch error: {:?}", config.crawler.on_fetch_error);
    match config.crawler.max_pages {
        Some(max) => println!("  Max pages: {}", max),
        None => println!("  Max pages: unbounded"),
    }

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nHTTP:");
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    let outcome = match run_and_write(config).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    print_statistics(&outcome.stats);
    println!("\n✓ Results written to: {}", config.output.csv_path);

    Ok(())
}
