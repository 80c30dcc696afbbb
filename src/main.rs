//! Sitegrep main entry point
//!
//! This is the command-line interface for the Sitegrep crawler.

use anyhow::Context;
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use sitegrep::config::{load_config_with_hash, validate, Config};
use sitegrep::crawler::crawl;
use sitegrep::output::{print_results, print_summary};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Sitegrep: crawl one site and search its text
///
/// Sitegrep fetches the seed URL, follows links that stay on the seed's
/// host up to a maximum depth, and lists every crawled page whose text
/// contains the keyword (case-insensitive).
#[derive(Parser, Debug)]
#[command(name = "sitegrep")]
#[command(version)]
#[command(about = "Crawl one site and search its text", long_about = None)]
struct Cli {
    /// URL to start crawling from
    #[arg(value_name = "SEED_URL")]
    seed: String,

    /// Keyword to search for once the crawl finishes
    #[arg(value_name = "KEYWORD", default_value = "test", value_parser = NonEmptyStringValueParser::new())]
    keyword: String,

    /// Maximum number of hops from the seed URL
    #[arg(short, long, value_name = "N")]
    depth: Option<u32>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Stop crawling after this many seconds
    #[arg(long, value_name = "SECS")]
    deadline: Option<u64>,

    /// Stop crawling after this many fetch attempts
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    // Ctrl-C stops the crawl; whatever was indexed is still searched
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, finishing with pages indexed so far");
            on_signal.cancel();
        }
    });

    let (crawler, report) = crawl(&config, &cli.seed, &cancel)
        .await
        .context("Failed to start crawl")?;

    if !cli.quiet {
        print_summary(&report)?;
    }

    let results = crawler.search(&cli.keyword);
    print_results(&results)?;

    Ok(())
}

/// Loads the optional config file and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }

    if let Some(timeout) = cli.timeout {
        config.crawler.request_timeout_secs = timeout;
        config.crawler.connect_timeout_secs = config.crawler.connect_timeout_secs.min(timeout);
    }

    if cli.deadline.is_some() {
        config.crawler.crawl_deadline_secs = cli.deadline;
    }

    if cli.max_pages.is_some() {
        config.crawler.max_pages = cli.max_pages;
    }

    validate(&config).context("Invalid command-line options")?;

    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the result listing.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitegrep=info,warn"),
            1 => EnvFilter::new("sitegrep=debug,info"),
            2 => EnvFilter::new("sitegrep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
