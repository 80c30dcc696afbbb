//! Crawler module for page fetching, extraction and traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with timeouts and error classification
//! - HTML text and link extraction
//! - The depth-bounded, same-origin crawl engine

mod coordinator;
mod error;
mod fetcher;
mod parser;

pub use coordinator::{CrawlLimits, CrawlOutcome, CrawlReport, Crawler, DEFAULT_MAX_DEPTH};
pub use error::{CrawlFailure, ExtractError, FetchError};
pub use fetcher::{build_http_client, Fetch, HttpFetcher};
pub use parser::{Extract, ExtractedPage, HtmlExtractor};

use crate::config::Config;
use tokio_util::sync::CancellationToken;

/// Runs a complete crawl over HTTP and returns the populated crawler
///
/// This is the main entry point for a one-shot crawl. It will:
/// 1. Build the HTTP client from configuration
/// 2. Crawl from `seed` to the configured max depth
/// 3. Hand back the crawler for searching, along with the crawl report
///
/// # Returns
///
/// * `Ok((Crawler, CrawlReport))` - Crawl ran (individual pages may have failed)
/// * `Err(SitegrepError)` - The HTTP client could not be built
pub async fn crawl(
    config: &Config,
    seed: &str,
    cancel: &CancellationToken,
) -> crate::Result<(Crawler<HttpFetcher>, CrawlReport)> {
    let mut crawler = Crawler::from_config(config)?;
    let report = crawler
        .crawl(seed, config.crawler.max_depth, cancel)
        .await;
    Ok((crawler, report))
}
