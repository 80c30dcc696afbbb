//! Crawl engine - traversal, deduplication and scoping
//!
//! This module contains the crawl loop that ties everything together:
//! - Owning the visited set and the text index
//! - Walking an explicit depth-first work-list from the seed
//! - Resolving discovered links against the fixed seed base
//! - Dropping links outside the seed's origin
//! - Recording per-URL failures without stopping the crawl
//! - Honoring cancellation, a deadline and a page cap

use crate::config::Config;
use crate::crawler::error::{CrawlFailure, FetchError};
use crate::crawler::fetcher::{Fetch, HttpFetcher};
use crate::crawler::parser::{Extract, HtmlExtractor};
use crate::index::TextIndex;
use crate::url::{normalize_url, resolve_href, OriginScope};
use crate::UrlError;
use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Default maximum depth when none is configured
pub const DEFAULT_MAX_DEPTH: u32 = 2;

/// A pending traversal step
#[derive(Debug, Clone)]
struct FrontierEntry {
    url: Url,
    depth: u32,
}

/// Limits applied on top of the depth bound
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlLimits {
    /// Wall-clock budget for one `crawl` call
    pub deadline: Option<Duration>,

    /// Maximum number of fetch attempts for one `crawl` call
    pub max_pages: Option<usize>,
}

/// How a crawl ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// Every reachable in-scope page within the depth bound was considered
    Completed,
    /// The cancellation token fired
    Cancelled,
    /// The configured deadline passed
    DeadlineExceeded,
    /// The configured page cap was reached
    PageLimitReached,
}

impl fmt::Display for CrawlOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::DeadlineExceeded => "deadline exceeded",
            Self::PageLimitReached => "page limit reached",
        };
        f.write_str(label)
    }
}

/// Summary of one `crawl` call
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlReport {
    /// The seed as given by the caller
    pub seed: String,
    pub outcome: CrawlOutcome,
    /// URLs added to the visited set by this call
    pub pages_visited: usize,
    /// URLs added to the index by this call
    pub pages_indexed: usize,
    /// URLs that failed during this call
    pub pages_failed: usize,
    pub elapsed: Duration,
}

/// Single-owner crawl engine
///
/// The engine owns its visited set and text index for its whole lifetime;
/// callers only get read access. Successive `crawl` calls share both, so a
/// URL visited by an earlier call is never fetched again.
///
/// # Example
///
/// ```no_run
/// use sitegrep::config::Config;
/// use sitegrep::crawler::Crawler;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut crawler = Crawler::from_config(&Config::default())?;
/// let report = crawler.crawl("https://example.com", 2, &CancellationToken::new()).await;
/// println!("{} pages indexed", report.pages_indexed);
/// println!("{:?}", crawler.search("example"));
/// # Ok(())
/// # }
/// ```
pub struct Crawler<F, E = HtmlExtractor> {
    fetcher: F,
    extractor: E,
    limits: CrawlLimits,
    visited: HashSet<String>,
    index: TextIndex,
    failures: Vec<(String, CrawlFailure)>,
}

impl Crawler<HttpFetcher, HtmlExtractor> {
    /// Creates an HTTP-backed crawler from configuration
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let fetcher = HttpFetcher::new(&config.crawler, &config.user_agent)?;
        let limits = CrawlLimits {
            deadline: config.crawler.crawl_deadline(),
            max_pages: config.crawler.max_pages,
        };

        Ok(Self::new(fetcher, HtmlExtractor).with_limits(limits))
    }
}

impl<F: Fetch, E: Extract> Crawler<F, E> {
    /// Creates a crawler with an empty visited set and index
    pub fn new(fetcher: F, extractor: E) -> Self {
        Self {
            fetcher,
            extractor,
            limits: CrawlLimits::default(),
            visited: HashSet::new(),
            index: TextIndex::new(),
            failures: Vec::new(),
        }
    }

    pub fn with_limits(mut self, limits: CrawlLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Every URL traversal has considered, whether or not it was fetched
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    /// Text of every successfully fetched and extracted page
    pub fn index(&self) -> &TextIndex {
        &self.index
    }

    /// Failed URLs with their cause, in the order they failed
    pub fn failures(&self) -> &[(String, CrawlFailure)] {
        &self.failures
    }

    /// Case-insensitive keyword search over the index
    pub fn search(&self, keyword: &str) -> Vec<String> {
        self.index.search(keyword)
    }

    /// Crawls from `seed` up to `max_depth` hops
    ///
    /// # Traversal
    ///
    /// Depth-first, following links in document order. For each entry
    /// popped off the work-list:
    ///
    /// 1. Skip it if it is deeper than `max_depth` or already visited
    /// 2. Mark it visited (before fetching, so failures are never retried)
    /// 3. Fetch and extract; on failure record it and stop descending
    /// 4. Index the text
    /// 5. Resolve every href against the seed URL, drop empty and `#`
    ///    hrefs, drop anything outside the seed's origin, and push the rest
    ///    at `depth + 1`
    ///
    /// The origin scope and the resolution base both come from the seed and
    /// never change during the call, whatever the pages or redirects do.
    ///
    /// Nothing here returns an error: a malformed seed or a failing host
    /// just contributes nothing to the index.
    pub async fn crawl(
        &mut self,
        seed: &str,
        max_depth: u32,
        cancel: &CancellationToken,
    ) -> CrawlReport {
        let started = Instant::now();
        let deadline = self
            .limits
            .deadline
            .map(|budget| tokio::time::Instant::now() + budget);

        let visited_before = self.visited.len();
        let indexed_before = self.index.len();
        let failed_before = self.failures.len();

        let outcome = match normalize_url(seed).map_err(FetchError::from) {
            Ok(base) => match OriginScope::from_url(&base) {
                Some(scope) => self.walk(base, &scope, max_depth, deadline, cancel).await,
                None => {
                    self.reject_seed(seed, UrlError::MissingHost.into());
                    CrawlOutcome::Completed
                }
            },
            Err(e) => {
                self.reject_seed(seed, e);
                CrawlOutcome::Completed
            }
        };

        let report = CrawlReport {
            seed: seed.to_string(),
            outcome,
            pages_visited: self.visited.len() - visited_before,
            pages_indexed: self.index.len() - indexed_before,
            pages_failed: self.failures.len() - failed_before,
            elapsed: started.elapsed(),
        };

        tracing::info!(
            "Crawl of {} {}: {} visited, {} indexed, {} failed in {:?}",
            report.seed,
            report.outcome,
            report.pages_visited,
            report.pages_indexed,
            report.pages_failed,
            report.elapsed
        );

        report
    }

    async fn walk(
        &mut self,
        base: Url,
        scope: &OriginScope,
        max_depth: u32,
        deadline: Option<tokio::time::Instant>,
        cancel: &CancellationToken,
    ) -> CrawlOutcome {
        tracing::debug!("Crawling {} within {} up to depth {}", base, scope, max_depth);

        let mut stack = vec![FrontierEntry {
            url: base.clone(),
            depth: 0,
        }];
        let mut attempts = 0usize;

        while let Some(entry) = stack.pop() {
            if cancel.is_cancelled() {
                return CrawlOutcome::Cancelled;
            }

            if deadline.is_some_and(|d| tokio::time::Instant::now() >= d) {
                return CrawlOutcome::DeadlineExceeded;
            }

            if entry.depth > max_depth || self.visited.contains(entry.url.as_str()) {
                continue;
            }

            if self.limits.max_pages.is_some_and(|max| attempts >= max) {
                return CrawlOutcome::PageLimitReached;
            }

            self.visited.insert(entry.url.to_string());
            attempts += 1;
            tracing::debug!("Processing URL: {} (depth {})", entry.url, entry.depth);

            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => return CrawlOutcome::Cancelled,
                _ = wait_for(deadline) => return CrawlOutcome::DeadlineExceeded,
                result = self.fetcher.fetch(&entry.url) => result,
            };

            let content = match fetched {
                Ok(content) => content,
                Err(e) => {
                    self.record_failure(&entry.url, e.into());
                    continue;
                }
            };

            let page = match self.extractor.extract(&content) {
                Ok(page) => page,
                Err(e) => {
                    self.record_failure(&entry.url, e.into());
                    continue;
                }
            };

            self.index.insert(entry.url.as_str(), page.text);

            // Children would sit past the depth bound and be refused anyway
            if entry.depth >= max_depth {
                continue;
            }

            let mut children = Vec::new();
            for href in &page.links {
                let Some(link) = resolve_href(&base, href) else {
                    continue;
                };

                if !scope.contains(&link) {
                    tracing::trace!("Skipping out-of-scope link {}", link);
                    continue;
                }

                if self.visited.contains(link.as_str()) {
                    continue;
                }

                children.push(FrontierEntry {
                    url: link,
                    depth: entry.depth + 1,
                });
            }

            // Reversed so the first link in the document is popped first
            stack.extend(children.into_iter().rev());
        }

        CrawlOutcome::Completed
    }

    fn reject_seed(&mut self, seed: &str, error: FetchError) {
        let key = seed.trim().to_string();
        if self.visited.insert(key.clone()) {
            tracing::warn!("Error crawling {}: {}", key, error);
            self.failures.push((key, error.into()));
        }
    }

    fn record_failure(&mut self, url: &Url, failure: CrawlFailure) {
        tracing::warn!("Error crawling {}: {}", url, failure);
        self.failures.push((url.to_string(), failure));
    }
}

/// Resolves when `deadline` passes, or never if there is none
async fn wait_for(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
