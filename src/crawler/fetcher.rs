//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the configured user agent and timeouts
//! - GET requests with redirect following
//! - Status and Content-Type checks
//! - Error classification

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::crawler::error::FetchError;
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use url::Url;

/// Capability to retrieve the content behind a URL
///
/// The crawl engine is generic over this trait so it can run against the
/// network or against an in-memory site.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetches `url` and returns its body as text
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `crawler` - Timeouts and redirect limit
/// * `user_agent` - The user agent configuration
///
/// # Example
///
/// ```no_run
/// use sitegrep::config::Config;
/// use sitegrep::crawler::build_http_client;
///
/// let config = Config::default();
/// let client = build_http_client(&config.crawler, &config.user_agent).unwrap();
/// ```
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(crawler.request_timeout())
        .connect_timeout(crawler.connect_timeout())
        .redirect(Policy::limited(crawler.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`Fetch`] implementation backed by a reqwest client
///
/// # Request Flow
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx with textual or missing Content-Type | body text |
/// | 2xx with any other Content-Type | `UnsupportedContent` |
/// | non-2xx after redirects | `Status` |
/// | timeout (connect, request, or body) | `Timeout` |
/// | connection refused / DNS / TLS | `Connect` |
/// | redirect chain over the limit | `Redirect` |
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from configuration
    pub fn new(crawler: &CrawlerConfig, user_agent: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(crawler, user_agent)?))
    }

    /// Wraps an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        if response.url() != url {
            tracing::debug!("{} redirected to {}", url, response.url());
        }

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if let Some(content_type) = content_type {
            if !is_textual(&content_type) {
                return Err(FetchError::UnsupportedContent { content_type });
            }
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Body(e.to_string())
            }
        })
    }
}

/// Returns true for Content-Type values the extractor can read as text
fn is_textual(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    mime.is_empty() || mime.starts_with("text/") || mime.contains("html") || mime.contains("xml")
}

/// Maps a reqwest send error onto a [`FetchError`]
fn classify_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Connect(e.to_string())
    } else if e.is_redirect() {
        FetchError::Redirect(e.to_string())
    } else {
        FetchError::Transport(e.to_string())
    }
}
