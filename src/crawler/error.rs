//! Per-URL failure types for the crawler module
//!
//! None of these abort a crawl. They are logged when they happen and kept
//! on the [`Crawler`](super::Crawler) so callers can inspect what failed
//! and why.

use crate::UrlError;
use thiserror::Error;

/// Failure to retrieve a page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] UrlError),

    #[error("Request timeout")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("HTTP status {status}")]
    Status { status: u16 },

    #[error("Unsupported content type: {content_type}")]
    UnsupportedContent { content_type: String },

    #[error("Redirect error: {0}")]
    Redirect(String),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Failure to turn fetched content into text and links
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Malformed document: {0}")]
    Malformed(String),
}

/// Why a visited URL contributed nothing to the index
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrawlFailure {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("HTML parse error: {0}")]
    Extract(#[from] ExtractError),
}

impl CrawlFailure {
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }

    pub fn is_extract(&self) -> bool {
        matches!(self, Self::Extract(_))
    }
}
