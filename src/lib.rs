//! Sitegrep: a bounded-depth, same-origin crawler with keyword lookup
//!
//! This crate fetches pages starting from a seed URL, extracts their text,
//! follows same-origin links up to a maximum depth, and answers
//! case-insensitive keyword queries over everything it indexed.

pub mod config;
pub mod crawler;
pub mod index;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Sitegrep operations
///
/// Per-URL failures during a crawl are never surfaced through this type; see
/// [`crawler::CrawlFailure`] for those.
#[derive(Debug, Error)]
pub enum SitegrepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Sitegrep operations
pub type Result<T> = std::result::Result<T, SitegrepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlFailure, CrawlOutcome, CrawlReport, Crawler};
pub use index::TextIndex;
pub use crate::url::{normalize_url, resolve_href, OriginScope};
