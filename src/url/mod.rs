//! URL handling module for Sitegrep
//!
//! This module provides URL normalization, href resolution against the
//! fixed crawl base, and the origin scope that keeps a crawl on one site.

mod normalize;
mod scope;

// Re-export main functions
pub use normalize::{normalize_url, resolve_href};
pub use scope::{extract_host, OriginScope};
