//! Configuration module for Sitegrep
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Without a file, [`Config::default`] is used.
//!
//! # Example
//!
//! ```no_run
//! use sitegrep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitegrep.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
