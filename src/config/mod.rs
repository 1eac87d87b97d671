//! Configuration module for the catalog crawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use catalog_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Crawling catalog: {}", config.crawler.catalog_prefix);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, FetchErrorPolicy, HttpConfig, OutputConfig, UserAgentConfig,
    DEFAULT_CATALOG_PREFIX, DEFAULT_CSV_PATH,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
