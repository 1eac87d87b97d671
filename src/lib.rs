//! Catalog-Crawler: a single-site product catalog scraper
//!
//! This crate crawls one e-commerce catalog from a seed URL, following
//! pagination and product links in priority order, and extracts product
//! records (page URL, image, name, price) into a tabular result set.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for crawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch failed for {url}: {source}")]
    Fetch { url: String, source: FetchError },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Invalid catalog pattern: {0}")]
    Pattern(#[from] regex::Error),

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

/// Per-URL fetch failures
///
/// Covers both the request itself and reading the response body. The
/// coordinator decides whether one of these skips the URL or aborts the crawl.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("HTTP status {status}")]
    Status { status: u16 },

    #[error("Request timeout")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to read body: {0}")]
    Body(String),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_and_write, run_crawl, Coordinator, CrawlOutcome};
pub use extract::{extract_links, extract_product, ProductRecord};
pub use output::{write_csv, ResultTable};
pub use url::CatalogScope;
