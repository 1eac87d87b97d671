//! URL handling module for the catalog crawler
//!
//! This module decides which discovered URLs belong to the catalog and how
//! urgently they should be crawled.

mod matcher;

pub use matcher::{CatalogScope, DEFAULT_PRIORITY, PAGINATION_PRIORITY};

use ::url::Url;

/// Returns true if the string is an absolute http(s) URL
///
/// # Examples
///
/// ```
/// use catalog_crawler::url::is_absolute_http;
///
/// assert!(is_absolute_http("https://scrapeme.live/shop/"));
/// assert!(!is_absolute_http("/shop/"));
/// assert!(!is_absolute_http("ftp://scrapeme.live/shop/"));
/// ```
pub fn is_absolute_http(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}
