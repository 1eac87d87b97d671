//! Crawler module for catalog page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetcher` trait
//! - Frontier and visited-set management
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod scheduler;

pub use coordinator::{run_and_write, run_crawl, Coordinator, CrawlOutcome, CrawlSettings};
pub use fetcher::{build_http_client, Fetcher, HttpFetcher};
pub use scheduler::{QueuedUrl, Scheduler, VisitedSet};
