//! Crawl statistics
//!
//! Counters kept by the coordinator while it crawls, and a printer for the
//! end-of-run report.

use crate::FetchError;
use chrono::{DateTime, Utc};

/// A page that could not be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedPage {
    pub url: String,
    pub error: FetchError,
}

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Pages fetched successfully
    pub pages_fetched: u64,

    /// Pages skipped because the fetch failed
    pub failed_pages: Vec<FailedPage>,

    /// Product records extracted
    pub records_extracted: u64,

    /// Catalog links seen, duplicates included
    pub links_discovered: u64,

    /// Links that were new to the frontier
    pub links_enqueued: u64,

    /// Set when the page cap ended the crawl
    pub stopped_at_page_cap: bool,
}

impl Default for CrawlStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl CrawlStatistics {
    /// Starts a new statistics record stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            pages_fetched: 0,
            failed_pages: Vec::new(),
            records_extracted: 0,
            links_discovered: 0,
            links_enqueued: 0,
            stopped_at_page_cap: false,
        }
    }

    pub fn record_failure(&mut self, url: &str, error: FetchError) {
        self.failed_pages.push(FailedPage {
            url: url.to_string(),
            error,
        });
    }

    /// Pages popped from the frontier, fetched or failed
    pub fn pages_attempted(&self) -> u64 {
        self.pages_fetched + self.failed_pages.len() as u64
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Duration in whole seconds, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}

/// Prints crawl statistics to stdout
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Started:  {}", stats.started_at.to_rfc3339());
    if let Some(finished) = stats.finished_at {
        println!("Finished: {}", finished.to_rfc3339());
    }
    if let Some(seconds) = stats.duration_seconds() {
        println!("Duration: {}s", seconds);
    }

    println!();
    println!("Pages fetched:     {}", stats.pages_fetched);
    println!("Pages failed:      {}", stats.failed_pages.len());
    println!("Records extracted: {}", stats.records_extracted);
    println!("Links discovered:  {}", stats.links_discovered);
    println!("Links enqueued:    {}", stats.links_enqueued);

    if stats.stopped_at_page_cap {
        println!("\nStopped early: page cap reached");
    }

    if !stats.failed_pages.is_empty() {
        println!("\nFailed pages:");
        for failed in &stats.failed_pages {
            println!("  {} - {}", failed.url, failed.error);
        }
    }
}
