//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates:
//! - Popping URLs from the frontier in priority order
//! - Fetching each page through the configured fetcher
//! - Running link and product extraction over the fetched body
//! - Enqueuing newly discovered catalog links
//! - Accumulating product records in pop order

use crate::config::{validate, Config, FetchErrorPolicy};
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use crate::crawler::scheduler::Scheduler;
use crate::extract::{extract_links, extract_product};
use crate::output::{write_csv, CrawlStatistics, ResultTable};
use crate::url::{CatalogScope, DEFAULT_PRIORITY};
use crate::CrawlError;
use std::path::Path;

/// Pages between progress log lines
const PROGRESS_INTERVAL: u64 = 10;

/// Crawl behavior that does not depend on the fetcher
#[derive(Debug, Clone, Copy, Default)]
pub struct CrawlSettings {
    pub on_fetch_error: FetchErrorPolicy,
    pub max_pages: Option<u32>,
}

/// Result of a completed crawl
#[derive(Debug)]
pub struct CrawlOutcome {
    pub table: ResultTable,
    pub stats: CrawlStatistics,
}

/// Main crawler coordinator structure
///
/// The scheduler lives as long as the coordinator, so URLs visited by one
/// call to [`Coordinator::crawl`] are never fetched again by a later call.
pub struct Coordinator<F: Fetcher> {
    fetcher: F,
    scope: CatalogScope,
    settings: CrawlSettings,
    scheduler: Scheduler,
}

impl<F: Fetcher> Coordinator<F> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Source of page bodies
    /// * `scope` - Catalog and pagination matcher
    /// * `settings` - Failure policy and page cap
    pub fn new(fetcher: F, scope: CatalogScope, settings: CrawlSettings) -> Self {
        Self {
            fetcher,
            scope,
            settings,
            scheduler: Scheduler::new(),
        }
    }

    /// Returns the scheduler, for inspecting frontier and visited state
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Runs the main crawl loop from a seed URL
    ///
    /// The seed is queued at the default priority; if it has already been
    /// visited by this coordinator nothing is fetched. The loop ends when
    /// the frontier is empty or the page cap is reached.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutcome)` - The result table (in pop order) and statistics
    /// * `Err(CrawlError::Fetch)` - A fetch failed under the abort policy
    pub async fn crawl(&mut self, seed_url: &str) -> Result<CrawlOutcome, CrawlError> {
        tracing::info!("Starting crawl at {}", seed_url);

        let mut table = ResultTable::new();
        let mut stats = CrawlStatistics::new();

        if !self.scheduler.push(seed_url, DEFAULT_PRIORITY) {
            tracing::info!("Seed {} already visited, nothing to do", seed_url);
        }

        while !self.scheduler.is_empty() {
            if let Some(max_pages) = self.settings.max_pages {
                if stats.pages_attempted() >= u64::from(max_pages) {
                    tracing::info!(
                        "Reached page cap of {}, {} URLs left in frontier",
                        max_pages,
                        self.scheduler.frontier_size()
                    );
                    stats.stopped_at_page_cap = true;
                    break;
                }
            }

            let Some(queued) = self.scheduler.pop() else {
                break;
            };
            tracing::debug!("Processing URL: {} (priority {})", queued.url, queued.priority);

            let body = match self.fetcher.fetch(&queued.url).await {
                Ok(body) => body,
                Err(error) => match self.settings.on_fetch_error {
                    FetchErrorPolicy::Abort => {
                        tracing::error!("Fetch failed for {}: {}, aborting crawl", queued.url, error);
                        return Err(CrawlError::Fetch {
                            url: queued.url,
                            source: error,
                        });
                    }
                    FetchErrorPolicy::Skip => {
                        tracing::warn!("Fetch failed for {}: {}, skipping", queued.url, error);
                        stats.record_failure(&queued.url, error);
                        continue;
                    }
                },
            };
            stats.pages_fetched += 1;

            self.process_body(&queued.url, &body, &mut table, &mut stats);

            if stats.pages_fetched % PROGRESS_INTERVAL == 0 {
                tracing::info!(
                    "Progress: {} pages fetched, {} products, {} in frontier",
                    stats.pages_fetched,
                    stats.records_extracted,
                    self.scheduler.frontier_size()
                );
            }
        }

        stats.finish();
        tracing::info!(
            "Crawl completed: {} pages fetched, {} failed, {} products",
            stats.pages_fetched,
            stats.failed_pages.len(),
            stats.records_extracted
        );

        Ok(CrawlOutcome { table, stats })
    }

    /// Runs both extractors over a fetched body
    ///
    /// Each extractor tokenizes the body independently.
    fn process_body(
        &mut self,
        page_url: &str,
        body: &[u8],
        table: &mut ResultTable,
        stats: &mut CrawlStatistics,
    ) {
        let links = extract_links(body, &self.scope);
        let product = extract_product(body, page_url);

        for link in &links {
            stats.links_discovered += 1;
            let priority = self.scope.priority_for(link);
            if self.scheduler.push(link, priority) {
                stats.links_enqueued += 1;
                tracing::trace!("Queued {} (priority {})", link, priority);
            }
        }

        if let Some(record) = product {
            tracing::debug!("Extracted product '{}' from {}", record.name, page_url);
            stats.records_extracted += 1;
            table.push(record);
        }
    }
}

/// Runs a complete crawl from configuration
///
/// Validates the configuration, builds the HTTP fetcher and catalog scope,
/// then crawls from the configured seed.
///
/// # Example
///
/// ```no_run
/// use catalog_crawler::config::load_config;
/// use catalog_crawler::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("crawler.toml"))?;
/// let outcome = run_crawl(&config).await?;
/// println!("{} products", outcome.table.records().len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlOutcome, CrawlError> {
    validate(config)?;

    let fetcher = HttpFetcher::from_config(&config.user_agent, &config.http)?;
    let scope = CatalogScope::new(&config.crawler.catalog_prefix)?;
    let settings = CrawlSettings {
        on_fetch_error: config.crawler.on_fetch_error,
        max_pages: config.crawler.max_pages,
    };

    let mut coordinator = Coordinator::new(fetcher, scope, settings);
    coordinator.crawl(&config.crawler.seed_url).await
}

/// Runs a crawl and writes the result table to the configured CSV path
///
/// A failed write is fatal and the accumulated records are lost with it.
pub async fn run_and_write(config: &Config) -> Result<CrawlOutcome, CrawlError> {
    let outcome = run_crawl(config).await?;
    write_csv(&outcome.table, Path::new(&config.output.csv_path))?;
    Ok(outcome)
}
