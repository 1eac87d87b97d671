use serde::Deserialize;

/// Catalog prefix crawled when none is configured
pub const DEFAULT_CATALOG_PREFIX: &str = "https://scrapeme.live/shop";

/// Output path used when none is configured
pub const DEFAULT_CSV_PATH: &str = "results/products.csv";

/// Main configuration structure for the catalog crawler
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// URL the crawl starts from
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Base shop path; URLs containing it are in scope
    #[serde(rename = "catalog-prefix", default = "default_catalog_prefix")]
    pub catalog_prefix: String,

    /// What to do when a single page cannot be fetched
    #[serde(rename = "on-fetch-error", default)]
    pub on_fetch_error: FetchErrorPolicy,

    /// Maximum number of pages to fetch (unbounded when absent)
    #[serde(rename = "max-pages", default)]
    pub max_pages: Option<u32>,
}

/// Policy applied to per-URL fetch and body-read failures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchErrorPolicy {
    /// Record the failure and continue with the next URL
    #[default]
    Skip,

    /// Stop the crawl and discard accumulated records
    Abort,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the user agent header value
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the CSV result table
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
        }
    }
}

fn default_catalog_prefix() -> String {
    DEFAULT_CATALOG_PREFIX.to_string()
}

fn default_csv_path() -> String {
    DEFAULT_CSV_PATH.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}
