//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests to fetch page bodies
//! - Error classification

use crate::config::{HttpConfig, UserAgentConfig};
use crate::{FetchError, FetchResult};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Source of page bodies for the crawl
///
/// The coordinator awaits one fetch at a time. Implementations return the
/// complete body, so nothing stays open once `fetch` returns.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the raw body of a URL
    async fn fetch(&self, url: &str) -> FetchResult<Vec<u8>>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `http` - Timeouts for requests and connections
///
/// # Example
///
/// ```no_run
/// use catalog_crawler::config::{HttpConfig, UserAgentConfig};
/// use catalog_crawler::crawler::build_http_client;
///
/// let user_agent = UserAgentConfig {
///     crawler_name: "CatalogCrawler".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&user_agent, &HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    http: &HttpConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(http.timeout_secs))
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher from configuration
    pub fn from_config(
        user_agent: &UserAgentConfig,
        http: &HttpConfig,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(user_agent, http)?))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    /// Fetches a URL and classifies any failure
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 2xx | body bytes |
    /// | Other status | `Status` |
    /// | Timeout | `Timeout` |
    /// | Connection refused, DNS, TLS | `Connect` |
    /// | Body read failure | `Body` |
    /// | Anything else | `Network` |
    async fn fetch(&self, url: &str) -> FetchResult<Vec<u8>> {
        let response = self.client.get(url).send().await.map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        tracing::trace!("Fetched {} ({} bytes)", url, body.len());
        Ok(body.to_vec())
    }
}

/// Maps a transport error onto the fetch error taxonomy
fn classify_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else {
        FetchError::Network(error.to_string())
    }
}
