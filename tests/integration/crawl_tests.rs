//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small catalog and run the full crawl
//! cycle end-to-end through the HTTP fetcher.

use catalog_crawler::config::{
    Config, CrawlerConfig, FetchErrorPolicy, HttpConfig, OutputConfig, UserAgentConfig,
};
use catalog_crawler::crawler::{run_and_write, run_crawl, Fetcher, HttpFetcher};
use catalog_crawler::output::OutputError;
use catalog_crawler::{ConfigError, CrawlError, FetchError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration for a catalog served by the mock server
fn create_test_config(base_url: &str, csv_path: &str) -> Config {
    Config {
        crawler: CrawlerConfig {
            seed_url: format!("{}/shop/", base_url),
            catalog_prefix: format!("{}/shop", base_url),
            on_fetch_error: FetchErrorPolicy::Skip,
            max_pages: None,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        http: HttpConfig {
            timeout_secs: 5,
            connect_timeout_secs: 2,
        },
        output: OutputConfig {
            csv_path: csv_path.to_string(),
        },
    }
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=UTF-8")
}

fn product_page(name: &str, price: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>{name} – ScrapeMe</title></head>
<body>
<div class="site-header-cart"><a class="cart-contents" href="/cart/"><span class="woocommerce-Price-amount amount"><span class="woocommerce-Price-currencySymbol">&pound;</span>0.00</span></a></div>
<div class="product">
  <div class="images"><img width="350" height="350" src="/img/{lower}.png" class="attachment-shop_single size-shop_single wp-post-image" alt=""></div>
  <div class="summary">
    <h1 class="product_title entry-title">{name}</h1>
    <p class="price"><span class="woocommerce-Price-amount amount"><span class="woocommerce-Price-currencySymbol">&pound;</span>{price}</span></p>
  </div>
</div>
</body></html>"#,
        lower = name.to_lowercase()
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html_response(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_of_small_catalog() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Listing page 1 links to page 2, one product, and out-of-catalog pages
    mount_page(
        &mock_server,
        "/shop/",
        format!(
            r#"<html><body>
            <a href="{base}/shop/Bulbasaur/">Bulbasaur</a>
            <a href="{base}/shop/page/2/">2</a>
            <a href="{base}/cart/">Cart</a>
            <a href="https://elsewhere.example/">Elsewhere</a>
            </body></html>"#,
            base = base_url
        ),
        1,
    )
    .await;

    mount_page(
        &mock_server,
        "/shop/page/2/",
        format!(
            r#"<html><body>
            <a href="{base}/shop/">1</a>
            <a href="{base}/shop/Ivysaur/">Ivysaur</a>
            <a href="{base}/shop/Bulbasaur/">Bulbasaur</a>
            </body></html>"#,
            base = base_url
        ),
        1,
    )
    .await;

    mount_page(
        &mock_server,
        "/shop/Bulbasaur/",
        product_page("Bulbasaur", "63.00"),
        1,
    )
    .await;
    mount_page(&mock_server, "/shop/Ivysaur/", product_page("Ivysaur", "87.00"), 1).await;

    // Out-of-catalog link must never be followed
    mount_page(&mock_server, "/cart/", "<html></html>".to_string(), 0).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = dir.path().join("results").join("products.csv");
    let config = create_test_config(&base_url, csv_path.to_str().unwrap());

    let outcome = run_and_write(&config).await.expect("Crawl failed");

    assert_eq!(outcome.stats.pages_fetched, 4);
    assert!(outcome.stats.failed_pages.is_empty());
    assert_eq!(outcome.table.row_count(), 3);

    // Products pop in discovery order once pagination is drained
    let names: Vec<&str> = outcome
        .table
        .records()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["Bulbasaur", "Ivysaur"]);

    let content = std::fs::read_to_string(&csv_path).expect("Failed to read CSV");
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines[0], "Url,Image,Name,Price");
    assert_eq!(
        lines[1],
        format!(
            "{}/shop/Bulbasaur/,/img/bulbasaur.png,Bulbasaur,£63.00",
            base_url
        )
    );
    assert_eq!(
        lines[2],
        format!("{}/shop/Ivysaur/,/img/ivysaur.png,Ivysaur,£87.00", base_url)
    );
}

#[tokio::test]
async fn test_failed_page_is_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/shop/",
        format!(
            r#"<a href="{base}/shop/gone/">Gone</a><a href="{base}/shop/Pidgey/">Pidgey</a>"#,
            base = base_url
        ),
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/shop/gone/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, "/shop/Pidgey/", product_page("Pidgey", "12.00"), 1).await;

    let config = create_test_config(&base_url, "unused.csv");
    let outcome = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(outcome.table.row_count(), 2);
    assert_eq!(outcome.stats.failed_pages.len(), 1);
    assert_eq!(
        outcome.stats.failed_pages[0].error,
        FetchError::Status { status: 404 }
    );
}

#[tokio::test]
async fn test_abort_policy_discards_progress() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/shop/",
        format!(
            r#"<a href="{base}/shop/page/2/">2</a><a href="{base}/shop/Pidgey/">Pidgey</a>"#,
            base = base_url
        ),
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/shop/page/2/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Never reached: page 2 has higher priority and aborts the crawl first
    mount_page(&mock_server, "/shop/Pidgey/", product_page("Pidgey", "12.00"), 0).await;

    let mut config = create_test_config(&base_url, "unused.csv");
    config.crawler.on_fetch_error = FetchErrorPolicy::Abort;

    let result = run_crawl(&config).await;
    match result {
        Err(CrawlError::Fetch { url, source }) => {
            assert_eq!(url, format!("{}/shop/page/2/", base_url));
            assert_eq!(source, FetchError::Status { status: 500 });
        }
        other => panic!("Expected fetch error, got {:?}", other.map(|o| o.stats)),
    }
}

#[tokio::test]
async fn test_page_cap_stops_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/shop/",
        format!(
            r#"<a href="{base}/shop/page/2/">2</a><a href="{base}/shop/Pidgey/">Pidgey</a>"#,
            base = base_url
        ),
        1,
    )
    .await;
    mount_page(&mock_server, "/shop/page/2/", "<html></html>".to_string(), 1).await;
    mount_page(&mock_server, "/shop/Pidgey/", product_page("Pidgey", "12.00"), 0).await;

    let mut config = create_test_config(&base_url, "unused.csv");
    config.crawler.max_pages = Some(2);

    let outcome = run_crawl(&config).await.expect("Crawl failed");

    assert!(outcome.stats.stopped_at_page_cap);
    assert_eq!(outcome.stats.pages_fetched, 2);
    assert_eq!(outcome.table.row_count(), 1);
}

#[tokio::test]
async fn test_http_fetcher_sends_user_agent() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server.uri(), "unused.csv");

    Mock::given(method("GET"))
        .and(path("/shop/"))
        .and(header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/contact; test@example.com)",
        ))
        .respond_with(html_response("<html>ok</html>".to_string()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::from_config(&config.user_agent, &config.http)
        .expect("Failed to build fetcher");
    let body = fetcher
        .fetch(&config.crawler.seed_url)
        .await
        .expect("Fetch failed");

    assert_eq!(body, b"<html>ok</html>".to_vec());
}

#[tokio::test]
async fn test_failed_write_is_fatal() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/shop/", product_page("Pidgey", "12.00"), 1).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let blocker = dir.path().join("results");
    std::fs::write(&blocker, "not a directory").expect("Failed to create file");
    let csv_path = blocker.join("products.csv");
    let config = create_test_config(&base_url, csv_path.to_str().unwrap());

    let result = run_and_write(&config).await;
    assert!(matches!(
        result,
        Err(CrawlError::Output(OutputError::Io(_)))
    ));
}

#[tokio::test]
async fn test_invalid_config_is_rejected_before_fetching() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/shop/", "<html></html>".to_string(), 0).await;

    let mut config = create_test_config(&base_url, "unused.csv");
    config.crawler.seed_url = format!("{}/cart/", base_url);

    let result = run_crawl(&config).await;
    assert!(matches!(
        result,
        Err(CrawlError::Config(ConfigError::Validation(_)))
    ));
}
