use crate::config::types::{Config, CrawlerConfig, HttpConfig, OutputConfig, UserAgentConfig};
use crate::url::{is_absolute_http, CatalogScope};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_http_url("seed_url", &config.seed_url)?;
    validate_http_url("catalog_prefix", &config.catalog_prefix)?;

    let scope = CatalogScope::new(&config.catalog_prefix).map_err(|e| {
        ConfigError::Validation(format!("catalog_prefix is not a usable pattern: {}", e))
    })?;

    if !scope.contains(&config.seed_url) {
        return Err(ConfigError::Validation(format!(
            "seed_url '{}' is outside the catalog '{}'",
            config.seed_url,
            scope.prefix()
        )));
    }

    if config.max_pages == Some(0) {
        return Err(ConfigError::Validation(
            "max_pages must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates that a value is an absolute http(s) URL
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if !is_absolute_http(value) {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must be an absolute http(s) URL",
            field, value
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    // Basic email format check: must contain @ and have text on both sides
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::FetchErrorPolicy;

    fn crawler_config(seed: &str, prefix: &str) -> CrawlerConfig {
        CrawlerConfig {
            seed_url: seed.to_string(),
            catalog_prefix: prefix.to_string(),
            on_fetch_error: FetchErrorPolicy::Skip,
            max_pages: None,
        }
    }

    #[test]
    fn test_validate_crawler_config() {
        assert!(validate_crawler_config(&crawler_config(
            "https://scrapeme.live/shop/",
            "https://scrapeme.live/shop"
        ))
        .is_ok());

        assert!(validate_crawler_config(&crawler_config(
            "http://127.0.0.1:9000/shop/page/1/",
            "http://127.0.0.1:9000/shop"
        ))
        .is_ok());
    }

    #[test]
    fn test_seed_outside_catalog() {
        let result = validate_crawler_config(&crawler_config(
            "https://scrapeme.live/cart/",
            "https://scrapeme.live/shop",
        ));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_relative_seed_rejected() {
        let result = validate_crawler_config(&crawler_config("/shop/", "https://scrapeme.live/shop"));
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));

        let result = validate_crawler_config(&crawler_config(
            "ftp://scrapeme.live/shop/",
            "https://scrapeme.live/shop",
        ));
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_zero_max_pages_rejected() {
        let mut config = crawler_config("https://scrapeme.live/shop/", "https://scrapeme.live/shop");
        config.max_pages = Some(0);
        assert!(validate_crawler_config(&config).is_err());

        config.max_pages = Some(1);
        assert!(validate_crawler_config(&config).is_ok());
    }

    #[test]
    fn test_validate_http_config() {
        assert!(validate_http_config(&HttpConfig::default()).is_ok());
        assert!(validate_http_config(&HttpConfig {
            timeout_secs: 0,
            connect_timeout_secs: 10,
        })
        .is_err());
        assert!(validate_http_config(&HttpConfig {
            timeout_secs: 30,
            connect_timeout_secs: 0,
        })
        .is_err());
    }

    #[test]
    fn test_empty_csv_path_rejected() {
        assert!(validate_output_config(&OutputConfig::default()).is_ok());

        let result = validate_output_config(&OutputConfig {
            csv_path: String::new(),
        });
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("admin@sub.example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());
    }
}
