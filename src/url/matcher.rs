use regex::Regex;

/// Priority given to pagination URLs
pub const PAGINATION_PRIORITY: u32 = 2;

/// Priority given to every other catalog URL, and to the seed
pub const DEFAULT_PRIORITY: u32 = 1;

/// Recognizes catalog and pagination URLs for one shop
///
/// A URL belongs to the catalog when its text contains the catalog prefix.
/// A pagination URL is the prefix followed by `/page/<digits>` with an
/// optional trailing slash, and nothing else.
#[derive(Debug, Clone)]
pub struct CatalogScope {
    prefix: String,
    pagination: Regex,
}

impl CatalogScope {
    /// Builds the scope for a catalog prefix such as `https://scrapeme.live/shop`
    ///
    /// A trailing slash on the prefix is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_crawler::url::CatalogScope;
    ///
    /// let scope = CatalogScope::new("https://scrapeme.live/shop/").unwrap();
    /// assert!(scope.is_pagination("https://scrapeme.live/shop/page/2/"));
    /// assert!(scope.is_pagination("https://scrapeme.live/shop/page/10"));
    /// assert!(!scope.is_pagination("https://scrapeme.live/shop/Pikachu/"));
    /// ```
    pub fn new(prefix: &str) -> Result<Self, regex::Error> {
        let prefix = prefix.trim_end_matches('/').to_string();
        let pagination = Regex::new(&format!(r"^{}/page/\d+/?$", regex::escape(&prefix)))?;

        Ok(Self { prefix, pagination })
    }

    /// The catalog prefix, without trailing slash
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns true if the URL text contains the catalog prefix
    pub fn contains(&self, url: &str) -> bool {
        url.contains(&self.prefix)
    }

    /// Returns true if the URL is a catalog listing page
    pub fn is_pagination(&self, url: &str) -> bool {
        self.pagination.is_match(url)
    }

    /// Frontier priority for a discovered URL
    pub fn priority_for(&self, url: &str) -> u32 {
        if self.is_pagination(url) {
            PAGINATION_PRIORITY
        } else {
            DEFAULT_PRIORITY
        }
    }
}
