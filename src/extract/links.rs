//! Catalog link extraction
//!
//! Scans a page for anchors pointing back into the catalog. Duplicates are
//! kept; the scheduler is responsible for deduplication.

use crate::extract::markup::{HREF_ATTR, LINK_TAG};
use crate::extract::tokens::{MarkupEvent, TokenStream};
use crate::url::CatalogScope;

/// Extracts every in-catalog anchor href from a page body
///
/// Only start tags are considered; the values are returned verbatim, in
/// document order. A page without matching anchors yields an empty vector.
///
/// # Example
///
/// ```
/// use catalog_crawler::extract::extract_links;
/// use catalog_crawler::url::CatalogScope;
///
/// let scope = CatalogScope::new("https://scrapeme.live/shop").unwrap();
/// let html = r#"<a href="https://scrapeme.live/shop/page/2/">2</a><a href="/about">About</a>"#;
/// let links = extract_links(html.as_bytes(), &scope);
/// assert_eq!(links, vec!["https://scrapeme.live/shop/page/2/"]);
/// ```
pub fn extract_links(body: &[u8], scope: &CatalogScope) -> Vec<String> {
    let mut links = Vec::new();

    for event in TokenStream::new(body) {
        match event {
            MarkupEvent::End => break,
            MarkupEvent::StartTag(tag) if tag.name == LINK_TAG => {
                for (key, value) in tag.attrs {
                    if key == HREF_ATTR && scope.contains(&value) {
                        links.push(value);
                    }
                }
            }
            _ => {}
        }
    }

    links
}
