//! Product field extraction
//!
//! A small state machine over the page's token stream that fills three
//! slots (image, name, price) and yields a record only once all of them are
//! non-empty.
//!
//! # Rules
//!
//! | Trigger | Action |
//! |---------|--------|
//! | `h1` whose class contains `product_title` | next token, if text, becomes the name |
//! | `img` whose class contains `wp-post-image` | its `src` becomes the image |
//! | `span` with an attribute value equal to the currency marker | count it; on the second occurrence read text, skip one token, read text, concatenate |
//!
//! Start and self-closing tags trigger alike. Extraction stops as soon as all
//! three slots are filled; reaching the end of the stream first yields no
//! record.
//!
//! The price rule follows the target page template, where the symbol text is
//! followed by the closing span and then the amount text.

use crate::extract::markup::{
    CLASS_ATTR, CURRENCY_SYMBOL_MARKER, HEADER1_TAG, IMAGE_TAG, POST_IMAGE_CLASS,
    PRICE_MARKER_OCCURRENCE, PRODUCT_TITLE_CLASS, SOURCE_ATTR, SPAN_TAG,
};
use crate::extract::tokens::{MarkupEvent, Tag, TokenStream};

/// A product extracted from a single page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub url: String,
    pub image: String,
    pub name: String,
    pub price: String,
}

impl ProductRecord {
    /// The record's fields in table column order
    pub fn to_row(&self) -> [&str; 4] {
        [&self.url, &self.image, &self.name, &self.price]
    }
}

/// Accumulator state for one page
#[derive(Debug, Default)]
pub struct ProductExtractor {
    image: Option<String>,
    name: Option<String>,
    price: Option<String>,
    /// Currency-marker spans seen so far
    marker_count: u32,
}

fn filled(slot: &Option<String>) -> Option<&str> {
    slot.as_deref().filter(|value| !value.is_empty())
}

impl ProductExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the record if every slot is non-empty
    pub fn complete(&self, page_url: &str) -> Option<ProductRecord> {
        Some(ProductRecord {
            url: page_url.to_string(),
            image: filled(&self.image)?.to_string(),
            name: filled(&self.name)?.to_string(),
            price: filled(&self.price)?.to_string(),
        })
    }

    /// Drives the state machine until a record is complete or the stream ends
    pub fn run<I>(mut self, tokens: &mut I, page_url: &str) -> Option<ProductRecord>
    where
        I: Iterator<Item = MarkupEvent>,
    {
        loop {
            if let Some(record) = self.complete(page_url) {
                return Some(record);
            }

            match tokens.next() {
                None | Some(MarkupEvent::End) => return None,
                Some(MarkupEvent::StartTag(tag)) | Some(MarkupEvent::SelfClosingTag(tag)) => {
                    self.on_tag(&tag, tokens)
                }
                Some(_) => {}
            }
        }
    }

    fn on_tag<I>(&mut self, tag: &Tag, tokens: &mut I)
    where
        I: Iterator<Item = MarkupEvent>,
    {
        match tag.name.as_str() {
            HEADER1_TAG => self.on_heading(tag, tokens),
            IMAGE_TAG => self.on_image(tag),
            SPAN_TAG => self.on_span(tag, tokens),
            _ => {}
        }
    }

    fn on_heading<I>(&mut self, tag: &Tag, tokens: &mut I)
    where
        I: Iterator<Item = MarkupEvent>,
    {
        for (key, value) in &tag.attrs {
            if key == CLASS_ATTR && value.contains(PRODUCT_TITLE_CLASS) {
                // The following token is consumed whatever it is.
                if let Some(MarkupEvent::Text(text)) = tokens.next() {
                    self.name = Some(text);
                }
            }
        }
    }

    fn on_image(&mut self, tag: &Tag) {
        let class = tag.attr(CLASS_ATTR).unwrap_or_default();
        if class.contains(POST_IMAGE_CLASS) {
            self.image = Some(tag.attr(SOURCE_ATTR).unwrap_or_default().to_string());
        }
    }

    fn on_span<I>(&mut self, tag: &Tag, tokens: &mut I)
    where
        I: Iterator<Item = MarkupEvent>,
    {
        for (_, value) in &tag.attrs {
            if value != CURRENCY_SYMBOL_MARKER {
                continue;
            }

            self.marker_count += 1;
            if self.marker_count != PRICE_MARKER_OCCURRENCE {
                continue;
            }

            if let Some(MarkupEvent::Text(symbol)) = tokens.next() {
                self.price = Some(symbol);
                tokens.next();
            }
            if let Some(MarkupEvent::Text(amount)) = tokens.next() {
                self.price.get_or_insert_with(String::new).push_str(&amount);
            }
        }
    }
}

/// Extracts a product record from a page body
///
/// Returns `None` when the page lacks any of the image, name, or price
/// markup. This is absence, not an error.
///
/// # Example
///
/// ```
/// use catalog_crawler::extract::extract_product;
///
/// let html = r#"<html><body><p>No product here</p></body></html>"#;
/// assert!(extract_product(html.as_bytes(), "https://scrapeme.live/shop/").is_none());
/// ```
pub fn extract_product(body: &[u8], page_url: &str) -> Option<ProductRecord> {
    let mut tokens = TokenStream::new(body);
    ProductExtractor::new().run(&mut tokens, page_url)
}
