//! Page extraction over a lazy markup token stream
//!
//! This module contains:
//! - The token stream abstraction over the HTML tokenizer
//! - Catalog link extraction
//! - Product field extraction
//!
//! Both extractors take the raw page body and build their own token stream,
//! so they never share a read position.

pub mod markup;
mod links;
mod product;
mod tokens;

pub use links::extract_links;
pub use product::{extract_product, ProductExtractor, ProductRecord};
pub use tokens::{MarkupEvent, Tag, TokenStream};
