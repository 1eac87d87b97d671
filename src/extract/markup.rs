//! Tag, attribute, and marker names the extractors look for

/// Anchor element
pub const LINK_TAG: &str = "a";

/// Primary heading element carrying the product name
pub const HEADER1_TAG: &str = "h1";

/// Image element carrying the product photo
pub const IMAGE_TAG: &str = "img";

/// Inline span element wrapping price fragments
pub const SPAN_TAG: &str = "span";

pub const HREF_ATTR: &str = "href";
pub const CLASS_ATTR: &str = "class";
pub const SOURCE_ATTR: &str = "src";

/// Class fragment identifying the product name heading
pub const PRODUCT_TITLE_CLASS: &str = "product_title";

/// Class fragment identifying the main product image
pub const POST_IMAGE_CLASS: &str = "wp-post-image";

/// Exact attribute value marking currency-symbol spans
pub const CURRENCY_SYMBOL_MARKER: &str = "woocommerce-Price-currencySymbol";

/// Which currency-marker occurrence on a page starts the price read
pub const PRICE_MARKER_OCCURRENCE: u32 = 2;
