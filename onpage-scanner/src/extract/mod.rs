//! On-page feature extractors.
//!
//! Each extractor takes the parsed document (links also take the page URL)
//! and returns one fragment of the [`PageReport`](crate::result::PageReport).
//! They have no side effects beyond tracing and can run in any order.

mod alt_text;
mod headings;
mod keywords;
mod links;
mod meta;
mod title;

pub use alt_text::{MISSING_ALT_TEXT, extract_alt_text};
pub use headings::extract_headings;
pub use keywords::{KEYWORD_LIMIT, extract_keywords};
pub use links::{MalformedLink, PageAuthority, extract_links};
pub use meta::{META_LENGTH_RANGE, extract_meta};
pub use title::{TITLE_LENGTH_RANGE, extract_title};

use scraper::Selector;

/// Parses a selector written in source. Only ever called with literals.
pub(crate) fn static_selector(css: &'static str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector '{css}': {e}"))
}
