use crate::result::{HeadingInventory, HeadingLevel};
use scraper::{Html, Selector};
use std::sync::LazyLock;

use super::static_selector;

static HEADING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| static_selector("h1, h2, h3, h4, h5, h6"));

/// Buckets every heading's full text by level, in document order.
pub fn extract_headings(document: &Html) -> HeadingInventory {
    let mut inventory = HeadingInventory::new();

    for element in document.select(&HEADING_SELECTOR) {
        if let Some(level) = HeadingLevel::from_tag(element.value().name()) {
            inventory.record(level, element.text().collect());
        }
    }

    inventory
}
