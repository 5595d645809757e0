use crate::result::AltTextRecord;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use super::static_selector;

pub const MISSING_ALT_TEXT: &str = "This image has no ALT text!";

static MISSING_ALT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| static_selector("img:not([alt])"));
static WITH_ALT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| static_selector("img[alt]"));

/// Audits image alt attributes: images without one first, then the rest.
pub fn extract_alt_text(document: &Html) -> Vec<AltTextRecord> {
    let missing = document
        .select(&MISSING_ALT_SELECTOR)
        .map(|image| record(image, None));
    let present = document
        .select(&WITH_ALT_SELECTOR)
        .map(|image| record(image, image.value().attr("alt")));

    missing.chain(present).collect()
}

fn record(image: ElementRef<'_>, alt: Option<&str>) -> AltTextRecord {
    AltTextRecord {
        image: image.html(),
        src: image.value().attr("src").map(String::from),
        alt: alt.unwrap_or(MISSING_ALT_TEXT).to_string(),
        has_alt: alt.is_some(),
    }
}
