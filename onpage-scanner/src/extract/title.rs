use crate::result::TitleReport;
use scraper::{Html, Selector};
use std::ops::RangeInclusive;
use std::sync::LazyLock;
use tracing::debug;

use super::static_selector;

pub const TITLE_LENGTH_RANGE: RangeInclusive<usize> = 50..=70;

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| static_selector("title"));

/// Reports on the first `<title>` element and its length.
///
/// The text is kept exactly as parsed, surrounding whitespace included, and
/// the advisory counts characters of that raw text. Only an absent or
/// zero-length title is reported as missing.
pub fn extract_title(document: &Html) -> TitleReport {
    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>())
        .unwrap_or_default();

    if title.is_empty() {
        debug!("No title found in document");
        return TitleReport {
            has_title: false,
            title: "None".to_string(),
            title_length: "Title Is Missing!!!".to_string(),
        };
    }

    let length = title.chars().count();
    let title_length = if TITLE_LENGTH_RANGE.contains(&length) {
        format!(
            "Title length is between {} and {} characters. Good Job!",
            TITLE_LENGTH_RANGE.start(),
            TITLE_LENGTH_RANGE.end()
        )
    } else {
        format!(
            "Title should be between {}-{} characters, current title is {} characters.",
            TITLE_LENGTH_RANGE.start(),
            TITLE_LENGTH_RANGE.end(),
            length
        )
    };

    TitleReport {
        has_title: true,
        title,
        title_length,
    }
}
