use crate::result::MetaReport;
use scraper::{Html, Selector};
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use super::static_selector;

pub const META_LENGTH_RANGE: RangeInclusive<usize> = 150..=160;

static META_DESCRIPTION_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| static_selector("meta[name='description']"));

/// Collects every meta description, newline separated, and checks its length.
pub fn extract_meta(document: &Html) -> MetaReport {
    let meta = document
        .select(&META_DESCRIPTION_SELECTOR)
        .filter_map(|element| element.value().attr("content"))
        .collect::<Vec<_>>()
        .join("\n");

    if meta.is_empty() {
        return MetaReport {
            has_meta: false,
            meta: "None".to_string(),
            meta_len: "0".to_string(),
            meta_advice: "Meta Description Is Missing!!!".to_string(),
        };
    }

    let length = meta.chars().count();
    let meta_advice = if META_LENGTH_RANGE.contains(&length) {
        format!(
            "Meta description length is between {} and {} characters. Good Job!",
            META_LENGTH_RANGE.start(),
            META_LENGTH_RANGE.end()
        )
    } else {
        format!(
            "Meta description should be between {}-{} characters, current description is {} characters.",
            META_LENGTH_RANGE.start(),
            META_LENGTH_RANGE.end(),
            length
        )
    };

    MetaReport {
        has_meta: true,
        meta,
        meta_len: length.to_string(),
        meta_advice,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta_of(html: &str) -> MetaReport {
        extract_meta(&Html::parse_document(html))
    }

    #[test]
    fn test_no_meta_description() {
        let report = meta_of("<html><head><title>x</title></head></html>");
        assert!(!report.has_meta);
        assert_eq!(report.meta, "None");
        assert_eq!(report.meta_len, "0");
        assert_eq!(report.meta_advice, "Meta Description Is Missing!!!");
    }

    #[test]
    fn test_single_meta_description() {
        let report =
            meta_of(r#"<head><meta name="description" content="A page about cats"></head>"#);
        assert!(report.has_meta);
        assert_eq!(report.meta, "A page about cats");
        assert_eq!(report.meta_len, "17");
        assert_eq!(
            report.meta_advice,
            "Meta description should be between 150-160 characters, current description is 17 characters."
        );
    }

    #[test]
    fn test_multiple_meta_descriptions_are_newline_joined() {
        let report = meta_of(
            r#"<head>
                <meta name="description" content="first">
                <meta name="description" content="second">
            </head>"#,
        );
        assert_eq!(report.meta, "first\nsecond");
        assert_eq!(report.meta_len, "12");
    }

    #[test]
    fn test_meta_in_range() {
        let content = "d".repeat(155);
        let report = meta_of(&format!(
            r#"<head><meta name="description" content="{content}"></head>"#
        ));
        assert_eq!(report.meta_len, "155");
        assert!(report.meta_advice.ends_with("Good Job!"));
    }

    #[test]
    fn test_empty_content_is_missing() {
        let report = meta_of(r#"<head><meta name="description" content=""></head>"#);
        assert!(!report.has_meta);
        assert_eq!(report.meta_len, "0");
    }

    #[test]
    fn test_meta_without_content_attribute_is_ignored() {
        let report = meta_of(
            r#"<head><meta name="description"><meta name="description" content="kept"></head>"#,
        );
        assert_eq!(report.meta, "kept");
    }

    #[test]
    fn test_other_meta_tags_ignored() {
        let report = meta_of(r#"<head><meta name="keywords" content="a, b"></head>"#);
        assert!(!report.has_meta);
    }
}
