use crate::lexicon;
use crate::result::KeywordRecord;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashMap;
use std::sync::LazyLock;

use super::static_selector;

pub const KEYWORD_LIMIT: usize = 20;

static BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| static_selector("body"));

const NON_CONTENT_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Most frequent non-stop-words in the page body, highest count first.
pub fn extract_keywords(document: &Html) -> Vec<KeywordRecord> {
    let Some(body) = document.select(&BODY_SELECTOR).next() else {
        return Vec::new();
    };

    let mut text = String::new();
    collect_text(body, &mut text);

    top_keywords(&text, KEYWORD_LIMIT)
}

/// Counts retained words and returns the `limit` most frequent.
/// Equal counts keep first-seen order.
pub fn top_keywords(text: &str, limit: usize) -> Vec<KeywordRecord> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for token in lexicon::tokenize(text) {
        let word = token.to_lowercase();
        if !word.chars().all(char::is_alphabetic) || lexicon::is_stop_word(&word) {
            continue;
        }
        match index.get(&word) {
            Some(&position) => counts[position].1 += 1,
            None => {
                index.insert(word.clone(), counts.len());
                counts.push((word, 1));
            }
        }
    }

    // stable: ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);

    counts
        .into_iter()
        .map(|(word, count)| KeywordRecord { word, count })
        .collect()
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(el) if NON_CONTENT_TAGS.contains(&el.name()) => {}
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, out);
                }
            }
            _ => {}
        }
    }
}
