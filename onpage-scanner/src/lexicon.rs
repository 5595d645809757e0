//! Tokenizer and English stop-word set used by keyword analysis.
//!
//! The stop-word list is bundled with the crate and loaded once per
//! process. Everything here is read-only after [`init`].

use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

const ENGLISH_STOP_WORDS: &str = include_str!("../stopwords/english.txt");

const APOSTROPHES: [char; 2] = ['\'', '\u{2019}'];

static STOP_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();

/// Loads the stop-word set. Safe to call any number of times.
pub fn init() {
    stop_words();
}

pub fn stop_words() -> &'static HashSet<&'static str> {
    STOP_WORDS.get_or_init(|| {
        let words: HashSet<&'static str> = ENGLISH_STOP_WORDS
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();
        debug!("Loaded {} English stop words", words.len());
        words
    })
}

pub fn is_stop_word(word: &str) -> bool {
    stop_words().contains(word)
}

/// Splits text on Unicode word boundaries, dropping punctuation and whitespace.
///
/// Possessives and contractions are cut at the apostrophe and only the stem
/// is kept, so "Rust's" yields "Rust" and "don't" yields "don". Contraction
/// stems ("don", "isn", "won") are in the stop-word list.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.unicode_words()
        .filter_map(|word| word.split(APOSTROPHES).next().filter(|stem| !stem.is_empty()))
}
