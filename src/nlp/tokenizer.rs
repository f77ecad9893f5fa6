//! Word tokenization
//!
//! Splits text on Unicode word boundaries (UAX #29), lowercases, and drops
//! stopwords and tokens without any alphanumeric character.

use unicode_segmentation::UnicodeSegmentation;

use super::stopwords::StopwordFilter;

#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    stopwords: StopwordFilter,
}

impl Tokenizer {
    pub fn new(stopwords: StopwordFilter) -> Self {
        Self { stopwords }
    }

    /// Content-word tokens of `text`, in order.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .map(str::to_lowercase)
            .filter(|w| w.chars().any(char::is_alphanumeric))
            .filter(|w| !self.stopwords.is_stopword(w))
            .collect()
    }
}
