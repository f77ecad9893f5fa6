//! Stopword filtering
//!
//! English comes from the `stop-words` crate. Korean has no list there, so
//! a short list of free-standing function words and spoken fillers is built
//! in. Lecture transcripts mix Korean with English terms, so the default
//! filter is the union of both.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// A filter for removing stopwords from text
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::for_languages(&["ko", "en"])
    }
}

impl StopwordFilter {
    /// Stopwords for `"ko"` or `"en"`; any other code yields English.
    pub fn new(language: &str) -> Self {
        Self {
            stopwords: Self::load_stopwords(language),
        }
    }

    /// Union of the stopword lists of several languages
    pub fn for_languages(languages: &[&str]) -> Self {
        let stopwords = languages
            .iter()
            .flat_map(|lang| Self::load_stopwords(lang))
            .collect();
        Self { stopwords }
    }

    /// Create an empty stopword filter (no filtering)
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    /// Create a stopword filter from a custom list
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Extend the filter, e.g. with course-specific filler terms
    pub fn add_stopwords(&mut self, words: &[&str]) {
        self.stopwords.extend(words.iter().map(|w| w.to_lowercase()));
    }

    /// Check if a word is a stopword (case-insensitive)
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    fn load_stopwords(language: &str) -> FxHashSet<String> {
        match language.to_lowercase().as_str() {
            "ko" | "korean" => Self::korean_stopwords(),
            _ => get(LANGUAGE::English).iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Free-standing Korean function words and spoken fillers
    fn korean_stopwords() -> FxHashSet<String> {
        [
            "그리고", "그러나", "그런데", "그래서", "그러면", "그러니까", "하지만", "또는", "및",
            "즉", "이", "그", "저", "것", "수", "등", "때", "더", "또", "좀", "잘", "안", "못",
            "네", "예", "아", "음", "어", "자", "막", "뭐", "이제", "지금", "그냥", "정말", "진짜",
            "이런", "그런", "저런", "이렇게", "그렇게", "있습니다", "합니다", "입니다", "있는",
            "하는", "되는",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}
