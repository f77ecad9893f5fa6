//! Transcript normalization
//!
//! Speech-to-text output is full of discourse fillers ("음", "그러니까"),
//! stuttered repeats ("네 네 네") and short fragments. [`FillerPreprocessor`]
//! removes them before segmentation:
//!
//! 1. Strip whole-word fillers together with trailing commas/whitespace.
//! 2. Collapse runs of an identical word into one occurrence.
//! 3. Collapse whitespace.
//! 4. Split on `.`/`?`/`!` followed by whitespace and drop fragments shorter
//!    than `min_sentence_chars` characters.

use regex::Regex;
use tracing::{debug, warn};

use crate::pipeline::traits::Preprocessor;
use crate::types::{PreprocessConfig, SummaryConfig};

/// Default [`Preprocessor`] for spoken transcripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct FillerPreprocessor;

impl FillerPreprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Build one alternation regex matching any filler as a whole word.
    ///
    /// Longer fillers come first so multi-word entries win over their
    /// prefixes.
    fn filler_regex(words: &[String]) -> Option<Regex> {
        let mut words: Vec<&str> = words
            .iter()
            .map(|w| w.trim())
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return None;
        }
        words.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        let alternation = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        match Regex::new(&format!(r"\b(?:{alternation})\b[,\s]*")) {
            Ok(re) => Some(re),
            Err(err) => {
                warn!(error = %err, "filler word list does not compile; skipping filler removal");
                None
            }
        }
    }

    /// Collapse a word repeated back to back ("네 네 네" -> "네").
    ///
    /// Only word characters are compared. A repeat counts when the previous
    /// token ends in the word and the next token starts with exactly that
    /// word, so "관리 관리." collapses to "관리." while "Stop. Stop." stays
    /// two sentences. The last repeat's trailing punctuation is kept.
    fn collapse_repeats(text: &str) -> String {
        let mut out: Vec<String> = Vec::new();
        for token in text.split_whitespace() {
            let lead = leading_word(token);
            if let Some(prev) = out.last_mut() {
                let tail = trailing_word(prev);
                if !lead.is_empty() && tail == lead {
                    let keep = prev.len() - tail.len();
                    prev.truncate(keep);
                    prev.push_str(token);
                    continue;
                }
            }
            out.push(token.to_string());
        }
        out.join(" ")
    }

    /// Split on terminal punctuation followed by whitespace.
    fn rough_sentences(text: &str) -> Vec<&str> {
        let mut pieces = Vec::new();
        let mut start = 0;
        let mut prev_terminal = false;
        for (i, c) in text.char_indices() {
            if c.is_whitespace() && prev_terminal {
                pieces.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            prev_terminal = matches!(c, '.' | '?' | '!');
        }
        pieces.push(&text[start..]);
        pieces
    }

    fn run(text: &str, cfg: &PreprocessConfig) -> String {
        let mut processed = match Self::filler_regex(&cfg.filler_words) {
            Some(re) => re.replace_all(text, " ").into_owned(),
            None => text.to_string(),
        };

        if cfg.collapse_repeats {
            processed = Self::collapse_repeats(&processed);
        }

        let processed = processed.split_whitespace().collect::<Vec<_>>().join(" ");

        Self::rough_sentences(&processed)
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty() && s.chars().count() >= cfg.min_sentence_chars)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// The run of word characters a token starts with.
fn leading_word(token: &str) -> &str {
    let end = token
        .char_indices()
        .find(|&(_, c)| !is_word_char(c))
        .map_or(token.len(), |(i, _)| i);
    &token[..end]
}

/// The run of word characters a token ends with.
fn trailing_word(token: &str) -> &str {
    let start = token
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_word_char(c))
        .last()
        .map_or(token.len(), |(i, _)| i);
    &token[start..]
}

impl Preprocessor for FillerPreprocessor {
    fn normalize(&self, text: &str, cfg: &SummaryConfig) -> String {
        let processed = Self::run(text, &cfg.preprocess);
        if processed != text {
            debug!(
                input_chars = text.chars().count(),
                output_chars = processed.chars().count(),
                "transcript normalized"
            );
        }
        processed
    }
}
