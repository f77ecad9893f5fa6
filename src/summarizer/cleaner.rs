//! Per-sentence noise cleanup for the final summary
//!
//! Patterns run in a fixed order, each match replaced by a single space and
//! the result trimmed:
//!
//! 1. trailing and leading non-word runs
//! 2. repeated filler interjections (`아 아 아`)
//! 3. `xxx` redaction markers
//! 4. punctuation runs, dashes
//! 5. leftover leading/trailing symbols, whitespace runs
//!
//! A cleaned sentence without `.`, `?` or `!` at the end gets a period.

use regex::Regex;
use tracing::warn;

use crate::pipeline::artifacts::{Sentence, SummarySentence};
use crate::types::SummaryConfig;

const EDGE_PATTERNS: &[&str] = &[r"[\s\W_]+$", r"^[\s\W_]+"];

const TAIL_PATTERNS: &[&str] = &[
    r"\s*xxx\s*",
    r"(\s*([.?!,;:])){2,}",
    r"\s*-\s*",
    r"^\s*[\W_]+",
    r"[\W_]+\s*$",
    r"\s{2,}",
];

/// Normalizes residual transcript noise in selected sentences.
#[derive(Debug, Clone)]
pub struct NoiseCleaner {
    patterns: Vec<Regex>,
}

impl Default for NoiseCleaner {
    fn default() -> Self {
        Self::from_config(&SummaryConfig::default())
    }
}

impl NoiseCleaner {
    /// Build the pattern chain with one repeat-collapsing pattern per
    /// interjection.
    pub fn new<S: AsRef<str>>(interjections: &[S]) -> Self {
        let interjection_patterns = interjections
            .iter()
            .map(|w| w.as_ref().trim())
            .filter(|w| !w.is_empty())
            .map(|w| format!(r"(\s*{}\s*){{2,}}", regex::escape(w)));

        let sources: Vec<String> = EDGE_PATTERNS
            .iter()
            .map(|p| p.to_string())
            .chain(interjection_patterns)
            .chain(TAIL_PATTERNS.iter().map(|p| p.to_string()))
            .collect();

        let patterns = sources
            .iter()
            .filter_map(|src| match Regex::new(src) {
                Ok(re) => Some(re),
                Err(err) => {
                    warn!(pattern = %src, error = %err, "skipping noise pattern that does not compile");
                    None
                }
            })
            .collect();

        Self { patterns }
    }

    pub fn from_config(cfg: &SummaryConfig) -> Self {
        Self::new(&cfg.filler_interjections)
    }

    /// Clean one sentence. `None` if nothing is left.
    pub fn clean(&self, text: &str) -> Option<String> {
        let mut cleaned = text.trim().to_string();
        for re in &self.patterns {
            cleaned = re.replace_all(&cleaned, " ").trim().to_string();
        }

        if cleaned.is_empty() {
            return None;
        }
        if !cleaned.ends_with(&['.', '?', '!'][..]) {
            cleaned.push('.');
        }
        Some(cleaned)
    }

    /// Clean the selected sentences and put them back in document order.
    /// Sentences that clean to nothing are dropped.
    pub fn finalize(&self, selected: &[usize], sentences: &[Sentence]) -> Vec<SummarySentence> {
        let mut ordered: Vec<usize> = selected.to_vec();
        ordered.sort_unstable();
        ordered.dedup();

        ordered
            .into_iter()
            .filter_map(|index| {
                let sentence = sentences.get(index)?;
                let text = self.clean(&sentence.text)?;
                Some(SummarySentence { index, text })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_clean_sentence() {
        let cleaner = NoiseCleaner::default();
        assert_eq!(
            cleaner.clean("오늘 수업은 여기까지입니다.").as_deref(),
            Some("오늘 수업은 여기까지입니다.")
        );
    }

    #[test]
    fn test_trailing_punctuation_normalized_to_period() {
        let cleaner = NoiseCleaner::default();
        assert_eq!(
            cleaner.clean("운영체제는 자원을 관리합니다!!!").as_deref(),
            Some("운영체제는 자원을 관리합니다.")
        );
    }

    #[test]
    fn test_strips_leading_symbols() {
        let cleaner = NoiseCleaner::default();
        assert_eq!(
            cleaner.clean("- 커널은 시스템의 핵심입니다").as_deref(),
            Some("커널은 시스템의 핵심입니다.")
        );
    }

    #[test]
    fn test_collapses_repeated_interjections() {
        let cleaner = NoiseCleaner::default();
        assert_eq!(
            cleaner.clean("아 아 아 네 알겠습니다").as_deref(),
            Some("네 알겠습니다.")
        );
    }

    #[test]
    fn test_inner_dash_and_spaces() {
        let cleaner = NoiseCleaner::default();
        assert_eq!(
            cleaner.clean("멀티 - 스레딩은   병렬성을 줍니다").as_deref(),
            Some("멀티 스레딩은 병렬성을 줍니다.")
        );
    }

    #[test]
    fn test_redaction_only_is_dropped() {
        let cleaner = NoiseCleaner::default();
        assert_eq!(cleaner.clean("xxx"), None);
        assert_eq!(cleaner.clean("  ?!  "), None);
    }

    #[test]
    fn test_finalize_sorts_by_document_position() {
        let cleaner = NoiseCleaner::default();
        let sentences = vec![
            Sentence::new(0, "First point here."),
            Sentence::new(1, "..."),
            Sentence::new(2, "Second point here"),
        ];
        let out = cleaner.finalize(&[2, 1, 0], &sentences);

        assert_eq!(
            out,
            vec![
                SummarySentence {
                    index: 0,
                    text: "First point here.".into()
                },
                SummarySentence {
                    index: 2,
                    text: "Second point here.".into()
                },
            ]
        );
    }

    #[test]
    fn test_custom_interjections() {
        let cleaner = NoiseCleaner::new(&["uh"]);
        assert_eq!(
            cleaner.clean("uh uh the disk is full").as_deref(),
            Some("the disk is full.")
        );
    }
}
