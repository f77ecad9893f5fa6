//! Closing-remark filter
//!
//! Lecture and video transcripts end with sign-offs ("감사합니다", "구독과
//! 좋아요") that rank well because they are generic. The filter drops
//! selected sentences matching any configured pattern, unless that would
//! leave nothing.

use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::pipeline::artifacts::Sentence;
use crate::types::SummaryConfig;

/// Drops boilerplate closing sentences from a selection.
#[derive(Debug, Clone, Default)]
pub struct ClosingFilter {
    patterns: Vec<Regex>,
}

impl ClosingFilter {
    /// Compile `patterns` case-insensitively. A pattern that fails to
    /// compile is skipped with a warning.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let patterns = patterns
            .iter()
            .filter_map(|p| {
                let p = p.as_ref();
                match RegexBuilder::new(p).case_insensitive(true).build() {
                    Ok(re) => Some(re),
                    Err(err) => {
                        warn!(pattern = p, error = %err, "skipping closing pattern that does not compile");
                        None
                    }
                }
            })
            .collect();
        Self { patterns }
    }

    pub fn from_config(cfg: &SummaryConfig) -> Self {
        Self::new(&cfg.closing_patterns)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn is_closing(&self, text: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(text))
    }

    /// Remove closing sentences from `selected` (sentence indices),
    /// preserving order. If every selected sentence is a closing remark the
    /// selection is returned unchanged.
    pub fn apply(&self, selected: &[usize], sentences: &[Sentence]) -> Vec<usize> {
        let kept: Vec<usize> = selected
            .iter()
            .copied()
            .filter(|&idx| {
                sentences
                    .get(idx)
                    .map_or(true, |s| !self.is_closing(&s.text))
            })
            .collect();

        if kept.is_empty() && !selected.is_empty() {
            debug!(selected = selected.len(), "every selected sentence is a closing remark; keeping selection");
            return selected.to_vec();
        }
        if kept.len() < selected.len() {
            debug!(dropped = selected.len() - kept.len(), "closing remarks removed");
        }
        kept
    }
}
