//! Core configuration types
//!
//! [`SummaryConfig`] carries every tuning knob of the summarization
//! pipeline. It deserializes from JSON with all fields optional; fields the
//! schema does not know are captured so the validation engine can report
//! them.
//!
//! ```json
//! {
//!   "selection_ratio": 0.25,
//!   "min_sentences": 5,
//!   "max_sentences": 15,
//!   "similarity_threshold": 0.15,
//!   "mmr_lambda": 0.5,
//!   "use_mmr": true
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::pipeline::errors::ConfigError;
use crate::pipeline::validation::{ValidationEngine, ValidationReport};

/// Boilerplate sign-offs dropped by the closing-remark filter.
///
/// Matched case-insensitively anywhere in a sentence.
pub const DEFAULT_CLOSING_PATTERNS: &[&str] = &[
    r"다음 영상에서 뵐게요",
    r"구독과 좋아요",
    r"감사합니다",
    r"고생하셨습니다",
    r"문의사항은.*남겨주세요",
    r"시청해 주세요",
    r"궁금한 점 있으시면",
    r"좋아요와 구독",
    r"더 자세히 알고 싶으시다면",
    r"링크를 남겨 둘 테니",
    r"다음 영상에서 만나요",
    r"저는 맨날 씁니다",
];

/// Interjections collapsed by the noise cleaner when repeated.
pub const DEFAULT_FILLER_INTERJECTIONS: &[&str] = &["아", "음", "어"];

/// Discourse fillers removed by the transcript preprocessor.
pub const DEFAULT_FILLER_WORDS: &[&str] = &[
    "음", "어", "그", "저기", "일단", "약간", "뭐랄까", "아무튼", "글쎄", "암튼", "뭐냐", "어쨌든",
    "하여튼", "그게", "저게", "이거", "그거", "저거", "그래서", "근데", "그러니까", "그러면",
    "게다가", "이렇게", "그렇게", "저렇게", "그런 거", "저런 거", "예를 들어", "바로", "네", "자",
    "좀", "막", "그냥", "아니", "혹시", "지금", "사실", "아마", "정말", "진짜", "완전", "아주",
    "매우", "엄청", "되게", "굉장히",
];

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Settings for the transcript preprocessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Whole-word fillers stripped from the transcript
    pub filler_words: Vec<String>,
    /// Sentences shorter than this many characters are dropped
    pub min_sentence_chars: usize,
    /// Collapse immediately repeated words ("네 네 네" -> "네")
    pub collapse_repeats: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            filler_words: owned(DEFAULT_FILLER_WORDS),
            min_sentence_chars: 15,
            collapse_repeats: true,
            unknown_fields: HashMap::new(),
        }
    }
}

/// Configuration for a summarization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Fraction of the document's sentences to target
    pub selection_ratio: f64,
    /// Lower bound on the target sentence count
    pub min_sentences: usize,
    /// Upper bound on the target sentence count
    pub max_sentences: usize,
    /// Similarities below this value are dropped from the graph (τ)
    pub similarity_threshold: f64,
    /// MMR tradeoff (1 = relevance only, 0 = diversity only)
    pub mmr_lambda: f64,
    /// `false` selects the top-k sentences by centrality alone
    pub use_mmr: bool,
    /// Drop sign-off / subscribe / farewell sentences
    pub filter_closings: bool,
    /// Run the preprocessor before segmentation
    pub run_preprocessing: bool,
    /// PageRank damping factor (α)
    pub damping: f64,
    /// PageRank iteration cap
    pub max_iterations: usize,
    /// PageRank per-node convergence tolerance
    pub tolerance: f64,
    /// Regex patterns for the closing-remark filter
    pub closing_patterns: Vec<String>,
    /// Interjections collapsed when repeated
    pub filler_interjections: Vec<String>,
    /// Preprocessor settings
    pub preprocess: PreprocessConfig,
    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            selection_ratio: 0.2,
            min_sentences: 5,
            max_sentences: 15,
            similarity_threshold: 0.15,
            mmr_lambda: 0.5,
            use_mmr: true,
            filter_closings: true,
            run_preprocessing: true,
            damping: 0.85,
            max_iterations: 500,
            tolerance: 1e-6,
            closing_patterns: owned(DEFAULT_CLOSING_PATTERNS),
            filler_interjections: owned(DEFAULT_FILLER_INTERJECTIONS),
            preprocess: PreprocessConfig::default(),
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl SummaryConfig {
    /// Parse a config from a JSON document; absent fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Run the default validation rules.
    pub fn validate(&self) -> ValidationReport {
        ValidationEngine::with_defaults().validate(self)
    }

    /// Number of sentences to select from a document of `n` sentences:
    /// `min(max(min_sentences, round(n * ratio)), max_sentences, n)`.
    ///
    /// Exact halves round to even, so 4.5 gives 4 and 5.5 gives 6.
    pub fn target_sentence_count(&self, n: usize) -> usize {
        let by_ratio = (n as f64 * self.selection_ratio).round_ties_even().max(0.0) as usize;
        by_ratio
            .max(self.min_sentences)
            .min(self.max_sentences)
            .min(n)
    }

    pub fn with_selection_ratio(mut self, ratio: f64) -> Self {
        self.selection_ratio = ratio;
        self
    }

    pub fn with_sentence_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_sentences = min;
        self.max_sentences = max;
        self
    }

    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Set lambda (relevance vs diversity tradeoff)
    pub fn with_mmr_lambda(mut self, lambda: f64) -> Self {
        self.mmr_lambda = lambda.clamp(0.0, 1.0);
        self
    }

    pub fn with_mmr(mut self, use_mmr: bool) -> Self {
        self.use_mmr = use_mmr;
        self
    }

    pub fn with_closing_filter(mut self, enabled: bool) -> Self {
        self.filter_closings = enabled;
        self
    }

    pub fn with_preprocessing(mut self, enabled: bool) -> Self {
        self.run_preprocessing = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_lecture_tuning() {
        let cfg = SummaryConfig::default();
        assert!((cfg.selection_ratio - 0.2).abs() < 1e-12);
        assert_eq!(cfg.min_sentences, 5);
        assert_eq!(cfg.max_sentences, 15);
        assert!((cfg.similarity_threshold - 0.15).abs() < 1e-12);
        assert!((cfg.mmr_lambda - 0.5).abs() < 1e-12);
        assert!(cfg.use_mmr && cfg.filter_closings && cfg.run_preprocessing);
        assert_eq!(cfg.max_iterations, 500);
    }

    #[test]
    fn test_target_count_uses_ratio_within_bounds() {
        let cfg = SummaryConfig::default()
            .with_selection_ratio(0.25)
            .with_sentence_bounds(5, 15);
        assert_eq!(cfg.target_sentence_count(20), 5);
        assert_eq!(cfg.target_sentence_count(40), 10);
        assert_eq!(cfg.target_sentence_count(100), 15);
    }

    #[test]
    fn test_target_count_never_exceeds_document() {
        let cfg = SummaryConfig::default();
        assert_eq!(cfg.target_sentence_count(3), 3);
        assert_eq!(cfg.target_sentence_count(1), 1);
        assert_eq!(cfg.target_sentence_count(0), 0);
    }

    #[test]
    fn test_target_count_rounds() {
        let cfg = SummaryConfig::default()
            .with_selection_ratio(0.5)
            .with_sentence_bounds(0, 100);
        // exact halves round to even
        assert_eq!(cfg.target_sentence_count(9), 4);
        assert_eq!(cfg.target_sentence_count(11), 6);
        // 7 * 0.25 = 1.75 -> 2
        assert_eq!(cfg.clone().with_selection_ratio(0.25).target_sentence_count(7), 2);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let cfg = SummaryConfig::from_json_str(r#"{ "mmr_lambda": 0.7, "use_mmr": false }"#)
            .unwrap();
        assert!((cfg.mmr_lambda - 0.7).abs() < 1e-12);
        assert!(!cfg.use_mmr);
        assert_eq!(cfg.min_sentences, 5);
        assert_eq!(cfg.closing_patterns.len(), DEFAULT_CLOSING_PATTERNS.len());
    }

    #[test]
    fn test_unknown_fields_captured() {
        let cfg = SummaryConfig::from_json_str(r#"{ "bogus": 1, "min_sentences": 2 }"#).unwrap();
        assert!(cfg.unknown_fields.contains_key("bogus"));
        assert_eq!(cfg.min_sentences, 2);
    }

    #[test]
    fn test_nested_preprocess_config() {
        let cfg = SummaryConfig::from_json_str(
            r#"{ "preprocess": { "min_sentence_chars": 3, "filler_words": ["um"] } }"#,
        )
        .unwrap();
        assert_eq!(cfg.preprocess.min_sentence_chars, 3);
        assert_eq!(cfg.preprocess.filler_words, vec!["um".to_string()]);
        assert!(cfg.preprocess.collapse_repeats);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = SummaryConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_lambda_builder_clamps() {
        let cfg = SummaryConfig::default().with_mmr_lambda(1.5);
        assert!((cfg.mmr_lambda - 1.0).abs() < 1e-12);
    }
}
