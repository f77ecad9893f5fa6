//! Stable, machine-readable error codes.
//!
//! Codes serialize as snake_case strings and never change once published, so
//! callers may match on them instead of on message text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Machine-readable code attached to every pipeline failure and config
/// diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // ─── Summarization failures ─────────────────────────────────────────
    EmbeddingUnavailable,
    EmptyInput,
    PreprocessingEmptiedInput,
    NoSentencesFound,
    EmbeddingFailed,
    SimilarityComputationFailed,
    RankingFailed,
    SelectionEmpty,
    FilteringEmptiedResult,

    // ─── Configuration diagnostics ──────────────────────────────────────
    OutOfRange,
    InvalidCombo,
    InvalidPattern,
    UnknownField,
}

impl ErrorCode {
    /// Returns the snake_case name used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmbeddingUnavailable => "embedding_unavailable",
            Self::EmptyInput => "empty_input",
            Self::PreprocessingEmptiedInput => "preprocessing_emptied_input",
            Self::NoSentencesFound => "no_sentences_found",
            Self::EmbeddingFailed => "embedding_failed",
            Self::SimilarityComputationFailed => "similarity_computation_failed",
            Self::RankingFailed => "ranking_failed",
            Self::SelectionEmpty => "selection_empty",
            Self::FilteringEmptiedResult => "filtering_emptied_result",
            Self::OutOfRange => "out_of_range",
            Self::InvalidCombo => "invalid_combo",
            Self::InvalidPattern => "invalid_pattern",
            Self::UnknownField => "unknown_field",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_matches_as_str() {
        for code in [
            ErrorCode::EmptyInput,
            ErrorCode::SimilarityComputationFailed,
            ErrorCode::UnknownField,
            ErrorCode::InvalidPattern,
        ] {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, code.as_str());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::RankingFailed.to_string(), "ranking_failed");
    }
}
