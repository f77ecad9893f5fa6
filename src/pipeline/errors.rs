//! Error types for the summarization pipeline.
//!
//! [`SummaryError`] is the tagged failure returned by
//! [`Summarizer::summarize`](super::runner::Summarizer::summarize). Every
//! variant is a terminal, non-transient outcome; nothing here is retried
//! inside the pipeline.
//!
//! [`ConfigDiagnostic`] is a single configuration finding produced by the
//! [`ValidationEngine`](super::validation::ValidationEngine).

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::error_code::ErrorCode;

/// Terminal failure of a summarization run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SummaryError {
    #[error("sentence embedding backend is not loaded; cannot summarize")]
    EmbeddingUnavailable,

    #[error("input text is empty or contains only whitespace")]
    EmptyInput,

    #[error("input text is empty after preprocessing")]
    PreprocessingEmptiedInput,

    #[error("could not split the text into sentences, or there is nothing to summarize")]
    NoSentencesFound,

    #[error("sentence embedding failed: {0}")]
    EmbeddingFailed(String),

    #[error("failed to build the sentence similarity matrix: {0}")]
    SimilarityComputationFailed(String),

    #[error("centrality ranking failed or found no meaningful key sentences")]
    RankingFailed,

    #[error("no key sentences were selected")]
    SelectionEmpty,

    #[error("no sentences remained after filtering and cleaning")]
    FilteringEmptiedResult,
}

impl SummaryError {
    /// Stable machine-readable code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EmbeddingUnavailable => ErrorCode::EmbeddingUnavailable,
            Self::EmptyInput => ErrorCode::EmptyInput,
            Self::PreprocessingEmptiedInput => ErrorCode::PreprocessingEmptiedInput,
            Self::NoSentencesFound => ErrorCode::NoSentencesFound,
            Self::EmbeddingFailed(_) => ErrorCode::EmbeddingFailed,
            Self::SimilarityComputationFailed(_) => ErrorCode::SimilarityComputationFailed,
            Self::RankingFailed => ErrorCode::RankingFailed,
            Self::SelectionEmpty => ErrorCode::SelectionEmpty,
            Self::FilteringEmptiedResult => ErrorCode::FilteringEmptiedResult,
        }
    }
}

/// Error reported by an [`Embedder`](crate::embedding::Embedder) backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbedError {
    /// The backend could not be constructed (model missing, bad path, ...).
    #[error("embedding backend failed to load: {0}")]
    Load(String),

    /// The backend was loaded but encoding failed.
    #[error("embedding backend failed to encode: {0}")]
    Encode(String),

    /// The backend returned output violating the embedder contract.
    #[error("embedding backend returned {got} vectors for {expected} sentences")]
    CountMismatch { expected: usize, got: usize },
}

/// Failure loading a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A structured configuration finding.
///
/// `path` is a JSON pointer into the configuration document
/// (e.g. `/selection_ratio`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigDiagnostic {
    pub code: ErrorCode,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ConfigDiagnostic {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.path, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostic {}
