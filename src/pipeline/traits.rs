//! Stage trait definitions for the pipeline.
//!
//! Each trait represents one processing stage boundary that callers may swap
//! out. Implementations are statically dispatched through the generic
//! parameters of [`Summarizer`](super::runner::Summarizer); trait objects
//! work too.

use crate::pipeline::artifacts::Sentence;
use crate::types::SummaryConfig;

// ============================================================================
// Preprocessor: optional text normalization (stage 0)
// ============================================================================

/// Optional text normalization stage, run before segmentation when
/// [`SummaryConfig::run_preprocessing`] is set.
///
/// # Contract
///
/// - **Input**: the raw transcript.
/// - **Output**: a new, normalized string. The input is never modified.
/// - **Idempotent**: normalizing twice should produce the same result as
///   normalizing once.
///
/// Returning an empty or whitespace-only string is allowed; the pipeline
/// reports it as
/// [`SummaryError::PreprocessingEmptiedInput`](super::errors::SummaryError::PreprocessingEmptiedInput).
pub trait Preprocessor {
    /// Normalize `text` into a new string.
    fn normalize(&self, text: &str, cfg: &SummaryConfig) -> String;
}

/// No-op preprocessor: passes the text through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPreprocessor;

impl Preprocessor for NoopPreprocessor {
    #[inline]
    fn normalize(&self, text: &str, _cfg: &SummaryConfig) -> String {
        text.to_string()
    }
}

// ============================================================================
// SentenceSplitter: segmentation (stage 1)
// ============================================================================

/// Splits normalized text into ordered, non-empty sentences.
///
/// Indices of the returned sentences must be `0..n` in order. Empty input
/// yields an empty vector, never an error.
pub trait SentenceSplitter {
    fn split(&self, text: &str) -> Vec<Sentence>;
}
