//! # transcript-rank
//!
//! Extractive summarization for long speech-to-text transcripts.
//!
//! A document is split into sentences, each sentence is embedded by an
//! external [`Embedder`], and the sentences are ranked by PageRank centrality
//! over their thresholded cosine-similarity graph. Maximal Marginal
//! Relevance then picks a short, non-redundant subset, boilerplate sign-offs
//! are filtered, and the survivors are cleaned and returned in document
//! order.
//!
//! ```
//! use transcript_rank::{EmbeddingService, HashingEmbedder, Summarizer, SummaryConfig};
//!
//! let service = EmbeddingService::from_embedder(HashingEmbedder::default());
//! let summarizer = Summarizer::new(service);
//! let cfg = SummaryConfig::default().with_preprocessing(false);
//!
//! let summary = summarizer
//!     .summarize("Rust has no garbage collector. Ownership decides when memory is freed.", &cfg)
//!     .unwrap();
//! assert_eq!(summary.source_sentences, 2);
//! ```

pub mod embedding;
pub mod graph;
pub mod nlp;
pub mod pagerank;
pub mod pipeline;
pub mod summarizer;
pub mod types;

pub use embedding::hashing::HashingEmbedder;
pub use embedding::{Embedder, EmbedderLoader, EmbeddingService};
pub use pipeline::artifacts::{
    Embedding, RankMethod, RankedSentence, Ranking, Sentence, Summary, SummarySentence,
};
pub use pipeline::error_code::ErrorCode;
pub use pipeline::errors::{ConfigDiagnostic, ConfigError, EmbedError, SummaryError};
pub use pipeline::observer::{NoopObserver, PipelineObserver, TracingObserver};
pub use pipeline::runner::Summarizer;
pub use pipeline::traits::{NoopPreprocessor, Preprocessor, SentenceSplitter};
pub use pipeline::validation::{ValidationEngine, ValidationReport};
pub use types::{PreprocessConfig, SummaryConfig};
