//! Sentence embedding collaborators
//!
//! The pipeline treats the embedding model as a black box behind the
//! [`Embedder`] trait. An [`EmbeddingService`] is built once at process
//! startup (model loading is expensive) and shared by reference with every
//! summarization run.

pub mod hashing;

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use crate::pipeline::artifacts::Embedding;
use crate::pipeline::errors::EmbedError;

/// Maps sentences to fixed-length vectors.
///
/// Implementations must return exactly one vector per input sentence, in
/// input order, or an error. They must be `Send + Sync` so one loaded model
/// can serve concurrent runs.
pub trait Embedder: Send + Sync {
    /// Short identifier for logs (e.g. the model name).
    fn name(&self) -> &str;

    fn embed(&self, sentences: &[&str]) -> Result<Vec<Embedding>, EmbedError>;
}

/// A loader for one embedding backend candidate.
pub type EmbedderLoader = Box<dyn FnOnce() -> Result<Arc<dyn Embedder>, EmbedError>>;

/// Shared handle to the process-wide embedding backend.
///
/// A service may be *unavailable* when no backend could be loaded; runs
/// against it fail with
/// [`SummaryError::EmbeddingUnavailable`](crate::pipeline::errors::SummaryError::EmbeddingUnavailable).
#[derive(Clone)]
pub struct EmbeddingService {
    backend: Option<Arc<dyn Embedder>>,
}

impl fmt::Debug for EmbeddingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingService")
            .field("backend", &self.backend.as_ref().map(|b| b.name()))
            .finish()
    }
}

impl EmbeddingService {
    pub fn new(backend: Arc<dyn Embedder>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Wrap a concrete embedder.
    pub fn from_embedder(embedder: impl Embedder + 'static) -> Self {
        Self::new(Arc::new(embedder))
    }

    /// A service with no backend.
    pub fn unavailable() -> Self {
        Self { backend: None }
    }

    /// Try each loader in order and keep the first backend that loads.
    ///
    /// Typical use is a primary model followed by a fallback model. If every
    /// loader fails the service is unavailable.
    pub fn first_available(loaders: impl IntoIterator<Item = EmbedderLoader>) -> Self {
        for (attempt, loader) in loaders.into_iter().enumerate() {
            match loader() {
                Ok(backend) => {
                    info!(backend = backend.name(), attempt, "embedding backend loaded");
                    return Self::new(backend);
                }
                Err(err) => warn!(attempt, error = %err, "embedding backend failed to load"),
            }
        }
        warn!("no embedding backend could be loaded");
        Self::unavailable()
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub fn backend_name(&self) -> Option<&str> {
        self.backend.as_ref().map(|b| b.name())
    }

    /// Embed `sentences`, enforcing the collaborator contract.
    ///
    /// Returns `Ok(None)` when the service is unavailable.
    pub fn embed(&self, sentences: &[&str]) -> Result<Option<Vec<Embedding>>, EmbedError> {
        let Some(backend) = &self.backend else {
            return Ok(None);
        };

        let embeddings = backend.embed(sentences)?;
        if embeddings.len() != sentences.len() {
            return Err(EmbedError::CountMismatch {
                expected: sentences.len(),
                got: embeddings.len(),
            });
        }
        if embeddings.iter().any(Embedding::is_empty) {
            return Err(EmbedError::Encode("backend returned an empty vector".into()));
        }
        Ok(Some(embeddings))
    }
}
