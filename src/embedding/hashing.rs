//! Deterministic feature-hashing embedder
//!
//! Produces bag-of-words vectors without any model: each content token (and
//! optionally each character n-gram of the token) is hashed into one of
//! `dim` buckets with a hash-derived sign, counts are accumulated, and the
//! vector is L2-normalized. Character n-grams let agglutinated Korean forms
//! ("운영체제는", "운영체제가") share features.

use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};

use super::Embedder;
use crate::nlp::tokenizer::Tokenizer;
use crate::pipeline::artifacts::Embedding;
use crate::pipeline::errors::EmbedError;

/// Weight of a character n-gram relative to a whole token.
const NGRAM_WEIGHT: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dim: usize,
    ngram: Option<usize>,
    tokenizer: Tokenizer,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(512)
    }
}

impl HashingEmbedder {
    /// Embedder with `dim` buckets (at least 1), character bigrams, and the
    /// default Korean + English stopwords.
    pub fn new(dim: usize) -> Self {
        Self {
            dim: dim.max(1),
            ngram: Some(2),
            tokenizer: Tokenizer::default(),
        }
    }

    /// Set the character n-gram size; `None` hashes whole tokens only.
    pub fn with_char_ngrams(mut self, n: Option<usize>) -> Self {
        self.ngram = n.filter(|&n| n > 0);
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    fn bucket(&self, feature: &str) -> (usize, f32) {
        let mut hasher = FxHasher::default();
        feature.hash(&mut hasher);
        let h = hasher.finish();
        let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
        ((h % self.dim as u64) as usize, sign)
    }

    fn embed_one(&self, sentence: &str) -> Embedding {
        let mut counts: FxHashMap<usize, f32> = FxHashMap::default();

        for token in self.tokenizer.tokenize(sentence) {
            let (slot, sign) = self.bucket(&token);
            *counts.entry(slot).or_insert(0.0) += sign;

            if let Some(n) = self.ngram {
                let chars: Vec<char> = token.chars().collect();
                if chars.len() > n {
                    for window in chars.windows(n) {
                        let gram: String = window.iter().collect();
                        let (slot, sign) = self.bucket(&format!("#{gram}"));
                        *counts.entry(slot).or_insert(0.0) += sign * NGRAM_WEIGHT;
                    }
                }
            }
        }

        let mut values = vec![0.0f32; self.dim];
        for (slot, value) in counts {
            values[slot] = value;
        }

        let norm = values.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut values {
                *v /= norm;
            }
        }
        Embedding::new(values)
    }
}

impl Embedder for HashingEmbedder {
    fn name(&self) -> &str {
        "hashing"
    }

    fn embed(&self, sentences: &[&str]) -> Result<Vec<Embedding>, EmbedError> {
        Ok(sentences.iter().map(|s| self.embed_one(s)).collect())
    }
}
