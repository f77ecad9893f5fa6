//! Pairwise cosine similarity over sentence embeddings
//!
//! Builds the dense, symmetric N×N matrix consumed by the graph and
//! the MMR selector. An N = 0 input produces [`SimilarityMatrix::empty`],
//! which is distinguishable from the valid 1×1 matrix `[[1.0]]`.

use rayon::prelude::*;
use thiserror::Error;

use crate::pipeline::artifacts::Embedding;

/// Row count above which rows are computed in parallel
const PARALLEL_MIN_ROWS: usize = 128;

/// Why a matrix could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimilarityError {
    #[error("embedding {index} has dimension {got}, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        got: usize,
    },

    #[error("embedding {index} contains non-finite values")]
    NonFinite { index: usize },
}

/// Dense symmetric similarity matrix, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// The empty-result sentinel (no sentences).
    pub fn empty() -> Self {
        Self {
            n: 0,
            values: Vec::new(),
        }
    }

    /// Compute cosine similarity for every pair of embeddings.
    ///
    /// The diagonal is fixed at 1.0. A zero vector has similarity 0.0 with
    /// every other vector. Values are clamped to [-1, 1] to absorb rounding.
    pub fn from_embeddings(embeddings: &[Embedding]) -> Result<Self, SimilarityError> {
        let n = embeddings.len();
        if n == 0 {
            return Ok(Self::empty());
        }

        let dim = embeddings[0].dim();
        for (index, e) in embeddings.iter().enumerate() {
            if e.dim() != dim {
                return Err(SimilarityError::DimensionMismatch {
                    index,
                    expected: dim,
                    got: e.dim(),
                });
            }
            if e.as_slice().iter().any(|v| !v.is_finite()) {
                return Err(SimilarityError::NonFinite { index });
            }
        }

        if n == 1 {
            return Ok(Self {
                n,
                values: vec![1.0],
            });
        }

        let norms: Vec<f64> = embeddings.iter().map(Embedding::norm).collect();
        let row = |i: usize| -> Vec<f64> {
            (0..n)
                .map(|j| {
                    if i == j {
                        return 1.0;
                    }
                    let denom = norms[i] * norms[j];
                    if denom == 0.0 {
                        0.0
                    } else {
                        (embeddings[i].dot(&embeddings[j]) / denom).clamp(-1.0, 1.0)
                    }
                })
                .collect()
        };

        let rows: Vec<Vec<f64>> = if n >= PARALLEL_MIN_ROWS {
            (0..n).into_par_iter().map(row).collect()
        } else {
            (0..n).map(row).collect()
        };

        Ok(Self {
            n,
            values: rows.into_iter().flatten().collect(),
        })
    }

    /// Build from explicit rows. Intended for tests and callers that already
    /// hold similarities; `rows` must be square.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        let n = rows.len();
        debug_assert!(rows.iter().all(|r| r.len() == n), "matrix must be square");
        Self {
            n,
            values: rows.into_iter().flatten().collect(),
        }
    }

    /// Number of sentences (rows).
    pub fn size(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Similarity of sentences `i` and `j`.
    ///
    /// # Panics
    ///
    /// If either index is not below [`size`](Self::size).
    pub fn get(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.n && j < self.n, "index ({i}, {j}) out of range for {n}x{n} matrix", n = self.n);
        self.values[i * self.n + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n..(i + 1) * self.n]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emb(values: &[f32]) -> Embedding {
        Embedding::new(values.to_vec())
    }

    #[test]
    fn test_empty_input_is_sentinel() {
        let m = SimilarityMatrix::from_embeddings(&[]).unwrap();
        assert!(m.is_empty());
        assert_eq!(m, SimilarityMatrix::empty());
    }

    #[test]
    fn test_single_sentence_is_one() {
        let m = SimilarityMatrix::from_embeddings(&[emb(&[0.3, 0.4])]).unwrap();
        assert_eq!(m.size(), 1);
        assert_eq!(m.get(0, 0), 1.0);
        assert_ne!(m, SimilarityMatrix::empty());
    }

    #[test]
    fn test_identical_and_orthogonal() {
        let m = SimilarityMatrix::from_embeddings(&[
            emb(&[1.0, 0.0]),
            emb(&[2.0, 0.0]),
            emb(&[0.0, 5.0]),
        ])
        .unwrap();
        assert!((m.get(0, 1) - 1.0).abs() < 1e-9);
        assert!(m.get(0, 2).abs() < 1e-9);
    }

    #[test]
    fn test_opposite_vectors() {
        let m = SimilarityMatrix::from_embeddings(&[emb(&[1.0, 1.0]), emb(&[-1.0, -1.0])]).unwrap();
        assert!((m.get(0, 1) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric_bounded_unit_diagonal() {
        let embeddings: Vec<_> = (0..7)
            .map(|i| emb(&[i as f32, (i * i) as f32 - 3.0, 1.0 - i as f32]))
            .collect();
        let m = SimilarityMatrix::from_embeddings(&embeddings).unwrap();
        for i in 0..m.size() {
            assert_eq!(m.get(i, i), 1.0);
            for j in 0..m.size() {
                assert!((m.get(i, j) - m.get(j, i)).abs() < 1e-12);
                assert!((-1.0..=1.0).contains(&m.get(i, j)));
            }
        }
    }

    #[test]
    fn test_parallel_path_matches_shape() {
        let embeddings: Vec<_> = (0..PARALLEL_MIN_ROWS + 2)
            .map(|i| emb(&[(i % 7) as f32, 1.0]))
            .collect();
        let m = SimilarityMatrix::from_embeddings(&embeddings).unwrap();
        assert_eq!(m.size(), PARALLEL_MIN_ROWS + 2);
        assert_eq!(m.row(3).len(), PARALLEL_MIN_ROWS + 2);
        assert!((m.get(0, 7) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_vector_has_zero_similarity() {
        let m = SimilarityMatrix::from_embeddings(&[emb(&[0.0, 0.0]), emb(&[1.0, 0.0])]).unwrap();
        assert_eq!(m.get(0, 1), 0.0);
        assert_eq!(m.get(0, 0), 1.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = SimilarityMatrix::from_embeddings(&[emb(&[1.0, 0.0]), emb(&[1.0])]).unwrap_err();
        assert_eq!(
            err,
            SimilarityError::DimensionMismatch {
                index: 1,
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = SimilarityMatrix::from_embeddings(&[emb(&[f32::NAN])]).unwrap_err();
        assert_eq!(err, SimilarityError::NonFinite { index: 0 });
    }
}
