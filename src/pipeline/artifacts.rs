//! First-class pipeline artifacts.
//!
//! Each type represents a typed intermediate result flowing between pipeline
//! stages. Artifacts are run-local: every call to
//! [`Summarizer::summarize`](super::runner::Summarizer::summarize) creates
//! its own and drops them when it returns. No stage mutates an artifact
//! produced by an earlier one.

use serde::Serialize;

/// A sentence of the (preprocessed) document with its zero-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    pub index: usize,
    pub text: String,
}

impl Sentence {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// Fixed-length vector for the sentence with the same index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// L2 norm, accumulated in f64.
    pub fn norm(&self) -> f64 {
        self.0
            .iter()
            .map(|&v| (v as f64) * (v as f64))
            .sum::<f64>()
            .sqrt()
    }

    /// Dot product with another embedding of the same dimension.
    pub fn dot(&self, other: &Embedding) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(&a, &b)| a as f64 * b as f64)
            .sum()
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// A sentence index paired with its non-negative centrality score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedSentence {
    pub index: usize,
    pub score: f64,
}

/// How the ranking scores were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankMethod {
    /// Converged PageRank over the thresholded similarity graph.
    PageRank,
    /// The graph had nodes but no edges; every node scores `1/N`.
    Disconnected,
    /// PageRank did not converge (or produced unusable scores); every node
    /// scores `1/N`.
    NonConvergedFallback,
}

/// Centrality scores for every sentence, sorted descending by score with
/// ties broken by ascending index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub entries: Vec<RankedSentence>,
    pub method: RankMethod,
    /// PageRank iterations performed (0 when PageRank did not run)
    pub iterations: usize,
}

impl Ranking {
    /// Build a ranking from per-index scores, applying the canonical order.
    pub fn from_scores(scores: &[f64], method: RankMethod, iterations: usize) -> Self {
        let mut entries: Vec<RankedSentence> = scores
            .iter()
            .enumerate()
            .map(|(index, &score)| RankedSentence { index, score })
            .collect();
        entries.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)));
        Self {
            entries,
            method,
            iterations,
        }
    }

    /// Uniform `1/n` scores for `n` nodes.
    pub fn uniform(n: usize, method: RankMethod) -> Self {
        let score = if n > 0 { 1.0 / n as f64 } else { 0.0 };
        Self::from_scores(&vec![score; n], method, 0)
    }

    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            method: RankMethod::PageRank,
            iterations: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first `n` indices in rank order.
    pub fn top_n(&self, n: usize) -> Vec<usize> {
        self.entries.iter().take(n).map(|e| e.index).collect()
    }

    /// Score for a sentence index (0.0 if absent).
    pub fn score(&self, index: usize) -> f64 {
        self.entries
            .iter()
            .find(|e| e.index == index)
            .map(|e| e.score)
            .unwrap_or(0.0)
    }

    /// Sum of all scores.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.score).sum()
    }
}

/// Working set of the greedy MMR selection.
///
/// `selected` is append-only; `remaining` shrinks by exactly the index that
/// was appended. Remaining candidates keep their rank order, which is the
/// tie-break order for equal MMR scores.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: Vec<usize>,
    remaining: Vec<usize>,
}

impl SelectionState {
    /// Start with every ranked index as a candidate and nothing selected.
    pub fn new(candidates_in_rank_order: impl IntoIterator<Item = usize>) -> Self {
        Self {
            selected: Vec::new(),
            remaining: candidates_in_rank_order.into_iter().collect(),
        }
    }

    /// Move `index` from the candidates to the selection.
    ///
    /// Returns `false` (and changes nothing) if `index` is not a candidate.
    pub fn select(&mut self, index: usize) -> bool {
        match self.remaining.iter().position(|&c| c == index) {
            Some(pos) => {
                self.remaining.remove(pos);
                self.selected.push(index);
                true
            }
            None => false,
        }
    }

    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn remaining(&self) -> &[usize] {
        &self.remaining
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn into_selected(self) -> Vec<usize> {
        self.selected
    }
}

/// A cleaned summary sentence with its position in the original document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummarySentence {
    pub index: usize,
    pub text: String,
}

/// Terminal artifact of a successful run.
///
/// Sentences are in document order, not selection order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub sentences: Vec<SummarySentence>,
    /// Indices in the order the selector picked them
    pub selection_order: Vec<usize>,
    pub rank_method: RankMethod,
    /// PageRank iterations performed (0 for the uniform paths)
    pub iterations: usize,
    /// Sentence count of the segmented document
    pub source_sentences: usize,
}

impl Summary {
    /// The summary as newline-joined text.
    pub fn text(&self) -> String {
        self.sentences
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}
