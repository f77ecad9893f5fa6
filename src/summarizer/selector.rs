//! MMR-based sentence selection for summarization
//!
//! Implements Maximal Marginal Relevance (MMR) for selecting
//! diverse yet relevant sentences for extractive summarization.
//!
//! Relevance is the sentence's centrality normalized by the largest positive
//! score; redundancy is its maximum similarity to anything already selected.

use super::similarity::SimilarityMatrix;
use crate::pipeline::artifacts::{Ranking, SelectionState};
use crate::types::SummaryConfig;

/// MMR-based sentence selector
#[derive(Debug, Clone)]
pub struct SentenceSelector {
    /// Lambda parameter for MMR (0 = diversity only, 1 = relevance only)
    lambda: f64,
    /// `false` takes the top-k by centrality and ignores similarity
    use_mmr: bool,
}

impl Default for SentenceSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceSelector {
    /// Create a new selector with λ = 0.5 and MMR enabled
    pub fn new() -> Self {
        Self {
            lambda: 0.5,
            use_mmr: true,
        }
    }

    pub fn from_config(cfg: &SummaryConfig) -> Self {
        Self::new()
            .with_lambda(cfg.mmr_lambda)
            .with_mmr(cfg.use_mmr)
    }

    /// Set lambda (relevance vs diversity tradeoff)
    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda.clamp(0.0, 1.0);
        self
    }

    pub fn with_mmr(mut self, use_mmr: bool) -> Self {
        self.use_mmr = use_mmr;
        self
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Select up to `k` sentence indices, returned in selection order.
    ///
    /// Fewer than `k` come back only when the ranking has fewer than `k`
    /// entries. In MMR mode the ranking must index into `matrix`; see
    /// [`select_mmr`](Self::select_mmr).
    pub fn select(&self, ranking: &Ranking, matrix: &SimilarityMatrix, k: usize) -> Vec<usize> {
        if ranking.is_empty() || k == 0 {
            return Vec::new();
        }
        if !self.use_mmr {
            return ranking.top_n(k);
        }
        self.select_mmr(ranking, matrix, k).into_selected()
    }

    /// Greedy MMR selection
    ///
    /// MMR formula: λ * relevance(s) - (1-λ) * max_{s' ∈ selected} sim(s, s')
    ///
    /// The top-ranked sentence is always selected first. Candidates are
    /// scanned in rank order and only a strictly greater score replaces the
    /// current best, so equal scores resolve to the better-ranked sentence.
    ///
    /// # Panics
    ///
    /// `ranking` and `matrix` must come from the same document: every ranked
    /// index has to be a row of `matrix`.
    pub fn select_mmr(&self, ranking: &Ranking, matrix: &SimilarityMatrix, k: usize) -> SelectionState {
        debug_assert!(
            ranking.entries.iter().all(|e| e.index < matrix.size()),
            "ranking has {} entries but the similarity matrix has {} rows",
            ranking.len(),
            matrix.size()
        );
        let mut state = SelectionState::new(ranking.entries.iter().map(|e| e.index));
        if k == 0 {
            return state;
        }

        let relevance = normalized_relevance(ranking, matrix.size());

        if let Some(top) = ranking.entries.first() {
            state.select(top.index);
        }

        while state.selected().len() < k && !state.is_exhausted() {
            let mut best: Option<(usize, f64)> = None;

            for &candidate in state.remaining() {
                let max_sim = state
                    .selected()
                    .iter()
                    .map(|&s| matrix.get(candidate, s))
                    .fold(f64::NEG_INFINITY, f64::max);
                let max_sim = if max_sim.is_finite() { max_sim } else { 0.0 };

                let mmr = self.lambda * relevance[candidate] - (1.0 - self.lambda) * max_sim;

                match best {
                    Some((_, best_mmr)) if mmr <= best_mmr => {}
                    _ => best = Some((candidate, mmr)),
                }
            }

            match best {
                Some((idx, _)) => {
                    state.select(idx);
                }
                None => break,
            }
        }

        state
    }
}

/// Scores divided by the maximum positive score, indexed by sentence.
/// All-zero scores normalize to zero.
fn normalized_relevance(ranking: &Ranking, n: usize) -> Vec<f64> {
    let max_score = ranking
        .entries
        .iter()
        .map(|e| e.score)
        .filter(|s| *s > 0.0)
        .fold(0.0, f64::max);

    let mut relevance = vec![0.0; n.max(ranking.len())];
    if max_score > 0.0 {
        for entry in &ranking.entries {
            relevance[entry.index] = entry.score / max_score;
        }
    }
    relevance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::artifacts::RankMethod;

    /// 0 and 1 are near-duplicates; 2 covers something else.
    fn redundant_pair() -> (Ranking, SimilarityMatrix) {
        let ranking = Ranking::from_scores(&[0.4, 0.35, 0.25], RankMethod::PageRank, 10);
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.95, 0.1],
            vec![0.95, 1.0, 0.1],
            vec![0.1, 0.1, 1.0],
        ]);
        (ranking, matrix)
    }

    fn identity(n: usize) -> SimilarityMatrix {
        SimilarityMatrix::from_rows(
            (0..n)
                .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
                .collect(),
        )
    }

    #[test]
    fn test_mmr_prefers_diverse_sentence() {
        let (ranking, matrix) = redundant_pair();
        let selected = SentenceSelector::new().select(&ranking, &matrix, 2);

        assert_eq!(selected, vec![0, 2]);
    }

    #[test]
    fn test_lambda_one_is_top_k() {
        let (ranking, matrix) = redundant_pair();
        let selected = SentenceSelector::new()
            .with_lambda(1.0)
            .select(&ranking, &matrix, 2);

        assert_eq!(selected, ranking.top_n(2));
    }

    #[test]
    fn test_top_k_without_mmr() {
        let (ranking, matrix) = redundant_pair();
        let selected = SentenceSelector::new()
            .with_mmr(false)
            .select(&ranking, &matrix, 2);

        assert_eq!(selected, vec![0, 1]);
    }

    #[test]
    fn test_seed_is_top_ranked_even_with_zero_lambda() {
        let ranking = Ranking::from_scores(&[0.1, 0.6, 0.3], RankMethod::PageRank, 5);
        let selected = SentenceSelector::new()
            .with_lambda(0.0)
            .select(&ranking, &identity(3), 1);

        assert_eq!(selected, vec![1]);
    }

    #[test]
    fn test_uniform_scores_select_in_rank_order() {
        let ranking = Ranking::uniform(6, RankMethod::Disconnected);
        let selected = SentenceSelector::new().select(&ranking, &identity(6), 4);

        assert_eq!(selected, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_stops_when_candidates_exhausted() {
        let (ranking, matrix) = redundant_pair();
        let selected = SentenceSelector::new().select(&ranking, &matrix, 10);

        assert_eq!(selected.len(), 3);
        let mut sorted = selected.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), selected.len());
    }

    #[test]
    fn test_all_zero_scores_normalize_to_zero() {
        let ranking = Ranking::from_scores(&[0.0, 0.0, 0.0], RankMethod::PageRank, 1);
        let relevance = normalized_relevance(&ranking, 3);
        assert_eq!(relevance, vec![0.0, 0.0, 0.0]);

        let selected = SentenceSelector::new().select(&ranking, &identity(3), 3);
        assert_eq!(selected, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_inputs() {
        let selector = SentenceSelector::new();
        assert!(selector
            .select(&Ranking::empty(), &SimilarityMatrix::empty(), 3)
            .is_empty());

        let (ranking, matrix) = redundant_pair();
        assert!(selector.select(&ranking, &matrix, 0).is_empty());
    }

    #[test]
    fn test_lambda_is_clamped() {
        assert_eq!(SentenceSelector::new().with_lambda(3.0).lambda(), 1.0);
        assert_eq!(SentenceSelector::new().with_lambda(-1.0).lambda(), 0.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "similarity matrix has 2 rows")]
    fn test_ranking_from_another_document_is_rejected() {
        let ranking = Ranking::uniform(3, RankMethod::Disconnected);
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        SentenceSelector::new().select(&ranking, &matrix, 2);
    }
}
