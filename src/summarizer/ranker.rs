//! Centrality ranking over the thresholded similarity graph
//!
//! Every degenerate case is an explicit branch on a checked condition:
//!
//! | Condition | Result |
//! |-----------|--------|
//! | empty matrix | empty ranking |
//! | nodes but no edges | uniform `1/N`, [`RankMethod::Disconnected`] |
//! | PageRank did not converge or produced unusable scores | uniform `1/N`, [`RankMethod::NonConvergedFallback`] |
//! | otherwise | PageRank scores, [`RankMethod::PageRank`] |

use tracing::{debug, warn};

use super::similarity::SimilarityMatrix;
use crate::graph::csr::CsrGraph;
use crate::pagerank::standard::StandardPageRank;
use crate::pipeline::artifacts::{RankMethod, Ranking};
use crate::types::SummaryConfig;

/// Ranks sentences by weighted PageRank centrality.
#[derive(Debug, Clone)]
pub struct GraphRanker {
    /// Similarities below this value are not edges (τ)
    pub threshold: f64,
    pagerank: StandardPageRank,
}

impl Default for GraphRanker {
    fn default() -> Self {
        Self::from_config(&SummaryConfig::default())
    }
}

impl GraphRanker {
    pub fn from_config(cfg: &SummaryConfig) -> Self {
        Self {
            threshold: cfg.similarity_threshold,
            pagerank: StandardPageRank::new()
                .with_damping(cfg.damping)
                .with_max_iterations(cfg.max_iterations)
                .with_threshold(cfg.tolerance),
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_pagerank(mut self, pagerank: StandardPageRank) -> Self {
        self.pagerank = pagerank;
        self
    }

    /// Score every sentence. Never fails: scores are non-negative and sum
    /// to 1 whenever the matrix has at least one row.
    pub fn rank(&self, matrix: &SimilarityMatrix) -> Ranking {
        if matrix.is_empty() {
            return Ranking::empty();
        }

        let graph = CsrGraph::from_similarity(matrix, self.threshold);
        let n = graph.num_nodes;
        if graph.edge_count() == 0 {
            debug!(nodes = n, threshold = self.threshold, "graph has no edges; uniform scores");
            return Ranking::uniform(n, RankMethod::Disconnected);
        }

        let result = self.pagerank.run(&graph);

        if !result.converged || !result.is_well_formed() {
            warn!(
                iterations = result.iterations,
                delta = result.delta,
                "pagerank did not produce usable scores; falling back to uniform"
            );
            return Ranking::uniform(n, RankMethod::NonConvergedFallback);
        }

        Ranking::from_scores(&result.scores, RankMethod::PageRank, result.iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_matrix() -> SimilarityMatrix {
        // 1 is similar to both 0 and 2; 0 and 2 are unrelated
        SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.6, 0.0],
            vec![0.6, 1.0, 0.6],
            vec![0.0, 0.6, 1.0],
        ])
    }

    #[test]
    fn test_empty_matrix_gives_empty_ranking() {
        let ranking = GraphRanker::default().rank(&SimilarityMatrix::empty());
        assert!(ranking.is_empty());
    }

    #[test]
    fn test_single_sentence_is_uniform() {
        let ranking = GraphRanker::default().rank(&SimilarityMatrix::from_rows(vec![vec![1.0]]));
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking.method, RankMethod::Disconnected);
        assert!((ranking.score(0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_central_sentence_ranks_first() {
        let ranking = GraphRanker::default().rank(&chain_matrix());

        assert_eq!(ranking.method, RankMethod::PageRank);
        assert_eq!(ranking.entries[0].index, 1);
        // 0 and 2 are symmetric; tie broken by index
        assert_eq!(ranking.top_n(3), vec![1, 0, 2]);
        assert!((ranking.total() - 1.0).abs() < 1e-9);
        assert!(ranking.iterations > 0);
    }

    #[test]
    fn test_all_below_threshold_is_uniform() {
        let ranking = GraphRanker::default()
            .with_threshold(0.9)
            .rank(&chain_matrix());

        assert_eq!(ranking.method, RankMethod::Disconnected);
        for entry in &ranking.entries {
            assert!((entry.score - 1.0 / 3.0).abs() < 1e-12);
        }
        assert_eq!(ranking.top_n(3), vec![0, 1, 2]);
    }

    #[test]
    fn test_non_convergence_falls_back_to_uniform() {
        let ranker = GraphRanker::default().with_pagerank(
            StandardPageRank::new()
                .with_max_iterations(1)
                .with_threshold(0.0),
        );
        let ranking = ranker.rank(&chain_matrix());

        assert_eq!(ranking.method, RankMethod::NonConvergedFallback);
        assert!((ranking.total() - 1.0).abs() < 1e-12);
        assert_eq!(ranking.iterations, 0);
    }

    #[test]
    fn test_scores_non_negative_and_normalized() {
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.9, 0.2, -0.4, 0.0],
            vec![0.9, 1.0, 0.3, 0.1, 0.05],
            vec![0.2, 0.3, 1.0, 0.5, 0.4],
            vec![-0.4, 0.1, 0.5, 1.0, 0.7],
            vec![0.0, 0.05, 0.4, 0.7, 1.0],
        ]);
        let ranking = GraphRanker::default().rank(&matrix);

        assert_eq!(ranking.len(), 5);
        assert!(ranking.entries.iter().all(|e| e.score >= 0.0));
        assert!((ranking.total() - 1.0).abs() < 1e-9);
    }
}
