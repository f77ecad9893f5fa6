//! Sentence graph in Compressed Sparse Row (CSR) form
//!
//! Rows are sentences. An undirected edge joins two sentences whose
//! similarity survives the threshold, and is stored once in each row.
//! Rows are filled in column order straight from the dense matrix, so
//! neighbor iteration (and therefore PageRank summation) is deterministic.

use crate::summarizer::similarity::SimilarityMatrix;

#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// Number of sentences
    pub num_nodes: usize,
    /// Row `i` owns `col_idx[row_ptr[i]..row_ptr[i + 1]]`
    pub row_ptr: Vec<usize>,
    pub col_idx: Vec<u32>,
    pub weights: Vec<f64>,
    /// Sum of each row's edge weights
    pub strength: Vec<f64>,
}

impl CsrGraph {
    /// Build the thresholded sentence graph.
    ///
    /// An off-diagonal entry becomes an edge when it is at least `threshold`
    /// and strictly positive. The diagonal never becomes a self-loop, so an
    /// N-sentence graph always has N nodes but may have no edges.
    pub fn from_similarity(matrix: &SimilarityMatrix, threshold: f64) -> Self {
        let n = matrix.size();
        let mut graph = Self::with_capacity(n);

        for i in 0..n {
            for j in (0..n).filter(|&j| j != i) {
                let sim = matrix.get(i, j);
                if sim >= threshold && sim > 0.0 {
                    graph.col_idx.push(j as u32);
                    graph.weights.push(sim);
                }
            }
            graph.close_row();
        }

        graph
    }

    /// Build a graph from an undirected edge list. Self-loops, non-positive
    /// weights and out-of-range endpoints are dropped; a repeated pair keeps
    /// its last weight.
    pub fn from_edges(num_nodes: usize, edges: &[(u32, u32, f64)]) -> Self {
        let mut rows: Vec<Vec<(u32, f64)>> = vec![Vec::new(); num_nodes];
        for &(a, b, w) in edges {
            if a == b || !(w > 0.0) || a as usize >= num_nodes || b as usize >= num_nodes {
                continue;
            }
            for (from, to) in [(a, b), (b, a)] {
                let row = &mut rows[from as usize];
                match row.iter_mut().find(|slot| slot.0 == to) {
                    Some(slot) => slot.1 = w,
                    None => row.push((to, w)),
                }
            }
        }

        let mut graph = Self::with_capacity(num_nodes);
        for mut row in rows {
            row.sort_by_key(|&(t, _)| t);
            for (t, w) in row {
                graph.col_idx.push(t);
                graph.weights.push(w);
            }
            graph.close_row();
        }
        graph
    }

    fn with_capacity(n: usize) -> Self {
        let mut row_ptr = Vec::with_capacity(n + 1);
        row_ptr.push(0);
        Self {
            num_nodes: n,
            row_ptr,
            col_idx: Vec::new(),
            weights: Vec::new(),
            strength: Vec::with_capacity(n),
        }
    }

    fn close_row(&mut self) {
        let start = self.row_ptr.last().copied().unwrap_or(0);
        self.strength.push(self.weights[start..].iter().sum());
        self.row_ptr.push(self.col_idx.len());
    }

    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let span = self.row_ptr[node]..self.row_ptr[node + 1];
        self.col_idx[span.clone()]
            .iter()
            .zip(&self.weights[span])
            .map(|(&j, &w)| (j as usize, w))
    }

    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Undirected edges, each counted once.
    pub fn edge_count(&self) -> usize {
        self.col_idx.len() / 2
    }

    /// Sentences with no edge at all; their rank mass is spread uniformly.
    pub fn isolated_nodes(&self) -> Vec<usize> {
        (0..self.num_nodes)
            .filter(|&n| self.row_ptr[n] == self.row_ptr[n + 1])
            .collect()
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> SimilarityMatrix {
        SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.5, 0.1, -0.2],
            vec![0.5, 1.0, 0.3, 0.0],
            vec![0.1, 0.3, 1.0, 0.15],
            vec![-0.2, 0.0, 0.15, 1.0],
        ])
    }

    #[test]
    fn test_threshold_sparsifies() {
        let graph = CsrGraph::from_similarity(&matrix(), 0.15);

        assert_eq!(graph.num_nodes, 4);
        // 0-1, 1-2, and 2-3 (0.15 is kept: only entries below τ drop)
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.neighbors(0).collect::<Vec<_>>(), vec![(1, 0.5)]);
    }

    #[test]
    fn test_rows_are_symmetric_and_ordered() {
        let graph = CsrGraph::from_similarity(&matrix(), 0.15);

        assert_eq!(graph.neighbors(1).collect::<Vec<_>>(), vec![(0, 0.5), (2, 0.3)]);
        assert!((graph.strength[1] - 0.8).abs() < 1e-12);
        assert!((graph.strength[3] - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_diagonal_never_becomes_self_loop() {
        let graph = CsrGraph::from_similarity(&SimilarityMatrix::from_rows(vec![vec![1.0]]), 0.0);

        assert_eq!(graph.num_nodes, 1);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.isolated_nodes(), vec![0]);
    }

    #[test]
    fn test_negative_threshold_keeps_only_positive_weights() {
        let graph = CsrGraph::from_similarity(&matrix(), -1.0);

        // -0.2 and 0.0 entries are not edges
        assert_eq!(graph.edge_count(), 4);
        assert!(graph.neighbors(3).all(|(j, _)| j == 2));
    }

    #[test]
    fn test_all_below_threshold_is_disconnected() {
        let graph = CsrGraph::from_similarity(&matrix(), 0.9);

        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.isolated_nodes(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_from_edges_drops_loops_and_keeps_last_weight() {
        let graph = CsrGraph::from_edges(3, &[(0, 0, 1.0), (0, 2, 0.4), (2, 0, 0.7), (1, 5, 1.0)]);

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors(0).collect::<Vec<_>>(), vec![(2, 0.7)]);
        assert_eq!(graph.isolated_nodes(), vec![1]);
    }

    #[test]
    fn test_empty_graph() {
        let graph = CsrGraph::default();

        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.row_ptr, vec![0]);
    }
}
