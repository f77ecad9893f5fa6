//! Weighted PageRank by power iteration
//!
//! Each step moves `damping` of a sentence's mass to its neighbors in
//! proportion to edge weight, spreads the mass of isolated sentences evenly,
//! and teleports the remaining `1 - damping` uniformly. Iteration stops once
//! the L1 change drops below `num_nodes * threshold`.

use super::PageRankResult;
use crate::graph::csr::CsrGraph;

#[derive(Debug, Clone)]
pub struct StandardPageRank {
    pub damping: f64,
    pub max_iterations: usize,
    /// Convergence tolerance, per node
    pub threshold: f64,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 500,
            threshold: 1e-6,
        }
    }
}

impl StandardPageRank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Run PageRank to convergence or `max_iterations`.
    ///
    /// A run that hits the iteration cap still returns its last scores, with
    /// `converged = false`.
    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        let n = graph.num_nodes;
        if n == 0 {
            return PageRankResult::new(vec![], 0, 0.0, true);
        }

        let nf = n as f64;
        let isolated = graph.isolated_nodes();
        let tolerance = nf * self.threshold;

        let mut current = vec![1.0 / nf; n];
        let mut next = vec![0.0; n];
        let mut iterations = 0;
        let mut delta = f64::INFINITY;

        while iterations < self.max_iterations && delta >= tolerance {
            self.step(graph, &isolated, &current, &mut next);
            delta = l1_distance(&current, &next);
            std::mem::swap(&mut current, &mut next);
            iterations += 1;
        }

        let total: f64 = current.iter().sum();
        if total > 0.0 {
            current.iter_mut().for_each(|s| *s /= total);
        }

        PageRankResult::new(current, iterations, delta, delta < tolerance)
    }

    fn step(&self, graph: &CsrGraph, isolated: &[usize], current: &[f64], next: &mut [f64]) {
        let nf = current.len() as f64;
        let stranded: f64 = isolated.iter().map(|&i| current[i]).sum();
        next.fill((1.0 - self.damping) / nf + self.damping * stranded / nf);

        for (i, &mass) in current.iter().enumerate() {
            let strength = graph.strength[i];
            if strength <= 0.0 {
                continue;
            }
            let share = self.damping * mass / strength;
            for (j, weight) in graph.neighbors(i) {
                next[j] += share * weight;
            }
        }
    }
}

fn l1_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}
