//! PageRank
//!
//! Classic power iteration with weighted transitions and uniform
//! redistribution of dangling mass. Convergence follows the networkx rule:
//! stop once the L1 change between iterations drops below `n * tolerance`.

use super::{CentralityScores, Ranker};
use crate::errors::{PhraseGraphError, Result};
use crate::graph::csr::CsrGraph;

/// PageRank ranker
#[derive(Debug, Clone)]
pub struct PageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Per-node convergence tolerance
    pub tolerance: f64,
    /// Fail instead of returning unconverged scores
    pub strict: bool,
}

impl Default for PageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1e-4,
            strict: false,
        }
    }
}

impl PageRank {
    /// Create a new PageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the per-node convergence tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Return [`PhraseGraphError::ConvergenceFailure`] when iterations run out
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Run PageRank on a graph
    ///
    /// Returns the result even if convergence wasn't achieved, with `converged=false`.
    pub fn run(&self, graph: &CsrGraph) -> CentralityScores {
        let n = graph.num_nodes;
        if n == 0 {
            return CentralityScores::new(vec![], 0, 0.0, true);
        }

        let initial_score = 1.0 / n as f64;
        let mut scores = vec![initial_score; n];
        let mut new_scores = vec![0.0; n];

        let dangling_nodes = graph.dangling_nodes();
        let teleport = (1.0 - self.damping) / n as f64;
        let threshold = self.tolerance * n as f64;
        let mut iterations = 0;
        let mut delta = f64::MAX;

        while iterations < self.max_iterations && delta >= threshold {
            iterations += 1;

            let dangling_mass: f64 = dangling_nodes.iter().map(|&d| scores[d as usize]).sum();
            let dangling_contribution = self.damping * dangling_mass / n as f64;

            new_scores.fill(teleport + dangling_contribution);

            // Propagate scores through weighted edges
            for (node, &node_score) in scores.iter().enumerate() {
                let total_weight = graph.node_total_weight(node as u32);

                if total_weight > 0.0 {
                    for (neighbor, weight) in graph.neighbors(node as u32) {
                        new_scores[neighbor as usize] +=
                            self.damping * node_score * weight / total_weight;
                    }
                }
            }

            // L1 norm
            delta = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            std::mem::swap(&mut scores, &mut new_scores);
        }

        let sum: f64 = scores.iter().sum();
        if sum > 0.0 {
            for score in &mut scores {
                *score /= sum;
            }
        }

        CentralityScores::new(scores, iterations, delta, delta < threshold)
    }
}

impl Ranker for PageRank {
    fn scores(&self, graph: &CsrGraph) -> Result<CentralityScores> {
        let result = self.run(graph);
        if !result.converged {
            if self.strict {
                return Err(PhraseGraphError::convergence_failure(
                    result.iterations,
                    result.delta,
                ));
            }
            tracing::warn!(
                iterations = result.iterations,
                delta = result.delta,
                "pagerank stopped before converging"
            );
        }
        Ok(result)
    }
}
