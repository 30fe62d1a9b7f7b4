//! Node ranking
//!
//! Centrality is a pluggable strategy: anything implementing [`Ranker`] can
//! score a [`CsrGraph`]. [`pagerank::PageRank`] is the default;
//! [`degree::DegreeCentrality`] is a cheap alternative.

pub mod degree;
pub mod pagerank;

use crate::errors::{PhraseGraphError, Result};
use crate::graph::csr::CsrGraph;
use serde::{Deserialize, Serialize};

/// Result of a centrality computation
#[derive(Debug, Clone)]
pub struct CentralityScores {
    /// Scores for each node (indexed by node ID)
    pub scores: Vec<f64>,
    /// Number of iterations performed (0 for closed-form measures)
    pub iterations: usize,
    /// Final convergence delta
    pub delta: f64,
    /// Whether the algorithm converged
    pub converged: bool,
}

impl CentralityScores {
    /// Create a new result
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }

    /// Get the score for a specific node
    pub fn score(&self, node: u32) -> f64 {
        self.scores.get(node as usize).copied().unwrap_or(0.0)
    }

    /// Node IDs ordered by score descending; ties keep node ID order
    pub fn ordering(&self) -> Vec<u32> {
        let mut order: Vec<u32> = (0..self.scores.len() as u32).collect();
        // sort_by is stable
        order.sort_by(|&a, &b| {
            self.score(b)
                .partial_cmp(&self.score(a))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        order
    }
}

/// A word-level ranking entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedWord {
    /// Node key (surface text or lemma)
    pub key: String,
    /// Centrality score
    pub score: f64,
    /// 1-indexed rank
    pub rank: usize,
}

/// A centrality measure over the co-occurrence graph
pub trait Ranker {
    /// Score every node of the graph.
    fn scores(&self, graph: &CsrGraph) -> Result<CentralityScores>;

    /// Rank node keys, most important first.
    fn rank(&self, graph: &CsrGraph) -> Result<Vec<RankedWord>> {
        let scores = self.scores(graph)?;
        ranked_words(graph, &scores)
    }
}

/// Materialize the ordering of `scores` as ranked keys
///
/// Fails when the ranker did not return exactly one score per node.
pub fn ranked_words(graph: &CsrGraph, scores: &CentralityScores) -> Result<Vec<RankedWord>> {
    if scores.scores.len() != graph.num_nodes {
        return Err(PhraseGraphError::invalid_config(format!(
            "ranker returned {} scores for {} nodes",
            scores.scores.len(),
            graph.num_nodes
        )));
    }

    Ok(scores
        .ordering()
        .into_iter()
        .enumerate()
        .map(|(i, node)| RankedWord {
            key: graph.key(node).to_string(),
            score: scores.score(node),
            rank: i + 1,
        })
        .collect())
}

impl<R: Ranker + ?Sized> Ranker for &R {
    fn scores(&self, graph: &CsrGraph) -> Result<CentralityScores> {
        (**self).scores(graph)
    }
}

impl<R: Ranker + ?Sized> Ranker for Box<R> {
    fn scores(&self, graph: &CsrGraph) -> Result<CentralityScores> {
        (**self).scores(graph)
    }
}
