//! Weighted degree centrality
//!
//! A closed-form alternative to PageRank: a node's score is its total edge
//! weight, normalized so that scores sum to one.

use super::{CentralityScores, Ranker};
use crate::errors::Result;
use crate::graph::csr::CsrGraph;

/// Weighted degree centrality
#[derive(Debug, Clone, Copy, Default)]
pub struct DegreeCentrality;

impl Ranker for DegreeCentrality {
    fn scores(&self, graph: &CsrGraph) -> Result<CentralityScores> {
        let mut scores: Vec<f64> = (0..graph.num_nodes as u32)
            .map(|n| graph.node_total_weight(n))
            .collect();

        let sum: f64 = scores.iter().sum();
        if sum > 0.0 {
            for score in &mut scores {
                *score /= sum;
            }
        }

        Ok(CentralityScores::new(scores, 0, 0.0, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    #[test]
    fn test_degree_scores() {
        let mut builder = GraphBuilder::new();
        let hub = builder.get_or_create_node("hub");
        let a = builder.get_or_create_node("a");
        let b = builder.get_or_create_node("b");
        builder.set_edge(hub, a, 1.0);
        builder.set_edge(hub, b, 3.0);
        let graph = CsrGraph::from_builder(&builder);

        let result = DegreeCentrality.scores(&graph).unwrap();

        assert!((result.score(hub) - 0.5).abs() < 1e-12);
        assert!((result.score(a) - 0.125).abs() < 1e-12);
        assert!((result.score(b) - 0.375).abs() < 1e-12);
    }

    #[test]
    fn test_edgeless_graph_scores_zero() {
        let mut builder = GraphBuilder::new();
        builder.get_or_create_node("a");
        builder.get_or_create_node("b");
        let graph = CsrGraph::from_builder(&builder);

        let ranked = DegreeCentrality.rank(&graph).unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].key, "a");
        assert_eq!(ranked[0].score, 0.0);
    }
}
