//! Frozen adjacency for ranking
//!
//! Power iteration makes repeated passes over every node's neighbors, so the
//! builder's hash maps are flattened into contiguous rows once per call.

use super::builder::GraphBuilder;

/// Compressed sparse rows over the builder's node IDs
///
/// Row `n` holds both directions of every undirected edge touching `n`,
/// sorted by neighbor ID.
#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// Number of nodes
    pub num_nodes: usize,
    offsets: Vec<usize>,
    targets: Vec<u32>,
    weights: Vec<f64>,
    /// Sum of edge weights per node
    strength: Vec<f64>,
    /// Nodes with zero strength
    dangling: Vec<u32>,
    keys: Vec<String>,
}

impl CsrGraph {
    /// Flatten a builder; node IDs are preserved.
    pub fn from_builder(builder: &GraphBuilder) -> Self {
        let num_nodes = builder.node_count();
        let mut graph = Self {
            num_nodes,
            offsets: Vec::with_capacity(num_nodes + 1),
            targets: Vec::new(),
            weights: Vec::new(),
            strength: Vec::with_capacity(num_nodes),
            dangling: Vec::new(),
            keys: Vec::with_capacity(num_nodes),
        };
        graph.offsets.push(0);

        for (id, node) in builder.nodes() {
            let mut row: Vec<(u32, f64)> = node.edges.iter().map(|(&t, &w)| (t, w)).collect();
            row.sort_unstable_by_key(|&(t, _)| t);

            let strength: f64 = row.iter().map(|&(_, w)| w).sum();
            if strength <= 0.0 {
                graph.dangling.push(id);
            }
            graph.strength.push(strength);
            graph.keys.push(node.key.clone());

            for (target, weight) in row {
                graph.targets.push(target);
                graph.weights.push(weight);
            }
            graph.offsets.push(graph.targets.len());
        }

        graph
    }

    /// Weighted neighbors of `node`, by ascending ID
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let row = self.offsets[node as usize]..self.offsets[node as usize + 1];
        self.targets[row.clone()]
            .iter()
            .copied()
            .zip(self.weights[row].iter().copied())
    }

    /// Sum of the weights on `node`'s edges
    pub fn node_total_weight(&self, node: u32) -> f64 {
        self.strength[node as usize]
    }

    pub fn key(&self, node: u32) -> &str {
        &self.keys[node as usize]
    }

    /// Nodes without outgoing weight; their mass is spread uniformly
    pub fn dangling_nodes(&self) -> &[u32] {
        &self.dangling
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self::from_builder(&GraphBuilder::new())
    }
}
