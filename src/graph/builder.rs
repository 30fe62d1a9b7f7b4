//! Co-occurrence graph builder
//!
//! Nodes are distinct canonical keys (surface text or lemma) carrying the
//! positions at which they occur; edges connect keys that appear within a
//! window that is clamped to each token's dependency subtree.
//! Uses FxHashMap for O(1) edge lookups during construction.

use crate::distance::{levenshtein, DistanceFn};
use crate::types::{AnnotatedToken, EdgeWeighting, NodeKey, TagSet};
use rustc_hash::FxHashMap;

/// A node in the graph builder
#[derive(Debug, Clone)]
pub struct BuilderNode {
    /// The canonical key for this node
    pub key: String,
    /// Global positions of every eligible occurrence, in input order
    pub positions: Vec<usize>,
    /// Adjacency list: target node ID -> edge weight
    pub edges: FxHashMap<u32, f64>,
}

impl BuilderNode {
    /// Create a new node
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            positions: Vec::new(),
            edges: FxHashMap::default(),
        }
    }
}

/// Options controlling graph construction
#[derive(Debug, Clone)]
pub struct GraphOptions {
    /// Neighbor window on each side of a token
    pub window_size: usize,
    /// Surface text or lemma as node key
    pub node_key: NodeKey,
    /// Tags whose tokens become nodes
    pub valid_pos: TagSet,
    /// Edge weight computation
    pub edge_weighting: EdgeWeighting,
    /// Distance used by [`EdgeWeighting::EditDistance`]
    pub distance: DistanceFn,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            window_size: 3,
            node_key: NodeKey::Surface,
            valid_pos: TagSet::graph_eligible(),
            edge_weighting: EdgeWeighting::EditDistance,
            distance: levenshtein,
        }
    }
}

impl GraphOptions {
    /// Builder method: set window size
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Builder method: set node key kind
    pub fn with_node_key(mut self, node_key: NodeKey) -> Self {
        self.node_key = node_key;
        self
    }

    /// Builder method: set graph-eligible tags
    pub fn with_valid_pos(mut self, valid_pos: TagSet) -> Self {
        self.valid_pos = valid_pos;
        self
    }

    /// Builder method: set edge weighting
    pub fn with_edge_weighting(mut self, edge_weighting: EdgeWeighting) -> Self {
        self.edge_weighting = edge_weighting;
        self
    }

    /// Builder method: replace the string distance
    pub fn with_distance(mut self, distance: DistanceFn) -> Self {
        self.distance = distance;
        self
    }
}

/// A mutable graph builder optimized for incremental construction
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Maps key -> node ID
    key_to_id: FxHashMap<String, u32>,
    /// Node storage, in insertion order
    nodes: Vec<BuilderNode>,
}

impl GraphBuilder {
    /// Create a new empty graph builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph builder with pre-allocated capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            key_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
        }
    }

    /// Get or create a node for the given key, returning its ID
    pub fn get_or_create_node(&mut self, key: &str) -> u32 {
        if let Some(&id) = self.key_to_id.get(key) {
            return id;
        }

        let id = self.nodes.len() as u32;
        self.key_to_id.insert(key.to_string(), id);
        self.nodes.push(BuilderNode::new(key));
        id
    }

    /// Record an occurrence position on a node
    pub fn add_position(&mut self, node: u32, position: usize) {
        if let Some(node) = self.nodes.get_mut(node as usize) {
            node.positions.push(position);
        }
    }

    /// Set the edge weight between two nodes, overwriting any previous weight
    pub fn set_edge(&mut self, from: u32, to: u32, weight: f64) {
        if from == to {
            return; // No self-loops
        }

        // Add edge in both directions (undirected graph)
        if let Some(node) = self.nodes.get_mut(from as usize) {
            node.edges.insert(to, weight);
        }
        if let Some(node) = self.nodes.get_mut(to as usize) {
            node.edges.insert(from, weight);
        }
    }

    /// Increment the edge weight between two nodes
    ///
    /// If the edge doesn't exist, it's created with the given weight.
    /// If it exists, the weight is added to the existing weight.
    pub fn increment_edge(&mut self, from: u32, to: u32, weight: f64) {
        if from == to {
            return;
        }

        if let Some(node) = self.nodes.get_mut(from as usize) {
            *node.edges.entry(to).or_insert(0.0) += weight;
        }
        if let Some(node) = self.nodes.get_mut(to as usize) {
            *node.edges.entry(from).or_insert(0.0) += weight;
        }
    }

    /// Create the edge only if it does not exist yet
    pub fn ensure_edge(&mut self, from: u32, to: u32, weight: f64) {
        if from == to {
            return;
        }

        if let Some(node) = self.nodes.get_mut(from as usize) {
            node.edges.entry(to).or_insert(weight);
        }
        if let Some(node) = self.nodes.get_mut(to as usize) {
            node.edges.entry(from).or_insert(weight);
        }
    }

    /// Build a graph with default options: edit-distance weights over the
    /// default eligible tag set.
    pub fn from_tokens(tokens: &[AnnotatedToken], window_size: usize, node_key: NodeKey) -> Self {
        let options = GraphOptions::default()
            .with_window_size(window_size)
            .with_node_key(node_key);
        Self::from_tokens_with(tokens, &options)
    }

    /// Build a graph from a contiguous run of tokens.
    ///
    /// Token positions are global; `tokens[k]` must sit at position
    /// `tokens[0].position + k`. For an eligible token at `i`, neighbors are
    /// scanned over `[max(i - w, span.start), min(i + w, limit, span.end + 1))`
    /// where `limit` is one past the last token of the slice.
    pub fn from_tokens_with(tokens: &[AnnotatedToken], options: &GraphOptions) -> Self {
        let mut builder = Self::with_capacity(tokens.len() / 2);
        let Some(first) = tokens.first() else {
            return builder;
        };
        let base = first.position;
        let limit = base + tokens.len();
        let key_kind = options.node_key;

        // Node ID per slice index; None for ineligible tokens
        let node_ids: Vec<Option<u32>> = tokens
            .iter()
            .map(|t| {
                if !options.valid_pos.contains(t.pos) {
                    return None;
                }
                let id = builder.get_or_create_node(t.key(key_kind));
                builder.add_position(id, t.position);
                Some(id)
            })
            .collect();

        for (offset, token) in tokens.iter().enumerate() {
            let Some(node_i) = node_ids[offset] else {
                continue;
            };
            let i = token.position;
            let start = i
                .saturating_sub(options.window_size)
                .max(token.span.start)
                .max(base);
            let end = i
                .saturating_add(options.window_size)
                .min(limit)
                .min(token.span.end + 1);

            for j in start..end {
                let Some(node_j) = node_ids[j - base] else {
                    continue;
                };
                if node_j == node_i {
                    continue;
                }
                match options.edge_weighting {
                    EdgeWeighting::EditDistance => {
                        let weight = (options.distance)(
                            token.key(key_kind),
                            tokens[j - base].key(key_kind),
                        );
                        builder.set_edge(node_i, node_j, weight as f64);
                    }
                    EdgeWeighting::Cooccurrence => builder.increment_edge(node_i, node_j, 1.0),
                    EdgeWeighting::Binary => builder.ensure_edge(node_i, node_j, 1.0),
                }
            }
        }

        builder
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges (counting each undirected edge once)
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum::<usize>() / 2
    }

    /// Get a node by ID
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Get a node ID by key
    pub fn get_node_id(&self, key: &str) -> Option<u32> {
        self.key_to_id.get(key).copied()
    }

    /// Get the key for a node ID
    pub fn get_key(&self, id: u32) -> Option<&str> {
        self.nodes.get(id as usize).map(|n| n.key.as_str())
    }

    /// Positions recorded for a key
    pub fn positions(&self, key: &str) -> Option<&[usize]> {
        self.get_node_id(key)
            .and_then(|id| self.get_node(id))
            .map(|n| n.positions.as_slice())
    }

    /// Neighbors of a key with their edge weights, sorted by key
    pub fn neighbors(&self, key: &str) -> Vec<(&str, f64)> {
        let Some(node) = self.get_node_id(key).and_then(|id| self.get_node(id)) else {
            return Vec::new();
        };
        let mut out: Vec<(&str, f64)> = node
            .edges
            .iter()
            .filter_map(|(&target, &weight)| self.get_key(target).map(|k| (k, weight)))
            .collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }

    /// Weight of the edge between two keys, if any
    pub fn edge_weight(&self, a: &str, b: &str) -> Option<f64> {
        let id_a = self.get_node_id(a)?;
        let id_b = self.get_node_id(b)?;
        self.get_node(id_a)?.edges.get(&id_b).copied()
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
