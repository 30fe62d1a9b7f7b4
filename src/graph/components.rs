//! Connected components of the co-occurrence graph

use super::builder::GraphBuilder;
use std::collections::VecDeque;

/// Connected components as lists of node IDs.
///
/// Components are discovered by breadth-first search starting from nodes in
/// insertion order, then stably sorted by size descending, so equally sized
/// components keep discovery order. Members within a component are listed
/// in visit order.
pub fn connected_components(graph: &GraphBuilder) -> Vec<Vec<u32>> {
    let n = graph.node_count();
    let mut visited = vec![false; n];
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for seed in 0..n {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;
        queue.push_back(seed as u32);

        let mut component = Vec::new();
        while let Some(node) = queue.pop_front() {
            component.push(node);
            let Some(entry) = graph.get_node(node) else {
                continue;
            };
            let mut neighbors: Vec<u32> = entry.edges.keys().copied().collect();
            neighbors.sort_unstable();
            for neighbor in neighbors {
                if !visited[neighbor as usize] {
                    visited[neighbor as usize] = true;
                    queue.push_back(neighbor);
                }
            }
        }
        components.push(component);
    }

    components.sort_by(|a, b| b.len().cmp(&a.len()));
    components
}
