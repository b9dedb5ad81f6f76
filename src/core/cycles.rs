//! Circular dependency detection
//!
//! Finds every cycle in the internal dependency graph with a depth-first
//! traversal and marks each edge that participates in at least one cycle.
//! The result is derived fresh from a graph value on every call: the layer
//! assigner and the DOT renderer both need it, and may be looking at graphs
//! filtered with different settings.

use crate::models::graph::DependencyGraph;
use petgraph::graphmap::DiGraphMap;
use std::collections::{BTreeMap, BTreeSet};

/// Directed edges that participate in at least one cycle
#[derive(Debug, Clone, Default)]
pub struct CircularEdges {
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl CircularEdges {
    /// Whether the edge `from -> to` is part of a cycle
    pub fn is_circular(&self, from: &str, to: &str) -> bool {
        self.edges
            .get(from)
            .map(|targets| targets.contains(to))
            .unwrap_or(false)
    }

    /// Whether both `a -> b` and `b -> a` are circular.
    ///
    /// Opposite-direction cycles can both exist; bidirectional marking is an
    /// expected outcome, and the renderer draws such pairs with one
    /// double-headed edge.
    pub fn is_bidirectional(&self, a: &str, b: &str) -> bool {
        self.is_circular(a, b) && self.is_circular(b, a)
    }

    /// Whether no circular edge was found
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of marked directed edges
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }

    fn mark(&mut self, from: &str, to: &str) {
        self.edges
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string());
    }
}

/// Detect every circular edge in the graph
pub fn detect(graph: &DependencyGraph) -> CircularEdges {
    let mut circular = CircularEdges::default();
    for cycle in find_all_cycles(graph) {
        // Every consecutive pair along the cycle, wrapping around, is circular
        for i in 0..cycle.len() {
            let from = &cycle[i];
            let to = &cycle[(i + 1) % cycle.len()];
            circular.mark(from, to);
        }
    }
    circular
}

/// Find all cycles in the dependency graph using DFS.
///
/// Traversal starts from every unvisited node in lexicographic order, and
/// neighbors are visited in lexicographic order, so the returned cycles are
/// identical across runs.
pub fn find_all_cycles(graph: &DependencyGraph) -> Vec<Vec<String>> {
    let adjacency = internal_edges(graph);
    let mut cycles = Vec::new();
    let mut visited = BTreeSet::new();
    let mut rec_stack = BTreeSet::new();
    let mut path = Vec::new();

    for node in graph.packages.keys() {
        if !visited.contains(node.as_str()) {
            dfs_for_cycles(
                &adjacency,
                node,
                &mut visited,
                &mut rec_stack,
                &mut path,
                &mut cycles,
            );
        }
    }

    cycles
}

/// Build the adjacency structure over edges whose endpoints are both present
fn internal_edges(graph: &DependencyGraph) -> DiGraphMap<&str, ()> {
    let mut adjacency = DiGraphMap::new();
    for path in graph.packages.keys() {
        adjacency.add_node(path.as_str());
    }
    for (path, pkg) in &graph.packages {
        for dep in &pkg.dependencies {
            if graph.packages.contains_key(dep) {
                adjacency.add_edge(path.as_str(), dep.as_str(), ());
            }
        }
    }
    adjacency
}

fn dfs_for_cycles<'a>(
    adjacency: &DiGraphMap<&'a str, ()>,
    node: &'a str,
    visited: &mut BTreeSet<&'a str>,
    rec_stack: &mut BTreeSet<&'a str>,
    path: &mut Vec<&'a str>,
    cycles: &mut Vec<Vec<String>>,
) {
    visited.insert(node);
    rec_stack.insert(node);
    path.push(node);

    let mut neighbors: Vec<&str> = adjacency.neighbors(node).collect();
    neighbors.sort_unstable();

    for dep in neighbors {
        if !visited.contains(dep) {
            dfs_for_cycles(adjacency, dep, visited, rec_stack, path, cycles);
        } else if rec_stack.contains(dep) {
            // Back edge: the cycle is the path suffix starting at `dep`
            extract_cycle(dep, path, cycles);
        }
    }

    rec_stack.remove(node);
    path.pop();
}

fn extract_cycle(dep: &str, path: &[&str], cycles: &mut Vec<Vec<String>>) {
    if let Some(start) = path.iter().position(|node| *node == dep) {
        let cycle = path[start..].iter().map(|node| node.to_string()).collect();
        cycles.push(cycle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::graph::PackageInfo;

    fn graph_of(edges: &[(&str, &[&str])]) -> DependencyGraph {
        let mut graph = DependencyGraph::new(edges[0].0, "test");
        for (path, deps) in edges {
            let deps = deps.iter().map(|d| d.to_string()).collect();
            graph
                .packages
                .insert(path.to_string(), PackageInfo::new(*path, deps, 1));
        }
        graph
    }

    #[test]
    fn a_chain_has_no_cycles() {
        let graph = graph_of(&[("a", &["b"]), ("b", &["c"]), ("c", &[])]);
        let circular = detect(&graph);
        assert!(circular.is_empty());
        assert!(find_all_cycles(&graph).is_empty());
    }

    #[test]
    fn a_two_cycle_marks_both_directions() {
        let graph = graph_of(&[("a", &["b"]), ("b", &["a"])]);
        let circular = detect(&graph);
        assert!(circular.is_circular("a", "b"));
        assert!(circular.is_circular("b", "a"));
        assert!(circular.is_bidirectional("a", "b"));
        assert_eq!(circular.edge_count(), 2);
    }

    #[test]
    fn a_triangle_marks_every_edge_one_way() {
        let graph = graph_of(&[("a", &["b"]), ("b", &["c"]), ("c", &["a"])]);
        let circular = detect(&graph);
        assert!(circular.is_circular("a", "b"));
        assert!(circular.is_circular("b", "c"));
        assert!(circular.is_circular("c", "a"));
        assert!(!circular.is_circular("b", "a"));
        assert!(!circular.is_bidirectional("a", "b"));
    }

    #[test]
    fn edges_to_absent_packages_are_ignored() {
        let graph = graph_of(&[("a", &["b", "missing"]), ("b", &["a"])]);
        let circular = detect(&graph);
        assert!(circular.is_bidirectional("a", "b"));
        assert!(!circular.is_circular("a", "missing"));
    }

    #[test]
    fn edges_outside_the_cycle_stay_unmarked() {
        let graph = graph_of(&[
            ("a", &["b", "d"]),
            ("b", &["a"]),
            ("d", &[]),
        ]);
        let circular = detect(&graph);
        assert!(circular.is_circular("a", "b"));
        assert!(!circular.is_circular("a", "d"));
    }

    #[test]
    fn detection_is_deterministic() {
        let graph = graph_of(&[
            ("a", &["b"]),
            ("b", &["c", "a"]),
            ("c", &["a", "b"]),
        ]);
        let first = find_all_cycles(&graph);
        let second = find_all_cycles(&graph);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}
