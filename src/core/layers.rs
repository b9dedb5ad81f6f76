//! Layer assignment for graph layout
//!
//! Assigns every package a non-negative layer: packages with no acyclic
//! in-graph dependencies sit at layer 0, and every other package sits one
//! layer above its highest-layered dependency. Leaf/utility packages anchor
//! the bottom of the diagram this way no matter how many callers they have,
//! and the entry package ends up on top.
//!
//! Edges that participate in a cycle are ignored: a cycle has no
//! well-defined topological order, and including its edges would keep the
//! fixed point from converging. Layers are computed by repeated sweeps in
//! lexicographic package order until nothing changes; the sweep order is
//! part of the output contract, since partially-computed neighbors make the
//! intermediate values order-dependent.

use super::cycles;
use crate::models::graph::DependencyGraph;
use std::collections::BTreeMap;

/// Additional sweeps beyond the package count to ensure convergence
const ITERATION_PADDING: usize = 5;

/// Compute layers for every package and organize the layer buckets
pub fn assign_layers(graph: &mut DependencyGraph) {
    let circular = cycles::detect(graph);
    let supports = build_support_index(graph, &circular);

    // Unassigned until the first sweep touches them
    let mut layers: BTreeMap<String, Option<usize>> =
        graph.packages.keys().map(|path| (path.clone(), None)).collect();

    let max_iterations = graph.packages.len() + ITERATION_PADDING;
    for _ in 0..max_iterations {
        if !sweep(graph, &mut layers, &supports) {
            break;
        }
    }

    bucket_by_layer(graph, &layers);
}

/// For each package, the in-graph dependencies it rests on, with circular
/// edges removed.
fn build_support_index(
    graph: &DependencyGraph,
    circular: &cycles::CircularEdges,
) -> BTreeMap<String, Vec<String>> {
    let mut supports: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (path, pkg) in &graph.packages {
        let deps: Vec<String> = pkg
            .dependencies
            .iter()
            .filter(|dep| graph.packages.contains_key(dep.as_str()))
            .filter(|dep| !circular.is_circular(path, dep))
            .cloned()
            .collect();
        supports.insert(path.clone(), deps);
    }
    supports
}

/// One full pass over all packages in lexicographic order.
/// Returns whether any layer changed.
fn sweep(
    graph: &mut DependencyGraph,
    layers: &mut BTreeMap<String, Option<usize>>,
    supports: &BTreeMap<String, Vec<String>>,
) -> bool {
    let mut changed = false;
    let paths: Vec<String> = graph.packages.keys().cloned().collect();

    for path in paths {
        let new_layer = optimal_layer(&path, layers, supports);
        if layers.get(&path) != Some(&Some(new_layer)) {
            layers.insert(path.clone(), Some(new_layer));
            if let Some(pkg) = graph.packages.get_mut(&path) {
                pkg.layer = new_layer;
            }
            changed = true;
        }
    }

    changed
}

/// Layer for one package given the current (possibly partial) assignment.
fn optimal_layer(
    path: &str,
    layers: &BTreeMap<String, Option<usize>>,
    supports: &BTreeMap<String, Vec<String>>,
) -> usize {
    let deps = supports.get(path).map(Vec::as_slice).unwrap_or(&[]);

    let mut highest_dep_layer: Option<usize> = None;
    for dep in deps {
        if let Some(Some(layer)) = layers.get(dep) {
            highest_dep_layer = Some(highest_dep_layer.map_or(*layer, |max| max.max(*layer)));
        }
    }

    if let Some(highest) = highest_dep_layer {
        // Sit one layer above the highest dependency
        return highest + 1;
    }

    if !deps.is_empty() {
        // Dependencies exist but none has a layer yet: keep the current
        // value if there is one, otherwise take a provisional layer that a
        // later sweep corrects.
        return match layers.get(path) {
            Some(Some(current)) => *current,
            _ => 1,
        };
    }

    // No acyclic in-graph dependencies: bottom layer
    0
}

/// Bucket packages by final layer, `layers[0]` being the bottom
fn bucket_by_layer(graph: &mut DependencyGraph, layers: &BTreeMap<String, Option<usize>>) {
    let max_layer = layers.values().filter_map(|layer| *layer).max().unwrap_or(0);

    let mut buckets: Vec<Vec<String>> = vec![Vec::new(); max_layer + 1];
    for (path, layer) in layers {
        if graph.packages.contains_key(path) {
            buckets[layer.unwrap_or(0)].push(path.clone());
        }
    }
    for bucket in &mut buckets {
        bucket.sort();
    }

    graph.layers = buckets;
}
