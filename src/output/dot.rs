//! Graphviz DOT rendering of dependency graphs
//!
//! Output is fully deterministic: nodes and edges are emitted in sorted
//! order, the layout seed is fixed, and colors are assigned from a fixed
//! series keyed by each package's top-level dependency path. Circular edges
//! are re-derived from the graph here rather than reused from analysis,
//! since the graph may have been built with different filter settings.

use crate::core::cycles::{self, CircularEdges};
use crate::models::graph::DependencyGraph;
use std::collections::BTreeMap;

/// Opacity for package fill colors
const FILL_COLOR_OPACITY: f64 = 0.05;
/// Maximum width for label text wrapping
const TEXT_WRAP_WIDTH: usize = 25;

/// Border colors assigned to dependency paths, in assignment order
const COLOR_SERIES: [&str; 13] = [
    "#6fdc8c", // Bright Pastel Mint
    "#6ab7ff", // Bright Sky Blue
    "#c086e8", // Soft Bright Lavender
    "#ffe066", // Pastel Lemon
    "#ff944d", // Warm Apricot
    "#4dd0b0", // Pastel Aqua Teal
    "#ff80a5", // Bright Baby Pink
    "#a98274", // Muted Rosewood
    "#a8e063", // Light Lime Pastel
    "#8c9eff", // Periwinkle Blue
    "#ff8aa1", // Coral Pink
    "#b39ddb", // Light Lavender Indigo
    "#ff80bf", // Light Magenta Pink
];

/// Generate DOT format content for Graphviz
pub fn render(graph: &DependencyGraph) -> String {
    let mut dot = String::new();
    write_header(&mut dot);

    let circular = cycles::detect(graph);
    let mut colors = ColorAssigner::new(graph);

    let node_lines = node_lines(graph, &mut colors);
    let (normal_edges, circular_edges) = edge_lines(graph, &circular, &mut colors);

    for line in &node_lines {
        dot.push_str(line);
        dot.push('\n');
    }
    dot.push_str("  \n");

    // Normal edges first, circular edges last so they draw on top
    for line in normal_edges.iter().chain(circular_edges.iter()) {
        dot.push_str(line);
        dot.push('\n');
    }

    write_rank_constraints(&mut dot, graph);

    dot.push_str("}\n");
    dot
}

fn write_header(dot: &mut String) {
    dot.push_str("digraph dependencies {\n");
    dot.push_str("  bgcolor=\"transparent\";\n");
    dot.push_str("  rankdir=TB;\n");
    dot.push_str("  splines=ortho;\n");
    dot.push_str("  nodesep=1.0;\n");
    dot.push_str("  ranksep=1.5;\n");
    dot.push_str("  concentrate=true;\n");
    dot.push_str("  start=42;\n"); // Fixed seed for deterministic layout
    dot.push_str("  ordering=out;\n");
    dot.push_str("  overlap=false;\n");
    dot.push_str("  sep=\"+30,30\";\n");
    dot.push_str("  esep=\"+15,15\";\n");
    dot.push_str("  dpi=96;\n");
    dot.push_str("  margin=\"1,1\";\n");
    dot.push_str("  pad=\"1,1\";\n");
    dot.push_str("  packmode=\"graph\";\n");
    dot.push_str(
        "  node [shape=box, style=filled, fontname=\"JetBrains Mono\", fontsize=11, penwidth=2, margin=\"0.4,0.3\", width=0, height=0, fixedsize=false];\n",
    );
    dot.push_str("  edge [fontsize=10, labelangle=0, labeldistance=1.5];\n");
    dot.push_str("  \n");
}

fn node_lines(graph: &DependencyGraph, colors: &mut ColorAssigner) -> Vec<String> {
    let mut lines = Vec::new();

    for (pkg_path, pkg) in &graph.packages {
        let node_id = sanitize_node_id(pkg_path);
        let border_color = colors.border_color(pkg_path);
        let fill_color = hex_to_rgba(border_color, FILL_COLOR_OPACITY);

        let relative_path = display_path(pkg_path, &graph.module_name);
        let wrapped_path = wrap_text(&relative_path, TEXT_WRAP_WIDTH);
        let wrapped_name = wrap_text(&pkg.name, TEXT_WRAP_WIDTH);
        let label = format!(
            "{}\\n{} files\\n{}",
            escape_label(&wrapped_name),
            pkg.file_count,
            escape_label(&wrapped_path)
        );

        lines.push(format!(
            "  {} [label=\"{}\", fillcolor=\"{}\", color=\"{}\", fontcolor=\"white\"];",
            node_id, label, fill_color, border_color
        ));
    }

    lines
}

fn edge_lines(
    graph: &DependencyGraph,
    circular: &CircularEdges,
    colors: &mut ColorAssigner,
) -> (Vec<String>, Vec<String>) {
    let mut normal = Vec::new();
    let mut cyclic = Vec::new();

    for (pkg_path, pkg) in &graph.packages {
        let from_id = sanitize_node_id(pkg_path);
        let source_color = colors.border_color(pkg_path).to_string();

        let mut deps: Vec<&str> = graph.present_dependencies(pkg).collect();
        deps.sort_unstable();

        for dep in deps {
            let to_id = sanitize_node_id(dep);
            if circular.is_circular(pkg_path, dep) {
                let direction = if circular.is_bidirectional(pkg_path, dep) {
                    ", dir=both"
                } else {
                    ""
                };
                cyclic.push(format!(
                    "  {} -> {} [color=\"red\", penwidth=1.5{}];",
                    from_id, to_id, direction
                ));
            } else {
                normal.push(format!(
                    "  {} -> {} [color=\"{}\", penwidth=1.5];",
                    from_id, to_id, source_color
                ));
            }
        }
    }

    normal.sort();
    cyclic.sort();
    (normal, cyclic)
}

/// Rank constraints pin the entry package to the top, keep each layer on one
/// rank, and sink a lone bottom-layer leaf.
fn write_rank_constraints(dot: &mut String, graph: &DependencyGraph) {
    dot.push_str("  \n");

    if !graph.entry_package.is_empty() {
        let entry_id = sanitize_node_id(&graph.entry_package);
        dot.push_str(&format!("  {{ rank=source; {}; }}\n", entry_id));
    }

    for (layer_index, layer) in graph.layers.iter().enumerate() {
        if layer.len() > 1 {
            let nodes: Vec<String> = layer
                .iter()
                .filter(|pkg_path| **pkg_path != graph.entry_package)
                .map(|pkg_path| sanitize_node_id(pkg_path))
                .collect();
            if !nodes.is_empty() {
                dot.push_str(&format!("  {{ rank=same; {}; }}\n", nodes.join("; ")));
            }
        } else if let [only] = layer.as_slice() {
            // Bucket 0 holds the leaves; a lone leaf anchors the bottom
            if only != &graph.entry_package
                && layer_index == 0
                && graph.is_leaf_package(only)
            {
                dot.push_str(&format!("  {{ rank=sink; {}; }}\n", sanitize_node_id(only)));
            }
        }
    }
}

/// Assigns border colors to packages by their top-level dependency path
struct ColorAssigner {
    module_name: String,
    assigned: BTreeMap<String, usize>,
}

impl ColorAssigner {
    fn new(graph: &DependencyGraph) -> Self {
        let mut assigned = BTreeMap::new();
        // The entry point's path takes the first color
        let entry_path = dependency_path(&graph.entry_package, &graph.module_name);
        assigned.insert(entry_path, 0);
        Self {
            module_name: graph.module_name.clone(),
            assigned,
        }
    }

    fn border_color(&mut self, pkg_path: &str) -> &'static str {
        let dep_path = dependency_path(pkg_path, &self.module_name);
        let next_index = self.assigned.len();
        let index = *self.assigned.entry(dep_path).or_insert(next_index);
        COLOR_SERIES[index % COLOR_SERIES.len()]
    }
}

/// Group key for coloring: the first path segment below the module root,
/// keeping individual service names distinct under `services/`.
fn dependency_path(pkg_path: &str, module_name: &str) -> String {
    let rel = relative_path(pkg_path, module_name);
    if rel.is_empty() {
        return "root".to_string();
    }

    let mut parts = rel.split('/');
    let root_folder = parts.next().unwrap_or("root");
    if root_folder == "services" {
        if let Some(service) = parts.next() {
            return format!("services/{}", service);
        }
    }
    root_folder.to_string()
}

fn relative_path(pkg_path: &str, module_name: &str) -> String {
    pkg_path
        .strip_prefix(module_name)
        .unwrap_or(pkg_path)
        .trim_start_matches('/')
        .to_string()
}

/// Path shown on the node label; the root package shows as "/"
fn display_path(pkg_path: &str, module_name: &str) -> String {
    let rel = relative_path(pkg_path, module_name);
    if rel.is_empty() {
        "/".to_string()
    } else {
        rel
    }
}

/// Create a valid DOT node identifier from a package path
fn sanitize_node_id(pkg_path: &str) -> String {
    let mut node_id: String = pkg_path
        .chars()
        .map(|c| match c {
            '/' | '\\' | '.' | '-' => '_',
            other => other,
        })
        .collect();

    if !node_id
        .chars()
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false)
    {
        node_id = format!("pkg_{}", node_id);
    }

    node_id
}

/// Convert a hex color to an rgba() string with the given opacity
fn hex_to_rgba(hex_color: &str, opacity: f64) -> String {
    let hex = hex_color.trim_start_matches('#');

    let (r, g, b) = if hex.len() == 6 {
        (
            u8::from_str_radix(&hex[0..2], 16).unwrap_or(0),
            u8::from_str_radix(&hex[2..4], 16).unwrap_or(0),
            u8::from_str_radix(&hex[4..6], 16).unwrap_or(0),
        )
    } else {
        (0, 0, 0)
    };

    format!("rgba({},{},{},{:.2})", r, g, b, opacity)
}

/// Escape label text for DOT, preserving `\n` line-break sequences
fn escape_label(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace("\\\\n", "\\n")
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Wrap text at `max_width`, preferring to break after path separators
fn wrap_text(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }

    let tokens = tokenize(text);
    if tokens.len() <= 1 {
        return hard_wrap(text, max_width);
    }
    wrap_tokens(&tokens, max_width)
}

/// Split text into tokens ending at separator characters
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    let chars: Vec<char> = text.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        current.push(c);
        let is_separator = matches!(c, '/' | '-' | '_' | '.');
        if is_separator && current.chars().count() > 1 {
            tokens.push(std::mem::take(&mut current));
        } else if i == chars.len() - 1 {
            tokens.push(std::mem::take(&mut current));
        }
    }

    tokens
}

fn wrap_tokens(tokens: &[String], max_width: usize) -> String {
    let mut result = String::new();
    let mut current_line = String::new();

    for token in tokens {
        let fits = current_line.chars().count() + token.chars().count() <= max_width;
        if fits {
            current_line.push_str(token);
        } else if !current_line.is_empty() {
            if !result.is_empty() {
                result.push_str("\\n");
            }
            result.push_str(&current_line);
            current_line = token.clone();
        } else {
            // A single token wider than the line; force-break it
            if !result.is_empty() {
                result.push_str("\\n");
            }
            result.push_str(&hard_wrap(token, max_width));
            current_line.clear();
        }
    }

    if !current_line.is_empty() {
        if !result.is_empty() {
            result.push_str("\\n");
        }
        result.push_str(&current_line);
    }

    result
}

/// Break text into fixed-width chunks joined by `\n`
fn hard_wrap(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut result = String::new();
    for (i, chunk) in chars.chunks(max_width).enumerate() {
        if i > 0 {
            result.push_str("\\n");
        }
        result.extend(chunk.iter());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::graph::PackageInfo;

    fn sample_graph() -> DependencyGraph {
        let mut graph = DependencyGraph::new("app", "app");
        graph.packages.insert(
            "app".to_string(),
            PackageInfo::new("app", vec!["app/util".to_string()], 2),
        );
        graph.packages.insert(
            "app/util".to_string(),
            PackageInfo::new("app/util", vec![], 1),
        );
        crate::core::layers::assign_layers(&mut graph);
        graph
    }

    #[test]
    fn render_is_deterministic() {
        let graph = sample_graph();
        assert_eq!(render(&graph), render(&graph));
    }

    #[test]
    fn render_contains_nodes_edges_and_constraints() {
        let dot = render(&sample_graph());
        assert!(dot.starts_with("digraph dependencies {"));
        assert!(dot.contains("app_util ["));
        assert!(dot.contains("app -> app_util"));
        assert!(dot.contains("{ rank=source; app; }"));
        assert!(dot.contains("{ rank=sink; app_util; }"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn circular_pairs_render_as_bidirectional_red_edges() {
        let mut graph = DependencyGraph::new("m/a", "m");
        graph.packages.insert(
            "m/a".to_string(),
            PackageInfo::new("m/a", vec!["m/b".to_string()], 1),
        );
        graph.packages.insert(
            "m/b".to_string(),
            PackageInfo::new("m/b", vec!["m/a".to_string()], 1),
        );
        crate::core::layers::assign_layers(&mut graph);

        let dot = render(&graph);
        assert!(dot.contains("m_a -> m_b [color=\"red\", penwidth=1.5, dir=both];"));
        assert!(dot.contains("m_b -> m_a [color=\"red\", penwidth=1.5, dir=both];"));
    }

    #[test]
    fn sanitize_node_id_replaces_separators() {
        assert_eq!(sanitize_node_id("a/b.c-d"), "a_b_c_d");
        assert_eq!(sanitize_node_id("9lives"), "pkg_9lives");
    }

    #[test]
    fn hex_to_rgba_formats_the_fill() {
        assert_eq!(hex_to_rgba("#6fdc8c", 0.05), "rgba(111,220,140,0.05)");
        assert_eq!(hex_to_rgba("bogus", 0.05), "rgba(0,0,0,0.05)");
    }

    #[test]
    fn wrap_text_prefers_separator_breaks() {
        assert_eq!(wrap_text("short", 25), "short");
        let wrapped = wrap_text("internal/very/long/package/path/name", 10);
        assert!(wrapped.contains("\\n"));
        for line in wrapped.split("\\n") {
            assert!(line.chars().count() <= 10, "line too wide: {}", line);
        }
    }

    #[test]
    fn wrap_text_force_breaks_unbroken_tokens() {
        let wrapped = wrap_text("abcdefghijklmnopqrstuvwxyz", 10);
        assert_eq!(wrapped, "abcdefghij\\nklmnopqrst\\nuvwxyz");
    }

    #[test]
    fn escape_label_escapes_html_metacharacters() {
        assert_eq!(escape_label("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
        assert_eq!(escape_label("a\\nb"), "a\\nb");
    }
}
