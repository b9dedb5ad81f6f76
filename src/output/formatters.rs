//! Output formatting functionality
//!
//! Formatters for text, JSON and CSV reports over single graphs and
//! repository-wide results. JSON keeps the camelCase document shape emitted
//! by the serde models.

use crate::core::{analyzer, cycles};
use crate::error::{DepgraphError, Result};
use crate::models::entry::MultiEntryResult;
use crate::models::graph::DependencyGraph;
use ansi_term::Colour::{Blue, Green, Red, Yellow};
use ansi_term::Style;

/// Format a dependency graph as a text report
pub fn format_graph_text(graph: &DependencyGraph, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();

    let title = format!("Dependency graph for {}", graph.module_name);
    if use_colors {
        output.push_str(&format!("{}\n\n", Blue.bold().paint(title)));
    } else {
        output.push_str(&format!("{}\n\n", title));
    }

    output.push_str(&format!("Entry package: {}\n", graph.entry_package));
    output.push_str(&format!("Packages: {}\n", graph.package_count()));
    output.push_str(&format!("Edges: {}\n", analyzer::edge_count(graph)));

    let circular = cycles::detect(graph);
    if circular.is_empty() {
        output.push_str("Circular dependencies: none\n");
    } else {
        let line = format!("Circular dependencies: {} edges", circular.edge_count());
        if use_colors {
            output.push_str(&format!("{}\n", Red.paint(line)));
        } else {
            output.push_str(&format!("{}\n", line));
        }
    }

    // Layers from the entry side down to the leaves
    output.push_str("\nLayers (top to bottom):\n");
    for (index, layer) in graph.layers.iter().enumerate().rev() {
        if layer.is_empty() {
            continue;
        }
        output.push_str(&format!("  {}: {}\n", index, layer.join(", ")));
    }

    if verbose {
        output.push_str("\nPackages:\n");
        for (path, pkg) in &graph.packages {
            output.push_str(&format!(
                "  {} ({} files, {} dependencies)\n",
                path,
                pkg.file_count,
                pkg.dependencies.len()
            ));
            for dep in &pkg.dependencies {
                let marker = if circular.is_circular(path, dep) {
                    if use_colors {
                        format!("{}", Red.paint(" (circular)"))
                    } else {
                        " (circular)".to_string()
                    }
                } else {
                    String::new()
                };
                output.push_str(&format!("    -> {}{}\n", dep, marker));
            }
        }
    }

    output
}

/// Format a repository analysis as a text report
pub fn format_multi_text(result: &MultiEntryResult, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();

    let title = format!("Repository analysis: {}", result.repo_root.display());
    if use_colors {
        output.push_str(&format!("{}\n\n", Blue.bold().paint(title)));
    } else {
        output.push_str(&format!("{}\n\n", title));
    }

    if !result.success {
        let reason = result.error.as_deref().unwrap_or("unknown failure");
        if use_colors {
            output.push_str(&format!("{}\n", Red.bold().paint(reason)));
        } else {
            output.push_str(&format!("{}\n", reason));
        }
        return output;
    }

    output.push_str(&format!("Module: {}\n", result.module_name));
    output.push_str(&format!("Entry points: {}\n", result.entry_points.len()));
    output.push_str(&format!(
        "Scanned at: {}\n",
        result.scanned_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!("Duration: {}ms\n", result.duration_ms));

    for entry_point in &result.entry_points {
        let heading = entry_point.relative_path.display().to_string();
        if use_colors {
            output.push_str(&format!(
                "\n{} {}\n",
                Green.paint("entry"),
                Style::new().bold().paint(heading)
            ));
        } else {
            output.push_str(&format!("\nentry {}\n", heading));
        }
        output.push_str(&format!("  package: {}\n", entry_point.package_path));

        if let Some(graph) = &entry_point.graph {
            output.push_str(&format!("  packages: {}\n", graph.package_count()));
            let circular = cycles::detect(graph);
            if !circular.is_empty() {
                let line = format!("  circular edges: {}", circular.edge_count());
                if use_colors {
                    output.push_str(&format!("{}\n", Yellow.paint(line)));
                } else {
                    output.push_str(&format!("{}\n", line));
                }
            }
            if verbose {
                for (index, layer) in graph.layers.iter().enumerate().rev() {
                    if !layer.is_empty() {
                        output.push_str(&format!("    {}: {}\n", index, layer.join(", ")));
                    }
                }
            }
        }
    }

    output
}

/// Format a dependency graph as pretty-printed JSON
pub fn format_graph_json(graph: &DependencyGraph) -> Result<String> {
    serde_json::to_string_pretty(graph).map_err(|e| DepgraphError::JsonSerialize { source: e })
}

/// Format a repository analysis as pretty-printed JSON
pub fn format_multi_json(result: &MultiEntryResult) -> Result<String> {
    serde_json::to_string_pretty(result).map_err(|e| DepgraphError::JsonSerialize { source: e })
}

/// Format a dependency graph as CSV, one row per package
pub fn format_graph_csv(graph: &DependencyGraph) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record(["Package", "Name", "Layer", "Files", "Dependencies"])?;
    for (path, pkg) in &graph.packages {
        writer.write_record(&[
            path.clone(),
            pkg.name.clone(),
            pkg.layer.to_string(),
            pkg.file_count.to_string(),
            pkg.dependencies.len().to_string(),
        ])?;
    }

    csv_into_string(writer)
}

/// Format a repository analysis as CSV, one row per package per entry point
pub fn format_multi_csv(result: &MultiEntryResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record(["Entry", "Package", "Name", "Layer", "Files", "Dependencies"])?;
    for entry_point in result.analyzed_entry_points() {
        if let Some(graph) = &entry_point.graph {
            for (path, pkg) in &graph.packages {
                writer.write_record(&[
                    entry_point.relative_path.display().to_string(),
                    path.clone(),
                    pkg.name.clone(),
                    pkg.layer.to_string(),
                    pkg.file_count.to_string(),
                    pkg.dependencies.len().to_string(),
                ])?;
            }
        }
    }

    csv_into_string(writer)
}

fn csv_into_string(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let data = writer
        .into_inner()
        .map_err(|e| DepgraphError::config_error(format!("finalizing CSV output: {}", e)))?;
    String::from_utf8(data).map_err(|e| DepgraphError::CsvSerialize { source: e })
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
    fn text_report_lists_layers_top_down() {
        let text = format_graph_text(&sample_graph(), false, false);
        assert!(text.contains("Entry package: app"));
        let top = text.find("1: app").unwrap();
        let bottom = text.find("0: app/util").unwrap();
        assert!(top < bottom);
    }

    #[test]
    fn verbose_text_report_lists_dependencies() {
        let text = format_graph_text(&sample_graph(), false, true);
        assert!(text.contains("-> app/util"));
    }

    #[test]
    fn json_uses_the_camel_case_wire_format() {
        let json = format_graph_json(&sample_graph()).unwrap();
        assert!(json.contains("\"entryPackage\""));
        assert!(json.contains("\"moduleName\""));
        assert!(json.contains("\"fileCount\""));
    }

    #[test]
    fn csv_has_one_row_per_package() {
        let csv = format_graph_csv(&sample_graph()).unwrap();
        let lines: Vec<&str> = csv.trim_end().lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Package,Name,Layer,Files,Dependencies");
        assert!(lines.iter().any(|l| l.starts_with("app/util,util,0,1,0")));
    }
}
