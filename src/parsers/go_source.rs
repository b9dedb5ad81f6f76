//! Go source file reading
//!
//! Wraps a tree-sitter parser with the Go grammar and extracts the two facts
//! the analyzer needs from a file: the import paths it declares and whether
//! it defines a zero-receiver `main` function. Methods in Go source are
//! `method_declaration` nodes in the grammar, so checking only
//! `function_declaration` nodes already enforces the zero-receiver rule.

use crate::error::{DepgraphError, Result};
use std::fs;
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Facts extracted from a single Go source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSummary {
    /// Import paths declared by the file, in declaration order
    pub imports: Vec<String>,
    /// Whether the file declares a zero-receiver `main` function
    pub has_main: bool,
}

/// A reusable Go source parser
pub struct SourceParser {
    parser: Parser,
}

impl SourceParser {
    /// Create a parser with the Go grammar loaded
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::language())
            .map_err(|err| DepgraphError::grammar(err.to_string()))?;
        Ok(Self { parser })
    }

    /// Read and summarize a Go source file.
    ///
    /// Returns `ParseFailed` for files the grammar rejects; callers treat
    /// that as a per-file recoverable condition.
    pub fn summarize_file(&mut self, path: &Path) -> Result<FileSummary> {
        let source = fs::read_to_string(path).map_err(DepgraphError::io_error)?;
        self.summarize_source(&source)
            .ok_or_else(|| DepgraphError::parse_failed(path))
    }

    /// Summarize Go source text; `None` if it does not parse cleanly
    pub fn summarize_source(&mut self, source: &str) -> Option<FileSummary> {
        let tree = self.parser.parse(source, None)?;
        let root = tree.root_node();
        if root.has_error() {
            return None;
        }

        let mut summary = FileSummary::default();
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            match child.kind() {
                "import_declaration" => collect_imports(&child, source, &mut summary.imports),
                "function_declaration" => {
                    if let Some(name) = child.child_by_field_name("name") {
                        if node_text(&name, source) == "main" {
                            summary.has_main = true;
                        }
                    }
                }
                _ => {}
            }
        }
        Some(summary)
    }
}

/// Collect import paths from an `import_declaration` node.
/// A declaration holds either a single `import_spec` or an `import_spec_list`.
fn collect_imports(node: &Node, source: &str, out: &mut Vec<String>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "import_spec_list" => {
                let mut spec_cursor = child.walk();
                for spec in child.children(&mut spec_cursor) {
                    if spec.kind() == "import_spec" {
                        push_import_path(&spec, source, out);
                    }
                }
            }
            "import_spec" => push_import_path(&child, source, out),
            _ => {}
        }
    }
}

fn push_import_path(spec: &Node, source: &str, out: &mut Vec<String>) {
    if let Some(path_node) = spec.child_by_field_name("path") {
        // The path literal keeps its quotes (or backticks for raw strings)
        let raw = node_text(&path_node, source);
        let path = raw.trim_matches(|c| c == '"' || c == '`');
        if !path.is_empty() {
            out.push(path.to_string());
        }
    }
}

fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}
