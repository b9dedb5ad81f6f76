//! Command-line argument parsing

use crate::models::config::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// depgraph - Go package dependency graph analyzer
#[derive(Parser, Debug)]
#[command(name = "depgraph")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Analyze Go package dependencies and render them as a layered graph")]
#[command(long_about = "depgraph builds the module-relative import graph of a Go codebase. \
Given an entry .go file it walks the transitive package imports, classifies internal and \
external packages, detects import cycles and assigns every package a layout layer. Given a \
repository root it discovers every main function and analyzes each entry point independently.")]
#[command(after_help = "EXAMPLES:

Single entry point:
    # Analyze one program and print a text report
    depgraph ./cmd/server/main.go

    # Render the graph as Graphviz DOT
    depgraph ./cmd/server/main.go --output dot --output-file deps.dot

    # Include standard library and third-party packages
    depgraph ./cmd/server/main.go --external

Whole repository:
    # Discover and analyze every entry point under the current directory
    depgraph .

    # Machine-readable result for all entry points
    depgraph . --output json

Filtering:
    # Exclude generated and test-fixture packages (wildcards use *)
    depgraph . --exclude 'gen/*' --exclude testdata

Configuration:
    # Write a .depgraph.toml template to the current directory
    depgraph --init
")]
pub struct Args {
    /// Entry .go file or repository root to analyze
    #[arg(value_name = "PATH", help = "Entry .go file (single analysis) or repository root (analyze every entry point); defaults to the current directory")]
    pub path: Option<PathBuf>,

    /// Include external packages in the graph
    #[arg(short, long, help = "Include packages from outside the module (standard library and third-party imports appear as leaf nodes)")]
    pub external: bool,

    /// Exclude internal packages matching these wildcard patterns
    #[arg(short = 'x', long = "exclude", value_name = "PATTERN", help = "Wildcard pattern for internal package directories to exclude (repeatable; * matches any characters, e.g. --exclude 'gen/*')")]
    pub exclude: Vec<String>,

    /// Output format (text, json, dot, csv)
    #[arg(short, long, value_enum, value_name = "FORMAT", help = "Output format: 'text' for a readable report, 'json' for machine processing, 'dot' for Graphviz, 'csv' for spreadsheets")]
    pub output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, value_name = "FILE", help = "File to write output to (uses stdout if not specified)")]
    pub output_file: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (defaults to .depgraph.toml in the current directory)")]
    pub config: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long, help = "Suppress non-essential output (only show results)")]
    pub quiet: bool,

    /// Show detailed progress and debug information
    #[arg(short, long, help = "Show detailed progress and debug information")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, help = "Disable colored output (useful when piping output)")]
    pub no_colors: bool,

    /// Disable parallel entry-point analysis
    #[arg(long, help = "Analyze repository entry points one at a time instead of in parallel")]
    pub no_parallel: bool,

    /// Disable progress bars
    #[arg(long, help = "Disable progress bars (useful for CI environments)")]
    pub no_progress: bool,

    /// Disable the parse cache
    #[arg(long, help = "Re-parse every file instead of caching parse results across entry points")]
    pub no_cache: bool,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.depgraph.toml) in the current directory")]
    pub init: bool,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_typical_invocation() {
        let args = Args::parse_from([
            "depgraph",
            "./cmd/main.go",
            "--external",
            "-x",
            "gen/*",
            "--output",
            "dot",
        ]);
        assert_eq!(args.path, Some(PathBuf::from("./cmd/main.go")));
        assert!(args.external);
        assert_eq!(args.exclude, vec!["gen/*".to_string()]);
        assert_eq!(args.output, Some(OutputFormat::Dot));
        assert!(!args.no_colors);
    }

    #[test]
    fn defaults_leave_optional_fields_unset() {
        let args = Args::parse_from(["depgraph"]);
        assert!(args.path.is_none());
        assert!(args.output.is_none());
        assert!(!args.external);
        assert!(args.exclude.is_empty());
    }
}
