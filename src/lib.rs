//! depgraph - Go package dependency graph analysis
//!
//! This library builds the module-relative import graph of a Go codebase
//! starting from one or more entry points, detects import cycles, assigns
//! layout layers and renders Graphviz DOT visualizations.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;

// Re-export commonly used types
pub use crate::core::{
    analyze_multiple_entry_points, find_entry_points, Analyzer, ParseCache, RepoAnalysisOptions,
};
pub use crate::error::{DepgraphError, ErrorSeverity, Result};
pub use crate::models::{DependencyGraph, EntryPoint, MultiEntryResult, PackageInfo};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
