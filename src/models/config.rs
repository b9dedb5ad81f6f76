//! Configuration-related data structures

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration settings for depgraph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Entry .go file or repository root to analyze
    pub target_path: PathBuf,

    /// Wildcard patterns for internal package directories to exclude
    pub exclude_dirs: Vec<String>,

    /// Whether to include external (non-module) packages in the graph
    pub include_external: bool,

    /// Output format (text, json, dot, csv)
    pub output_format: OutputFormat,

    /// Output file path (if not specified, output to stdout)
    pub output_file: Option<PathBuf>,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress and debug information
    pub verbose: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to analyze repository entry points in parallel
    pub parallel: bool,

    /// Whether to show a progress bar during repository scans
    pub show_progress: bool,

    /// Whether to cache parsed file summaries across entry points
    pub cache_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_path: PathBuf::from("."),
            exclude_dirs: Vec::new(),
            include_external: false,
            output_format: OutputFormat::Text,
            output_file: None,
            quiet: false,
            verbose: false,
            use_colors: true,
            parallel: true,
            show_progress: true,
            cache_enabled: true,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text report
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// Graphviz DOT visualization
    Dot,
    /// CSV output for spreadsheet analysis
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "dot" => Ok(OutputFormat::Dot),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Dot => write!(f, "dot"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialSettings {
    pub target_path: Option<PathBuf>,
    pub exclude_dirs: Option<Vec<String>>,
    pub include_external: Option<bool>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub parallel: Option<bool>,
    pub show_progress: Option<bool>,
    pub cache_enabled: Option<bool>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one.
    /// Fields from `other` take precedence over existing fields.
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.target_path.is_some() {
            self.target_path = other.target_path;
        }
        if other.exclude_dirs.is_some() {
            self.exclude_dirs = other.exclude_dirs;
        }
        if other.include_external.is_some() {
            self.include_external = other.include_external;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.output_file.is_some() {
            self.output_file = other.output_file;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
        if other.parallel.is_some() {
            self.parallel = other.parallel;
        }
        if other.show_progress.is_some() {
            self.show_progress = other.show_progress;
        }
        if other.cache_enabled.is_some() {
            self.cache_enabled = other.cache_enabled;
        }
    }

    /// Convert partial settings to full settings.
    /// Uses defaults for any fields that are None.
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(target_path) = &self.target_path {
            settings.target_path = target_path.clone();
        }
        if let Some(exclude_dirs) = &self.exclude_dirs {
            settings.exclude_dirs = exclude_dirs.clone();
        }
        if let Some(include_external) = self.include_external {
            settings.include_external = include_external;
        }
        if let Some(output_format) = self.output_format {
            settings.output_format = output_format;
        }
        if let Some(output_file) = &self.output_file {
            settings.output_file = Some(output_file.clone());
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(parallel) = self.parallel {
            settings.parallel = parallel;
        }
        if let Some(show_progress) = self.show_progress {
            settings.show_progress = show_progress;
        }
        if let Some(cache_enabled) = self.cache_enabled {
            settings.cache_enabled = cache_enabled;
        }

        settings
    }
}
