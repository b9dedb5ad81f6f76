//! Error types and definitions for depgraph
//!
//! Provides the error enum used across the crate, a severity classification
//! used to decide whether a failure aborts the process, and helper
//! constructors for the common cases.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for depgraph operations
#[derive(Debug, Error)]
pub enum DepgraphError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// Invalid path errors
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// The entry file could not be read or resolved into a package
    #[error("Error resolving entry {path}: {message}")]
    EntryResolution { path: PathBuf, message: String },

    /// A single package could not be analyzed during traversal
    #[error("Error analyzing package {package}: {message}")]
    PackageAnalysis { package: String, message: String },

    /// A package path refers to a package outside the module
    #[error("External package: {package}")]
    ExternalPackage { package: String },

    /// No go.mod was found walking up from the start path
    #[error("go.mod not found above {start}")]
    ModuleNotFound { start: PathBuf },

    /// A go.mod was found but carries no module directive
    #[error("Module name not found in {path}")]
    ModuleNameMissing { path: PathBuf },

    /// A source file could not be parsed
    #[error("Failed to parse Go source file {file}")]
    ParseFailed { file: PathBuf },

    /// The Go grammar could not be loaded into the parser
    #[error("Grammar error: {message}")]
    Grammar { message: String },

    /// A repository-level analysis failed as a whole
    #[error("Analysis failed: {message}")]
    AnalysisFailed { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Invalid output format
    #[error("Invalid output format: {format}")]
    InvalidOutputFormat { format: String },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// CSV serialization error
    #[error("CSV serialization error: {source}")]
    CsvSerialize {
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl DepgraphError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Warning level errors - operation can continue
            DepgraphError::ParseFailed { .. } => ErrorSeverity::Warning,
            DepgraphError::PackageAnalysis { .. } => ErrorSeverity::Warning,
            DepgraphError::ExternalPackage { .. } => ErrorSeverity::Warning,
            DepgraphError::ModuleNotFound { .. } => ErrorSeverity::Warning,
            DepgraphError::ModuleNameMissing { .. } => ErrorSeverity::Warning,

            // Critical errors - process should terminate
            DepgraphError::Config { .. } => ErrorSeverity::Critical,
            DepgraphError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            DepgraphError::ConfigRead { .. } => ErrorSeverity::Critical,
            DepgraphError::ConfigParse { .. } => ErrorSeverity::Critical,
            DepgraphError::InvalidOutputFormat { .. } => ErrorSeverity::Critical,
            DepgraphError::StdoutWrite { .. } => ErrorSeverity::Critical,
            DepgraphError::Grammar { .. } => ErrorSeverity::Critical,

            // Regular errors - current operation fails but overall process can continue
            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            DepgraphError::EntryResolution { path, message } => {
                format!(
                    "Cannot analyze entry file '{}': {}. Pass a readable .go file.",
                    path.display(),
                    message
                )
            }
            DepgraphError::InvalidPath { path } => {
                format!(
                    "Invalid path: '{}'. Please provide a valid file or directory path.",
                    path.display()
                )
            }
            DepgraphError::ConfigNotFound { path } => {
                format!(
                    "Configuration file not found at '{}'. Create a config file or use command line options.",
                    path.display()
                )
            }
            DepgraphError::ParseFailed { file } => {
                format!("'{}' is not valid Go source. Skipping file.", file.display())
            }
            DepgraphError::ModuleNotFound { start } => {
                format!(
                    "No go.mod found above '{}'. The containing directory will be treated as the module root.",
                    start.display()
                )
            }
            DepgraphError::Io { source } => {
                format!("File system error: {}. Check permissions and paths.", source)
            }
            // For other errors, use the standard Display implementation
            _ => self.to_string(),
        }
    }

    /// Create an IO error
    pub fn io_error(source: std::io::Error) -> Self {
        DepgraphError::Io { source }
    }

    /// Create an entry resolution error
    pub fn entry_resolution(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DepgraphError::EntryResolution {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a package analysis error
    pub fn package_analysis(package: impl Into<String>, message: impl Into<String>) -> Self {
        DepgraphError::PackageAnalysis {
            package: package.into(),
            message: message.into(),
        }
    }

    /// Create a parse failure for a source file
    pub fn parse_failed(file: impl Into<PathBuf>) -> Self {
        DepgraphError::ParseFailed { file: file.into() }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        DepgraphError::Config {
            message: message.into(),
        }
    }

    /// Create a grammar loading error
    pub fn grammar(message: impl Into<String>) -> Self {
        DepgraphError::Grammar {
            message: message.into(),
        }
    }

    /// Create a batch analysis failure
    pub fn analysis_failed(message: impl Into<String>) -> Self {
        DepgraphError::AnalysisFailed {
            message: message.into(),
        }
    }
}

// Implement From for common error types
impl From<std::io::Error> for DepgraphError {
    fn from(err: std::io::Error) -> Self {
        DepgraphError::io_error(err)
    }
}

impl From<csv::Error> for DepgraphError {
    fn from(err: csv::Error) -> Self {
        DepgraphError::Csv { source: err }
    }
}

impl From<serde_json::Error> for DepgraphError {
    fn from(err: serde_json::Error) -> Self {
        DepgraphError::JsonSerialize { source: err }
    }
}

/// Result type alias for depgraph operations
pub type Result<T> = std::result::Result<T, DepgraphError>;
