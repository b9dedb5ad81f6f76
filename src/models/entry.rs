//! Entry point and repository analysis result structures

use super::graph::DependencyGraph;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A detected entry point and its analysis output
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPoint {
    /// Absolute file path
    pub path: PathBuf,
    /// Path relative to the repository root
    pub relative_path: PathBuf,
    /// Go package path of the entry file
    pub package_path: String,
    /// Generated DOT visualization
    pub dot_content: String,
    /// Internal graph data (not serialized)
    #[serde(skip)]
    pub graph: Option<DependencyGraph>,
}

/// The result of analyzing every entry point in a repository
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiEntryResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entry_points: Vec<EntryPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub repo_root: PathBuf,
    pub module_name: String,
    /// When the scan started (UTC)
    pub scanned_at: DateTime<Utc>,
    /// Wall-clock duration of the scan in milliseconds
    pub duration_ms: u64,
}

impl MultiEntryResult {
    /// Create a failed result carrying only a reason string
    pub fn failure(repo_root: impl Into<PathBuf>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            entry_points: Vec::new(),
            error: Some(error.into()),
            repo_root: repo_root.into(),
            module_name: String::new(),
            scanned_at: Utc::now(),
            duration_ms: 0,
        }
    }

    /// Entry points that carry a graph
    pub fn analyzed_entry_points(&self) -> impl Iterator<Item = &EntryPoint> {
        self.entry_points.iter().filter(|ep| ep.graph.is_some())
    }
}

/// Base name of a repository root, used as the reported module name for
/// monorepos
pub fn repo_base_name(repo_root: &Path) -> String {
    repo_root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| repo_root.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_results_carry_no_entry_points() {
        let result = MultiEntryResult::failure("/repo", "no entry points found");
        assert!(!result.success);
        assert!(result.entry_points.is_empty());
        assert_eq!(result.error.as_deref(), Some("no entry points found"));
    }

    #[test]
    fn failure_serializes_without_entry_points_field() {
        let result = MultiEntryResult::failure("/repo", "nope");
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("entryPoints"));
        assert!(json.contains("\"error\":\"nope\""));
    }

    #[test]
    fn repo_base_name_uses_the_last_component() {
        assert_eq!(repo_base_name(Path::new("/home/dev/myrepo")), "myrepo");
    }
}
