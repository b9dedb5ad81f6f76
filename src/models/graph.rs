//! Dependency graph data structures
//!
//! The graph is keyed by module-relative package paths. `BTreeMap` keeps all
//! iteration in lexicographic order, which the layering and rendering code
//! relies on for byte-identical output across runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Information about one analyzed Go package
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfo {
    /// Short display name (last path segment)
    pub name: String,
    /// Module-relative package path, unique within a graph
    pub path: String,
    /// Sorted, deduplicated package paths this package imports
    pub dependencies: Vec<String>,
    /// Layer in the dependency graph (0 = leaf/bottom layer)
    pub layer: usize,
    /// Number of Go files contributing to the import set
    pub file_count: usize,
}

impl PackageInfo {
    /// Create a record for an internal package
    pub fn new(path: impl Into<String>, dependencies: Vec<String>, file_count: usize) -> Self {
        let path = path.into();
        Self {
            name: short_name(&path),
            path,
            dependencies,
            layer: 0,
            file_count,
        }
    }

    /// Create a leaf record for an external package.
    ///
    /// External package internals are never walked, so the record carries no
    /// dependencies and no file count.
    pub fn external(path: impl Into<String>) -> Self {
        Self::new(path, Vec::new(), 0)
    }
}

/// The package dependency graph produced by one analysis run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DependencyGraph {
    /// Path of the package containing the analyzed entry file
    pub entry_package: String,
    /// Name of the Go module, used to classify internal vs. external packages
    pub module_name: String,
    /// All discovered packages, keyed by package path
    pub packages: BTreeMap<String, PackageInfo>,
    /// Packages organized by layer; index 0 is the bottommost/leaf layer
    pub layers: Vec<Vec<String>>,
}

impl DependencyGraph {
    /// Create an empty graph for the given entry package and module
    pub fn new(entry_package: impl Into<String>, module_name: impl Into<String>) -> Self {
        Self {
            entry_package: entry_package.into(),
            module_name: module_name.into(),
            packages: BTreeMap::new(),
            layers: Vec::new(),
        }
    }

    /// Number of packages in the graph
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    /// Dependencies of `pkg` that are themselves present in the graph.
    ///
    /// `dependencies` may list packages that were excluded or failed to
    /// resolve; edges to those never participate in cycles or layout.
    pub fn present_dependencies<'a>(
        &'a self,
        pkg: &'a PackageInfo,
    ) -> impl Iterator<Item = &'a str> {
        pkg.dependencies
            .iter()
            .filter(|dep| self.packages.contains_key(dep.as_str()))
            .map(String::as_str)
    }

    /// Whether a package has no dependencies present in the graph
    pub fn is_leaf_package(&self, pkg_path: &str) -> bool {
        match self.packages.get(pkg_path) {
            Some(pkg) => self.present_dependencies(pkg).next().is_none(),
            None => true,
        }
    }
}

/// Extract the short display name from a package path
pub fn short_name(pkg_path: &str) -> String {
    pkg_path
        .rsplit('/')
        .next()
        .unwrap_or(pkg_path)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_takes_the_last_segment() {
        assert_eq!(short_name("example.com/app/internal/auth"), "auth");
        assert_eq!(short_name("fmt"), "fmt");
    }

    #[test]
    fn external_records_are_leaves() {
        let pkg = PackageInfo::external("fmt");
        assert!(pkg.dependencies.is_empty());
        assert_eq!(pkg.file_count, 0);
        assert_eq!(pkg.layer, 0);
    }

    #[test]
    fn present_dependencies_skip_missing_packages() {
        let mut graph = DependencyGraph::new("app", "app");
        graph.packages.insert(
            "app".to_string(),
            PackageInfo::new("app", vec!["app/util".to_string(), "fmt".to_string()], 1),
        );
        graph
            .packages
            .insert("app/util".to_string(), PackageInfo::new("app/util", vec![], 1));

        let pkg = &graph.packages["app"];
        let present: Vec<&str> = graph.present_dependencies(pkg).collect();
        assert_eq!(present, vec!["app/util"]);
        assert!(graph.is_leaf_package("app/util"));
        assert!(!graph.is_leaf_package("app"));
    }
}
