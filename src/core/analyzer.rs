//! Package dependency analysis
//!
//! Builds a [`DependencyGraph`] starting from one entry file: resolves the
//! module the file belongs to, walks the import graph recursively, applies
//! the exclusion rules and finally assigns layout layers. A package is
//! expanded at most once per run; cycles terminate on the visited check, not
//! on any depth limit.

use super::cache::ParseCache;
use super::{exclude, layers};
use crate::error::{DepgraphError, Result};
use crate::models::graph::{DependencyGraph, PackageInfo};
use crate::parsers::go_source::SourceParser;
use crate::parsers::module_file;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Analyzes Go package dependencies
pub struct Analyzer {
    parser: SourceParser,
    cache: Arc<ParseCache>,
    module_root: PathBuf,
    module_name: String,
    exclude_dirs: Vec<String>,
}

impl Analyzer {
    /// Create an analyzer with its own parse cache
    pub fn new() -> Result<Self> {
        Self::with_cache(Arc::new(ParseCache::new()))
    }

    /// Create an analyzer sharing an existing parse cache
    pub fn with_cache(cache: Arc<ParseCache>) -> Result<Self> {
        Ok(Self {
            parser: SourceParser::new()?,
            cache,
            module_root: PathBuf::new(),
            module_name: String::new(),
            exclude_dirs: Vec::new(),
        })
    }

    /// Analyze package dependencies starting from a Go file.
    ///
    /// With `exclude_external` set, packages outside the module are dropped
    /// entirely; otherwise they appear as leaf records whose internals are
    /// never walked. `exclude_dirs` patterns apply to internal packages
    /// only, matched against their module-relative path.
    pub fn analyze_from_file(
        &mut self,
        entry_file: &Path,
        exclude_external: bool,
        exclude_dirs: &[String],
    ) -> Result<DependencyGraph> {
        self.exclude_dirs = exclude_dirs.to_vec();

        let entry_file = std::path::absolute(entry_file).map_err(DepgraphError::io_error)?;
        if !entry_file.is_file() {
            return Err(DepgraphError::entry_resolution(
                &entry_file,
                "entry file does not exist or is not a file",
            ));
        }

        // Resolve the module for this specific entry file, so every entry
        // point in a monorepo gets its own module context.
        match module_file::find_module(&entry_file) {
            Ok(info) => {
                self.module_root = info.root;
                self.module_name = info.name;
            }
            Err(err) => {
                // No module definition: the entry file's directory becomes
                // the module root and lends it its name.
                debug!(entry = %entry_file.display(), error = %err, "falling back to directory module");
                let entry_dir = entry_file
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."));
                self.module_name = entry_dir
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| entry_dir.display().to_string());
                self.module_root = entry_dir;
            }
        }

        let entry_pkg = self.package_from_file(&entry_file)?;

        let mut graph = DependencyGraph::new(entry_pkg.clone(), self.module_name.clone());
        let mut visited = BTreeSet::new();
        self.visit_package(&entry_pkg, &mut graph, &mut visited, exclude_external)
            .map_err(|err| {
                DepgraphError::entry_resolution(
                    &entry_file,
                    format!("analyzing packages: {}", err),
                )
            })?;

        layers::assign_layers(&mut graph);

        Ok(graph)
    }

    /// Determine the package path for a Go file within the resolved module
    pub fn package_from_file(&self, file_path: &Path) -> Result<String> {
        let dir = file_path.parent().unwrap_or(Path::new("."));
        let rel = dir.strip_prefix(&self.module_root).map_err(|_| {
            DepgraphError::entry_resolution(file_path, "entry file is outside the module root")
        })?;
        Ok(join_package_path(&self.module_name, rel))
    }

    /// Recursively visit a package and its dependencies.
    ///
    /// Failures below the entry package are logged and skipped so that one
    /// broken dependency never aborts its siblings; only the direct caller
    /// (the entry package visit) propagates errors.
    fn visit_package(
        &mut self,
        pkg_path: &str,
        graph: &mut DependencyGraph,
        visited: &mut BTreeSet<String>,
        exclude_external: bool,
    ) -> Result<()> {
        // Also true for packages currently being visited higher in the
        // recursion, which is how cycles terminate.
        if !visited.insert(pkg_path.to_string()) {
            return Ok(());
        }

        if self.is_excluded_package(pkg_path) {
            return Ok(());
        }

        if !self.is_internal_package(pkg_path) {
            if exclude_external {
                return Ok(());
            }
            // External packages enter the graph as leaves; their internals
            // are never walked.
            graph
                .packages
                .insert(pkg_path.to_string(), PackageInfo::external(pkg_path));
            return Ok(());
        }

        let pkg_dir = self.package_dir(pkg_path)?;
        let (mut dependencies, file_count) =
            self.parse_package_imports(&pkg_dir).map_err(|err| {
                DepgraphError::package_analysis(pkg_path, format!("parsing imports: {}", err))
            })?;

        if exclude_external {
            dependencies.retain(|dep| self.is_internal_package(dep));
        }

        graph.packages.insert(
            pkg_path.to_string(),
            PackageInfo::new(pkg_path, dependencies.clone(), file_count),
        );

        for dep in &dependencies {
            if let Err(err) = self.visit_package(dep, graph, visited, exclude_external) {
                warn!(dependency = %dep, error = %err, "failed to analyze dependency");
            }
        }

        Ok(())
    }

    /// Whether a package belongs to the resolved module
    fn is_internal_package(&self, pkg_path: &str) -> bool {
        pkg_path.starts_with(&self.module_name)
    }

    /// Whether an internal package matches one of the exclusion patterns.
    /// External packages are never excluded by this mechanism.
    fn is_excluded_package(&self, pkg_path: &str) -> bool {
        if !self.is_internal_package(pkg_path) {
            return false;
        }
        let rel = relative_package_path(pkg_path, &self.module_name);
        exclude::matches_any(rel, &self.exclude_dirs)
    }

    /// Convert an internal package path to its directory
    fn package_dir(&self, pkg_path: &str) -> Result<PathBuf> {
        if !self.is_internal_package(pkg_path) {
            return Err(DepgraphError::ExternalPackage {
                package: pkg_path.to_string(),
            });
        }
        let rel = relative_package_path(pkg_path, &self.module_name);
        if rel.is_empty() {
            Ok(self.module_root.clone())
        } else {
            Ok(self.module_root.join(rel))
        }
    }

    /// Parse all Go files in a directory, accumulating a sorted, deduplicated
    /// import list and the count of files that parsed.
    ///
    /// Test files are skipped. A file that fails to parse contributes
    /// neither imports nor a file-count increment.
    fn parse_package_imports(&mut self, dir: &Path) -> Result<(Vec<String>, usize)> {
        let entries = fs::read_dir(dir).map_err(DepgraphError::io_error)?;

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".go") && !name.ends_with("_test.go"))
            .collect();
        names.sort();

        let mut import_set = BTreeSet::new();
        let mut file_count = 0;

        for name in names {
            let file_path = dir.join(&name);
            match self.cache.file_summary(&mut self.parser, &file_path) {
                Ok(summary) => {
                    file_count += 1;
                    import_set.extend(summary.imports.iter().cloned());
                }
                Err(err) => {
                    warn!(file = %file_path.display(), error = %err, "skipping unparseable file");
                }
            }
        }

        Ok((import_set.into_iter().collect(), file_count))
    }
}

/// Strip the module-name prefix (and its separator) from a package path
fn relative_package_path<'a>(pkg_path: &'a str, module_name: &str) -> &'a str {
    pkg_path
        .strip_prefix(module_name)
        .unwrap_or(pkg_path)
        .trim_start_matches('/')
}

/// Join a module name with a directory-relative path into a package path
fn join_package_path(module_name: &str, rel: &Path) -> String {
    let rel: Vec<String> = rel
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .filter(|segment| segment != ".")
        .collect();
    if rel.is_empty() {
        module_name.to_string()
    } else {
        format!("{}/{}", module_name, rel.join("/"))
    }
}

/// Number of dependency edges between packages present in the graph
pub fn edge_count(graph: &DependencyGraph) -> usize {
    graph
        .packages
        .values()
        .map(|pkg| graph.present_dependencies(pkg).count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_package_path_maps_the_root_to_the_bare_module() {
        assert_eq!(join_package_path("example.com/app", Path::new("")), "example.com/app");
        assert_eq!(
            join_package_path("example.com/app", Path::new("internal/auth")),
            "example.com/app/internal/auth"
        );
    }

    #[test]
    fn relative_package_path_strips_the_module_prefix() {
        assert_eq!(relative_package_path("app/internal", "app"), "internal");
        assert_eq!(relative_package_path("app", "app"), "");
        assert_eq!(relative_package_path("fmt", "app"), "fmt");
    }
}
