//! Entry point discovery and repository-wide analysis
//!
//! Finds every Go file declaring a zero-receiver `main` function and runs
//! one independent analysis per entry point. Entry points that fail to
//! analyze are dropped with a warning; the batch as a whole only fails when
//! no entry point can be found or none can be analyzed, and those failures
//! are reported as a structured result rather than an error.

use super::analyzer::Analyzer;
use super::cache::ParseCache;
use crate::error::{DepgraphError, Result};
use crate::models::entry::{repo_base_name, EntryPoint, MultiEntryResult};
use crate::output::dot;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// Options for a repository-wide analysis
#[derive(Debug, Clone)]
pub struct RepoAnalysisOptions {
    /// Drop packages outside each entry point's module
    pub exclude_external: bool,
    /// Wildcard patterns for internal packages to exclude
    pub exclude_dirs: Vec<String>,
    /// Analyze entry points on the rayon thread pool
    pub parallel: bool,
    /// Render a progress bar while analyzing
    pub show_progress: bool,
}

impl Default for RepoAnalysisOptions {
    fn default() -> Self {
        Self {
            exclude_external: true,
            exclude_dirs: Vec::new(),
            parallel: true,
            show_progress: false,
        }
    }
}

/// Scan a directory tree for Go files containing `main` functions.
///
/// Test files and anything under a `vendor` or `.git` directory are
/// skipped; files that fail to parse are skipped with a warning. Results
/// come back in path order.
pub fn find_entry_points(cache: &ParseCache, repo_root: &Path) -> Result<Vec<PathBuf>> {
    let repo_root = std::path::absolute(repo_root).map_err(DepgraphError::io_error)?;
    let mut parser = crate::parsers::go_source::SourceParser::new()?;
    let mut entry_points = Vec::new();

    let walker = WalkDir::new(&repo_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry));

    for entry in walker {
        let entry = entry.map_err(|err| {
            DepgraphError::io_error(std::io::Error::other(format!(
                "walking directory tree: {}",
                err
            )))
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !name.ends_with(".go") || name.ends_with("_test.go") {
            continue;
        }

        match cache.file_summary(&mut parser, entry.path()) {
            Ok(summary) => {
                if summary.has_main {
                    entry_points.push(entry.path().to_path_buf());
                }
            }
            Err(err) => {
                warn!(path = %entry.path().display(), error = %err, "failed to parse");
            }
        }
    }

    Ok(entry_points)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && matches!(
            entry.file_name().to_string_lossy().as_ref(),
            "vendor" | ".git"
        )
}

/// Find and analyze every entry point in a repository.
///
/// Batch-level failures (missing root, nothing found, nothing analyzable)
/// come back as a `MultiEntryResult` with `success == false`; an `Err` is
/// reserved for environment problems such as a missing grammar.
pub fn analyze_multiple_entry_points(
    cache: &Arc<ParseCache>,
    repo_root: &Path,
    options: &RepoAnalysisOptions,
) -> Result<MultiEntryResult> {
    let started = Instant::now();

    let repo_root = match std::path::absolute(repo_root) {
        Ok(path) => path,
        Err(err) => {
            return Ok(MultiEntryResult::failure(
                repo_root,
                format!("Error resolving repository path: {}", err),
            ))
        }
    };
    if !repo_root.is_dir() {
        return Ok(MultiEntryResult::failure(
            &repo_root,
            format!("Repository root does not exist: {}", repo_root.display()),
        ));
    }

    let entry_paths = match find_entry_points(cache, &repo_root) {
        Ok(paths) => paths,
        Err(err) => {
            return Ok(MultiEntryResult::failure(
                &repo_root,
                format!("Error finding entry points: {}", err),
            ))
        }
    };
    if entry_paths.is_empty() {
        return Ok(MultiEntryResult::failure(
            &repo_root,
            "No entry points found (files with main function)",
        ));
    }

    let progress = if options.show_progress {
        let bar = ProgressBar::new(entry_paths.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} entry points")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let process = |entry_path: &PathBuf| {
        let result = process_entry_point(cache, entry_path, &repo_root, options);
        progress.inc(1);
        result
    };

    let mut entry_points: Vec<EntryPoint> = if options.parallel {
        entry_paths.par_iter().filter_map(process).collect()
    } else {
        entry_paths.iter().filter_map(process).collect()
    };
    progress.finish_and_clear();

    if entry_points.is_empty() {
        return Ok(MultiEntryResult::failure(
            &repo_root,
            "No entry points could be successfully analyzed",
        ));
    }

    let module_name = determine_module_name(&entry_points, &repo_root);

    for entry_point in &mut entry_points {
        if let Some(graph) = &entry_point.graph {
            entry_point.dot_content = dot::render(graph);
        }
    }

    Ok(MultiEntryResult {
        success: true,
        entry_points,
        error: None,
        repo_root,
        module_name,
        scanned_at: Utc::now(),
        duration_ms: started.elapsed().as_millis() as u64,
    })
}

/// Analyze one entry point with a freshly-constructed analyzer.
/// Returns `None` (after logging) when the entry cannot be analyzed.
fn process_entry_point(
    cache: &Arc<ParseCache>,
    entry_path: &Path,
    repo_root: &Path,
    options: &RepoAnalysisOptions,
) -> Option<EntryPoint> {
    let relative_path = entry_path
        .strip_prefix(repo_root)
        .unwrap_or(entry_path)
        .to_path_buf();

    let mut analyzer = match Analyzer::with_cache(cache.clone()) {
        Ok(analyzer) => analyzer,
        Err(err) => {
            warn!(entry = %entry_path.display(), error = %err, "failed to construct analyzer");
            return None;
        }
    };

    let graph = match analyzer.analyze_from_file(
        entry_path,
        options.exclude_external,
        &options.exclude_dirs,
    ) {
        Ok(graph) => graph,
        Err(err) => {
            warn!(entry = %entry_path.display(), error = %err, "failed to analyze entry point");
            return None;
        }
    };

    let package_path = match analyzer.package_from_file(entry_path) {
        Ok(path) => path,
        Err(err) => {
            warn!(entry = %entry_path.display(), error = %err, "failed to get package path");
            return None;
        }
    };

    Some(EntryPoint {
        path: entry_path.to_path_buf(),
        relative_path,
        package_path,
        dot_content: String::new(),
        graph: Some(graph),
    })
}

/// Report the common module name, or the repository basename when entry
/// points resolved to different modules (monorepo case).
fn determine_module_name(entry_points: &[EntryPoint], repo_root: &Path) -> String {
    let mut names = entry_points
        .iter()
        .filter_map(|ep| ep.graph.as_ref())
        .map(|graph| graph.module_name.as_str());

    let first = match names.next() {
        Some(name) => name,
        None => return repo_base_name(repo_root),
    };
    if names.all(|name| name == first) {
        first.to_string()
    } else {
        repo_base_name(repo_root)
    }
}
