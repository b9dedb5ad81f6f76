//! Integration tests for entry point discovery and repository analysis

use depgraph::core::entry_points::{analyze_multiple_entry_points, find_entry_points};
use depgraph::core::{ParseCache, RepoAnalysisOptions};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn main_source(module_import: Option<&str>) -> String {
    match module_import {
        Some(import) => format!(
            "package main\n\nimport _ \"{}\"\n\nfunc main() {{}}\n",
            import
        ),
        None => "package main\n\nfunc main() {}\n".to_string(),
    }
}

fn sequential_options() -> RepoAnalysisOptions {
    RepoAnalysisOptions {
        exclude_external: true,
        exclude_dirs: Vec::new(),
        parallel: false,
        show_progress: false,
    }
}

#[test]
fn discovery_skips_tests_vendor_and_git() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write_file(root, "go.mod", "module test/discovery\n");
    write_file(root, "cmd/server/main.go", &main_source(None));
    write_file(root, "pkg/lib.go", "package lib\n\nfunc F() {}\n");
    write_file(root, "cmd/server/main_test.go", &main_source(None));
    write_file(root, "vendor/dep/main.go", &main_source(None));
    write_file(root, ".git/hooks/main.go", &main_source(None));

    let cache = ParseCache::new();
    let entry_points = find_entry_points(&cache, root).unwrap();

    assert_eq!(entry_points.len(), 1);
    assert!(entry_points[0].ends_with("cmd/server/main.go"));
}

#[test]
fn discovery_warns_and_skips_unparseable_files() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write_file(root, "main.go", &main_source(None));
    write_file(root, "broken.go", "package main\n\nfunc {{{\n");

    let cache = ParseCache::new();
    let entry_points = find_entry_points(&cache, root).unwrap();

    assert_eq!(entry_points.len(), 1);
    assert!(entry_points[0].ends_with("main.go"));
}

#[test]
fn single_module_repository_reports_its_module_name() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write_file(root, "go.mod", "module example.com/app\n");
    write_file(
        root,
        "cmd/server/main.go",
        &main_source(Some("example.com/app/internal/core")),
    );
    write_file(root, "cmd/cli/main.go", &main_source(None));
    write_file(root, "internal/core/core.go", "package core\n\nfunc F() {}\n");

    let cache = Arc::new(ParseCache::new());
    let result = analyze_multiple_entry_points(&cache, root, &sequential_options()).unwrap();

    assert!(result.success);
    assert_eq!(result.module_name, "example.com/app");
    assert_eq!(result.entry_points.len(), 2);

    for entry_point in &result.entry_points {
        assert!(entry_point.path.is_absolute());
        assert!(entry_point.relative_path.is_relative());
        assert!(entry_point.package_path.starts_with("example.com/app"));
        assert!(entry_point.dot_content.starts_with("digraph dependencies {"));
        assert!(entry_point.graph.is_some());
    }

    let server = result
        .entry_points
        .iter()
        .find(|ep| ep.relative_path.ends_with("cmd/server/main.go"))
        .unwrap();
    let graph = server.graph.as_ref().unwrap();
    assert!(graph.packages.contains_key("example.com/app/internal/core"));
}

#[test]
fn monorepo_reports_the_repository_basename() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write_file(root, "svc-a/go.mod", "module example.com/svc-a\n");
    write_file(root, "svc-a/main.go", &main_source(None));
    write_file(root, "svc-b/go.mod", "module example.com/svc-b\n");
    write_file(root, "svc-b/main.go", &main_source(None));

    let cache = Arc::new(ParseCache::new());
    let result = analyze_multiple_entry_points(&cache, root, &sequential_options()).unwrap();

    assert!(result.success);
    let repo_name = root.file_name().unwrap().to_string_lossy().into_owned();
    assert_eq!(result.module_name, repo_name);
    assert_eq!(result.entry_points.len(), 2);
}

#[test]
fn repository_without_entry_points_fails_the_batch() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "pkg/lib.go", "package lib\n");

    let cache = Arc::new(ParseCache::new());
    let result =
        analyze_multiple_entry_points(&cache, dir.path(), &sequential_options()).unwrap();

    assert!(!result.success);
    assert!(result.entry_points.is_empty());
    assert!(result
        .error
        .as_deref()
        .unwrap()
        .contains("No entry points found"));
}

#[test]
fn missing_repository_root_fails_the_batch() {
    let cache = Arc::new(ParseCache::new());
    let result = analyze_multiple_entry_points(
        &cache,
        Path::new("/no/such/repository"),
        &sequential_options(),
    )
    .unwrap();

    assert!(!result.success);
    assert!(result.error.as_deref().unwrap().contains("does not exist"));
}

#[test]
fn parallel_and_sequential_runs_agree() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write_file(root, "go.mod", "module test/par\n");
    write_file(root, "cmd/a/main.go", &main_source(Some("test/par/shared")));
    write_file(root, "cmd/b/main.go", &main_source(Some("test/par/shared")));
    write_file(root, "shared/shared.go", "package shared\n\nfunc F() {}\n");

    let cache = Arc::new(ParseCache::new());
    let sequential =
        analyze_multiple_entry_points(&cache, root, &sequential_options()).unwrap();
    let parallel = analyze_multiple_entry_points(
        &cache,
        root,
        &RepoAnalysisOptions {
            parallel: true,
            ..sequential_options()
        },
    )
    .unwrap();

    assert!(sequential.success && parallel.success);
    assert_eq!(sequential.module_name, parallel.module_name);

    let paths = |result: &depgraph::MultiEntryResult| -> Vec<_> {
        result.entry_points.iter().map(|ep| ep.path.clone()).collect()
    };
    assert_eq!(paths(&sequential), paths(&parallel));

    let dots = |result: &depgraph::MultiEntryResult| -> Vec<_> {
        result
            .entry_points
            .iter()
            .map(|ep| ep.dot_content.clone())
            .collect()
    };
    assert_eq!(dots(&sequential), dots(&parallel));
}
