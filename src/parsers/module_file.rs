//! Module definition discovery
//!
//! Finds the nearest `go.mod` above a path and reads the declared module
//! name. Failure here is never fatal: the analyzer falls back to treating
//! the entry file's directory as the module root.

use crate::error::{DepgraphError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A resolved module definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
    /// Directory containing the go.mod file
    pub root: PathBuf,
    /// Module name from the `module` directive
    pub name: String,
}

/// Walk upward from `start` (a file or directory) until a go.mod is found.
pub fn find_module(start: &Path) -> Result<ModuleInfo> {
    let metadata = fs::metadata(start).map_err(DepgraphError::io_error)?;
    let mut dir = if metadata.is_dir() {
        start.to_path_buf()
    } else {
        start
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    };

    loop {
        let go_mod = dir.join("go.mod");
        if go_mod.is_file() {
            let name = read_module_name(&go_mod)?;
            return Ok(ModuleInfo { root: dir, name });
        }

        match dir.parent() {
            Some(parent) if parent != dir => dir = parent.to_path_buf(),
            _ => {
                return Err(DepgraphError::ModuleNotFound {
                    start: start.to_path_buf(),
                })
            }
        }
    }
}

/// Read the `module` directive from a go.mod file
fn read_module_name(go_mod: &Path) -> Result<String> {
    let content = fs::read_to_string(go_mod).map_err(DepgraphError::io_error)?;
    for line in content.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("module ") {
            return Ok(rest.trim().to_string());
        }
    }
    Err(DepgraphError::ModuleNameMissing {
        path: go_mod.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn finds_the_nearest_go_mod_above_a_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("go.mod"), "module example.com/app\n").unwrap();
        let nested = dir.path().join("internal/auth");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("auth.go"), "package auth\n").unwrap();

        let info = find_module(&nested.join("auth.go")).unwrap();
        assert_eq!(info.name, "example.com/app");
        assert_eq!(info.root, dir.path());
    }

    #[test]
    fn reports_a_go_mod_without_a_module_directive() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("go.mod"), "go 1.22\n").unwrap();

        let err = find_module(dir.path()).unwrap_err();
        assert!(matches!(err, DepgraphError::ModuleNameMissing { .. }));
    }

    #[test]
    fn missing_start_path_is_an_io_error() {
        let err = find_module(Path::new("/does/not/exist")).unwrap_err();
        assert!(matches!(err, DepgraphError::Io { .. }));
    }
}
