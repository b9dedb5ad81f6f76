//! Output writers
//!
//! Send formatted output to stdout or to a file.

use crate::error::{DepgraphError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Write `content` to `output_file`, or stdout when no file was requested
pub fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    match output_file {
        Some(path) => fs::write(path, content).map_err(|source| DepgraphError::OutputWrite {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(content.as_bytes())
                .and_then(|_| handle.flush())
                .map_err(|source| DepgraphError::StdoutWrite { source })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_to_a_file_when_requested() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.dot");
        write_output("digraph {}\n", Some(&path)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "digraph {}\n");
    }

    #[test]
    fn reports_unwritable_paths() {
        let err = write_output("x", Some(Path::new("/no/such/dir/out.txt"))).unwrap_err();
        assert!(matches!(err, DepgraphError::OutputWrite { .. }));
    }
}
