//! Shared parse cache
//!
//! Memoizes per-file parse results so that repository scans, which analyze
//! every entry point independently and mostly re-read the same files, only
//! parse each file once. The cache holds pure facts about file contents; the
//! per-run analyzer state (resolver, visited set, graph) is never shared.

use crate::error::Result;
use crate::parsers::go_source::{FileSummary, SourceParser};
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default number of file summaries kept in memory
const DEFAULT_CAPACITY: usize = 4096;

/// Thread-safe cache of parsed file summaries
pub struct ParseCache {
    entries: Option<Mutex<LruCache<PathBuf, Arc<FileSummary>>>>,
}

impl ParseCache {
    /// Create a cache with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a cache bounded to `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap();
        Self {
            entries: Some(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Create a pass-through cache that always re-parses
    pub fn disabled() -> Self {
        Self { entries: None }
    }

    /// Summarize a file, serving repeated requests from the cache
    pub fn file_summary(
        &self,
        parser: &mut SourceParser,
        path: &Path,
    ) -> Result<Arc<FileSummary>> {
        if let Some(entries) = &self.entries {
            if let Some(hit) = entries.lock().get(path) {
                return Ok(hit.clone());
            }
        }

        let summary = Arc::new(parser.summarize_file(path)?);
        if let Some(entries) = &self.entries {
            entries.lock().put(path.to_path_buf(), summary.clone());
        }
        Ok(summary)
    }
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::new()
    }
}
