//! Error handling for depgraph
//!
//! This module provides the error type, result alias, severity levels and
//! context utilities used throughout the crate.

pub mod context;
pub mod types;

pub use context::ResultExt;
pub use types::{DepgraphError, ErrorSeverity, Result};
