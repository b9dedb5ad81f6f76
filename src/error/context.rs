//! Error context utilities
//!
//! Extension trait for attaching human-readable context to results while
//! converting them into [`DepgraphError`].

use super::types::{DepgraphError, Result};
use std::fmt::Display;

/// Extension trait for adding context to results
pub trait ResultExt<T> {
    /// Replace the error with a configuration error carrying context
    fn with_context<F, S>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E: Display> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F, S>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|err| {
            DepgraphError::config_error(format!("{}: {}", context().into(), err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_context_wraps_the_message() {
        let result: std::result::Result<(), String> = Err("boom".to_string());
        let err = result.with_context(|| "loading settings").unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: loading settings: boom");
    }
}
