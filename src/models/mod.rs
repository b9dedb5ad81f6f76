//! Data models for depgraph

pub mod config;
pub mod entry;
pub mod graph;

pub use config::{OutputFormat, PartialSettings, Settings};
pub use entry::{EntryPoint, MultiEntryResult};
pub use graph::{DependencyGraph, PackageInfo};
