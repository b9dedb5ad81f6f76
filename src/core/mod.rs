//! Core analysis functionality

pub mod analyzer;
pub mod cache;
pub mod cycles;
pub mod entry_points;
pub mod exclude;
pub mod layers;

pub use analyzer::Analyzer;
pub use cache::ParseCache;
pub use cycles::CircularEdges;
pub use entry_points::{analyze_multiple_entry_points, find_entry_points, RepoAnalysisOptions};
