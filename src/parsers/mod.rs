//! Source and module-definition parsing

pub mod go_source;
pub mod module_file;

pub use go_source::{FileSummary, SourceParser};
pub use module_file::{find_module, ModuleInfo};
