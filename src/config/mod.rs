//! Configuration loading and validation

pub mod cli;
pub mod file;
pub mod settings;

pub use settings::{ConfigBuilder, SettingsValidator};
