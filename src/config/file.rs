//! Configuration file loading
//!
//! Settings can come from a `.depgraph.toml` in the working directory, from
//! the user configuration directory, or from an explicit `--config` path.
//! Missing default locations are fine; an explicitly requested file must
//! exist.

use crate::error::{DepgraphError, Result, ResultExt};
use crate::models::config::PartialSettings;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default configuration file name searched in the working directory
pub const CONFIG_FILE_NAME: &str = ".depgraph.toml";

/// Load configuration, preferring an explicit path when given
pub fn load(explicit: Option<&Path>) -> Result<PartialSettings> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(DepgraphError::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) => path,
            None => return Ok(PartialSettings::default()),
        },
    };

    debug!(path = %path.display(), "loading configuration file");
    parse_file(&path)
}

fn parse_file(path: &Path) -> Result<PartialSettings> {
    let content = fs::read_to_string(path).map_err(|source| DepgraphError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| DepgraphError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// First existing default config location, if any
fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join("depgraph").join("config.toml");
    if user.is_file() {
        return Some(user);
    }

    None
}

/// Write a commented default configuration file to the working directory.
/// Refuses to overwrite an existing file.
pub fn write_default() -> Result<PathBuf> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    if path.exists() {
        return Err(DepgraphError::config_error(format!(
            "{} already exists",
            path.display()
        )));
    }

    let template = r#"# depgraph configuration

# Entry .go file or repository root to analyze
# target_path = "."

# Wildcard patterns for internal package directories to exclude
# exclude_dirs = ["gen/*", "testdata"]

# Include packages from outside the module in the graph
# include_external = false

# Output format: "text", "json", "dot" or "csv"
# output_format = "text"

# Disable colored text output
# use_colors = true

# Analyze repository entry points in parallel
# parallel = true
"#;

    fs::write(&path, template)
        .with_context(|| format!("writing default configuration to {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_partial_settings_from_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "include_external = true\nexclude_dirs = [\"gen/*\"]\noutput_format = \"dot\"\n",
        )
        .unwrap();

        let partial = load(Some(&path)).unwrap();
        assert_eq!(partial.include_external, Some(true));
        assert_eq!(partial.exclude_dirs, Some(vec!["gen/*".to_string()]));
        assert!(partial.target_path.is_none());
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let err = load(Some(Path::new("/no/such/config.toml"))).unwrap_err();
        assert!(matches!(err, DepgraphError::ConfigNotFound { .. }));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "include_external = [not toml").unwrap();

        let err = load(Some(&path)).unwrap_err();
        assert!(matches!(err, DepgraphError::ConfigParse { .. }));
    }
}
