//! Settings validation and building

use crate::error::{DepgraphError, Result};
use crate::models::config::{PartialSettings, Settings};

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        if !settings.target_path.exists() {
            return Err(DepgraphError::InvalidPath {
                path: settings.target_path.clone(),
            });
        }

        if let Some(path) = &settings.output_file {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(DepgraphError::InvalidPath {
                        path: parent.to_path_buf(),
                    });
                }
            }
        }

        if settings.quiet && settings.verbose {
            return Err(DepgraphError::config_error(
                "--quiet and --verbose are mutually exclusive",
            ));
        }

        Ok(())
    }
}

/// Configuration builder for layering settings from several sources
pub struct ConfigBuilder {
    partial: PartialSettings,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self {
            partial: PartialSettings::default(),
        }
    }

    /// Merge with another partial settings; later merges win
    pub fn merge(mut self, other: PartialSettings) -> Self {
        self.partial.merge_from(other);
        self
    }

    /// Build final settings with validation
    pub fn build(self) -> Result<Settings> {
        let settings = self.partial.to_settings();
        SettingsValidator::validate(&settings)?;
        Ok(settings)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_target_path_fails_validation() {
        let partial = PartialSettings {
            target_path: Some(PathBuf::from("/no/such/target")),
            ..Default::default()
        };
        let err = ConfigBuilder::new().merge(partial).build().unwrap_err();
        assert!(matches!(err, DepgraphError::InvalidPath { .. }));
    }

    #[test]
    fn later_merges_override_earlier_ones() {
        let settings = ConfigBuilder::new()
            .merge(PartialSettings {
                target_path: Some(PathBuf::from(".")),
                include_external: Some(false),
                ..Default::default()
            })
            .merge(PartialSettings {
                include_external: Some(true),
                ..Default::default()
            })
            .build()
            .unwrap();
        assert!(settings.include_external);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let partial = PartialSettings {
            target_path: Some(PathBuf::from(".")),
            quiet: Some(true),
            verbose: Some(true),
            ..Default::default()
        };
        let err = ConfigBuilder::new().merge(partial).build().unwrap_err();
        assert!(err.is_critical());
    }
}
