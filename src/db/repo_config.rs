//! Configuration file support.
//!
//! Reads backend selection and migration defaults from a TOML file
//! (`flexline.toml`).

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::factory::RepositoryType;
use super::repository::RepositoryError;
use crate::services::migration::ConflictStrategy;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub repository: RepositorySettings,
    #[serde(default)]
    pub migration: MigrationSettings,
}

/// Repository backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
}

/// Defaults applied to migration requests that omit options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationSettings {
    #[serde(default = "default_conflict_resolution")]
    pub conflict_resolution: String,
    #[serde(default = "default_include_day_types")]
    pub include_day_types: bool,
}

fn default_conflict_resolution() -> String {
    "FAIL".to_string()
}

fn default_include_day_types() -> bool {
    true
}

impl Default for MigrationSettings {
    fn default() -> Self {
        Self {
            conflict_resolution: default_conflict_resolution(),
            include_day_types: default_include_day_types(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::ConfigurationError(format!("Failed to read config file: {}", e))
        })?;

        let config: AppConfig = toml::from_str(&content).map_err(|e| {
            RepositoryError::ConfigurationError(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Load configuration from the default locations: `flexline.toml` in the
    /// current directory, then the parent directory.
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        let search_paths = [
            PathBuf::from("flexline.toml"),
            PathBuf::from("../flexline.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(RepositoryError::ConfigurationError(
            "No flexline.toml found in standard locations".to_string(),
        ))
    }

    /// Get the repository backend type.
    pub fn repository_type(&self) -> Result<RepositoryType, RepositoryError> {
        RepositoryType::from_str(&self.repository.repo_type)
    }

    /// Parse the default conflict strategy. An unknown value is a
    /// configuration error.
    pub fn default_conflict_strategy(&self) -> Result<ConflictStrategy, RepositoryError> {
        ConflictStrategy::from_str(&self.migration.conflict_resolution).map_err(|e| {
            RepositoryError::ConfigurationError(format!("Invalid conflict_resolution: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_config() {
        let toml = r#"
[repository]
type = "local"

[migration]
conflict_resolution = "RENAME"
include_day_types = false
"#;

        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Local);
        assert_eq!(
            config.default_conflict_strategy().unwrap(),
            ConflictStrategy::Rename
        );
        assert!(!config.migration.include_day_types);
    }

    #[test]
    fn test_migration_defaults() {
        let toml = r#"
[repository]
type = "local"
"#;

        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.default_conflict_strategy().unwrap(),
            ConflictStrategy::Fail
        );
        assert!(config.migration.include_day_types);
    }

    #[test]
    fn test_unknown_strategy_is_configuration_error() {
        let toml = r#"
[repository]
type = "local"

[migration]
conflict_resolution = "MERGE"
"#;

        let config: AppConfig = toml::from_str(toml).unwrap();
        assert!(matches!(
            config.default_conflict_strategy(),
            Err(RepositoryError::ConfigurationError(_))
        ));
    }
}
