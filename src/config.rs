//! Configuration module for browsr
//!
//! Manages application configuration including interaction defaults.
//! Configuration is stored in the user's config directory.

use std::fs;
use std::path::PathBuf;

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::engine::SortState;

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct BrowsrConfig {
    /// Pointer travel (in terminal cells) before a press becomes a drag.
    /// Zero falls back to the built-in default.
    #[serde(default)]
    pub drag_threshold: u16,

    /// Sort applied when a view opens; `None` keeps snapshot order
    #[serde(default)]
    pub default_sort: Option<SortState>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

impl BrowsrConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        let browsr_config_dir = config_dir.join("browsr");
        Ok(browsr_config_dir.join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        let settings = Config::builder()
            .add_source(File::from(config_path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(&config_path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{SortDirection, SortField};

    #[test]
    fn test_default_config() {
        let config = BrowsrConfig::default();
        assert_eq!(config.drag_threshold, 0);
        assert!(config.default_sort.is_none());
        assert!(!config.quiet);
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = BrowsrConfig {
            drag_threshold: 3,
            default_sort: Some(SortState {
                field: SortField::Date,
                direction: SortDirection::Descending,
            }),
            quiet: true,
        };

        let text = toml::to_string_pretty(&config).unwrap();
        let back: BrowsrConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.drag_threshold, 3);
        assert_eq!(back.default_sort, Some(config.default_sort.unwrap()));
        assert!(back.quiet);
    }
}
