use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;
use crate::registry::DRAFT_KIND;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/template-vars/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("template-vars").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns `Config::default()`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads, parses and validates configuration from `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - At least one kind is enabled, none twice
    /// - The draft kind is enabled (new variables start as that kind)
    /// - Interval defaults are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let kinds = &self.registry.kinds;
        if kinds.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "At least one variable kind must be enabled".to_string(),
            });
        }

        if let Some((position, kind)) = kinds
            .iter()
            .enumerate()
            .find(|&(position, kind)| kinds[..position].contains(kind))
        {
            return Err(ConfigError::ValidationError {
                message: format!("Variable kind '{}' listed twice (entry {})", kind, position + 1),
            });
        }

        if !kinds.contains(&DRAFT_KIND) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Variable kind '{}' must be enabled; new variables start as that kind",
                    DRAFT_KIND
                ),
            });
        }

        if self.interval.auto_count == 0 {
            return Err(ConfigError::ValidationError {
                message: "interval.auto_count must be greater than zero".to_string(),
            });
        }

        if self.interval.values.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "interval.values must list at least one interval".to_string(),
            });
        }

        Ok(())
    }
}
