//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON)
//! - Command-line arguments, which take precedence over both

use crate::error::{Error, Result};
use nestguard_core::{PathStyle, ValidatorConfig, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Validation settings
    pub validation: ValidationSettings,

    /// Logging settings
    pub logging: LoggingSettings,
}

/// Defaults for the validate command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Maximum number of nested mappings to descend into
    pub max_depth: usize,

    /// How locations are written in error messages
    pub path_style: PathStyle,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level used when no verbosity flag is given (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            path_style: PathStyle::Dot,
        }
    }
}

impl ValidationSettings {
    /// Build a validator configuration, letting explicit arguments win
    pub fn validator_config(&self, max_depth: Option<usize>, path_style: Option<PathStyle>) -> ValidatorConfig {
        ValidatorConfig::new()
            .with_max_depth(max_depth.unwrap_or(self.max_depth))
            .with_path_style(path_style.unwrap_or(self.path_style))
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );
        let config = if is_yaml {
            serde_yaml::from_str(&content)
                .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?
        } else {
            serde_json::from_str(&content)
                .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?
        };

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in &Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(path) {
                    Ok(config) => {
                        tracing::debug!(path = %path.display(), "Loaded configuration");
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to load config");
                    }
                }
            }
        }

        // Return default config if no config file found
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) if !path.exists() => Err(Error::FileNotFound {
                path: path.to_path_buf(),
            }),
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            // Current directory
            PathBuf::from(".nestguard.yaml"),
            PathBuf::from(".nestguard.json"),
        ];

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            let nestguard_dir = config_dir.join("nestguard");
            paths.push(nestguard_dir.join("config.yaml"));
            paths.push(nestguard_dir.join("config.json"));
        }

        // Home directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".nestguard.yaml"));
            paths.push(home_dir.join(".nestguard.json"));
        }

        paths
    }
}
