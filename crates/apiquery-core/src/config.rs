//! `apiquery` Configuration Module
//!
//! Provides configuration file support via `apiquery.toml`, environment
//! variables, and runtime overrides.
//!
//! # Priority (highest to lowest)
//!
//! 1. Runtime overrides (command-line flags)
//! 2. Environment variables (`APIQUERY_*`)
//! 3. Configuration file (`apiquery.toml`)
//! 4. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::query::SortDirection;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },
}

/// Query defaults section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySection {
    /// Limit applied when none is given explicitly.
    pub default_limit: Option<u64>,
    /// Largest accepted limit.
    pub max_limit: u64,
    /// Sort direction used when an expression names none: "asc" or "desc".
    pub default_sort_direction: String,
}

impl Default for QuerySection {
    fn default() -> Self {
        Self {
            default_limit: None,
            max_limit: 10_000,
            default_sort_direction: "asc".to_string(),
        }
    }
}

impl QuerySection {
    /// Returns the configured default sort direction.
    #[must_use]
    pub fn sort_direction(&self) -> SortDirection {
        if self.default_sort_direction == "desc" {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

/// Output configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Indent rendered documents.
    pub pretty: bool,
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace.
    pub level: String,
    /// Log format: text or json.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Main `apiquery` configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QueryConfig {
    /// Query defaults.
    pub query: QuerySection,
    /// Output configuration.
    pub output: OutputConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl QueryConfig {
    /// Loads configuration from default sources.
    ///
    /// Priority: defaults < file < environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("apiquery.toml")
    }

    /// Loads configuration from a specific file path.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.as_ref().display(), "loading configuration");
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("APIQUERY_").split("__"));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Creates a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.query.max_limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: "query.max_limit".to_string(),
                message: "value must be >= 1".to_string(),
            });
        }

        if let Some(limit) = self.query.default_limit {
            if limit > self.query.max_limit {
                return Err(ConfigError::InvalidValue {
                    key: "query.default_limit".to_string(),
                    message: format!(
                        "value {limit} exceeds query.max_limit ({})",
                        self.query.max_limit
                    ),
                });
            }
        }

        let valid_directions = ["asc", "desc"];
        if !valid_directions.contains(&self.query.default_sort_direction.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "query.default_sort_direction".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.query.default_sort_direction, valid_directions
                ),
            });
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.format".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.format, valid_formats
                ),
            });
        }

        Ok(())
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}
