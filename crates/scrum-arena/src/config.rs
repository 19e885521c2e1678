//! Configuration file loading for the arena.
//!
//! This module provides types and functions for loading arena configuration
//! from TOML files.

use crate::retry::RetryPolicy;
use scrum_core::{Dimensions, InvalidDimensions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The configured board size is not one of the allowed sizes.
    #[error("Invalid board size in config: {0}")]
    InvalidBoard(#[from] InvalidDimensions),
}

/// Default board size for new matches.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    #[serde(default = "default_rows")]
    pub rows: u8,
    #[serde(default = "default_cols")]
    pub cols: u8,
}

fn default_rows() -> u8 {
    Dimensions::DEFAULT.rows()
}

fn default_cols() -> u8 {
    Dimensions::DEFAULT.cols()
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: default_rows(),
            cols: default_cols(),
        }
    }
}

impl BoardConfig {
    /// Validates the configured size.
    pub fn dimensions(&self) -> Result<Dimensions, ConfigError> {
        Ok(Dimensions::new(self.rows, self.cols)?)
    }
}

/// Backoff settings for storage access.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Attempts before giving up. Defaults to 5.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the first retry. Defaults to 100ms.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    /// Upper bound for any single delay. Defaults to 2000ms.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    5
}

fn default_base_delay_ms() -> u64 {
    100
}

fn default_max_delay_ms() -> u64 {
    2000
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
        }
    }
}

/// Main arena configuration structure.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Path of the SQLite database holding game records.
    #[serde(default = "default_database")]
    pub database: PathBuf,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_database() -> PathBuf {
    PathBuf::from("data/scrum-chess.db")
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            database: default_database(),
            board: BoardConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl ArenaConfig {
    /// Loads the configuration from [`Self::config_path()`].
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::config_path())
    }

    /// Loads the configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// Currently returns `scrum-arena.toml` in the current working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("scrum-arena.toml")
    }
}
