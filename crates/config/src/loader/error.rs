//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for all override loading failures.
//! - Provide conversion from lower-level errors (e.g., ConfigFileError).
//!
//! Invariants:
//! - All error variants include context for debugging (variable names, paths, etc.).

use std::path::PathBuf;
use thiserror::Error;

use crate::keybind::KeybindError;
use crate::persistence::ConfigFileError;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Unable to determine config directory: {0}")]
    ConfigDirUnavailable(String),

    #[error("Failed to read config file at {path}")]
    ConfigFileRead { path: PathBuf },

    #[error("Failed to parse config file at {path}")]
    ConfigFileParse { path: PathBuf },

    #[error("Invalid shortcut overrides in {path}: {source}")]
    InvalidOverrides {
        path: PathBuf,
        #[source]
        source: KeybindError,
    },
}

impl From<ConfigFileError> for ConfigError {
    fn from(error: ConfigFileError) -> Self {
        match error {
            ConfigFileError::Read { path, .. } => ConfigError::ConfigFileRead { path },
            ConfigFileError::Parse { path, .. } => ConfigError::ConfigFileParse { path },
        }
    }
}
