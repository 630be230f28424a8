//! Reading and writing the shortcut overrides file.
//!
//! Responsibilities:
//! - Read `ShortcutOverrides` from a JSON file, treating a missing file as "no overrides".
//! - Write overrides atomically (temp file + rename).
//!
//! Does NOT handle:
//! - Deciding which path to use (see `loader`).
//! - Validating override contents (see `keybind::validate_overrides`).

mod path;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::types::ShortcutOverrides;

pub(crate) use path::default_config_path;

/// Errors that can occur when reading the overrides file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Reads the overrides file, returning `Ok(None)` if it does not exist.
pub fn read_overrides_file(path: &Path) -> Result<Option<ShortcutOverrides>, ConfigFileError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ConfigFileError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| ConfigFileError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Writes the overrides file atomically, creating parent directories as needed.
pub fn save_overrides_file(path: &Path, overrides: &ShortcutOverrides) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let temp_path = path.with_extension("tmp");
    let content = serde_json::to_string_pretty(overrides)?;
    std::fs::write(&temp_path, content).context("Failed to write temporary config file")?;
    std::fs::rename(&temp_path, path).context("Failed to move config file into place")?;

    tracing::debug!(path = %path.display(), count = overrides.len(), "Saved shortcut overrides");
    Ok(())
}
