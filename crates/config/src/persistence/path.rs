//! Path helpers for the overrides file location.
//!
//! Responsibilities:
//! - Determine the standard overrides file path.
//! - Use `directories` crate for platform-appropriate paths.
//!
//! Does NOT handle:
//! - File I/O operations.

use std::path::PathBuf;

use anyhow::Context;

use crate::constants::{APP_DIR_NAME, OVERRIDES_FILE_NAME};

/// Returns the default path to the overrides file.
///
/// - Linux/macOS: `~/.config/shortcuts/shortcuts.json`
/// - Windows: `%AppData%\shortcuts\shortcuts.json`
pub(crate) fn default_config_path() -> Result<PathBuf, anyhow::Error> {
    let proj_dirs = directories::ProjectDirs::from("", "", APP_DIR_NAME)
        .context("Failed to determine project directories")?;

    Ok(proj_dirs.config_dir().join(OVERRIDES_FILE_NAME))
}
