//! Builder for loading shortcut overrides.
//!
//! Responsibilities:
//! - Resolve which overrides file to read (explicit path > env var > platform default).
//! - Read and validate the file into `ShortcutOverrides`.
//!
//! Does NOT handle:
//! - Applying overrides to registrations (see the core crate).

use std::path::{Path, PathBuf};

use super::env::apply_env;
use super::error::ConfigError;
use crate::keybind::validate_overrides;
use crate::persistence::{default_config_path, read_overrides_file};
use crate::types::ShortcutOverrides;

/// Loads shortcut overrides from disk.
///
/// ```no_run
/// use shortcuts_config::ConfigLoader;
///
/// let overrides = ConfigLoader::new().from_env()?.load()?;
/// # Ok::<(), shortcuts_config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    disabled: bool,
}

impl ConfigLoader {
    /// Create a loader with no explicit path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the config file path.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Skip reading any file; `load` returns empty overrides.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    pub(crate) fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub(crate) fn set_config_path(&mut self, path: Option<PathBuf>) {
        self.config_path = path;
    }

    pub(crate) fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// The path `load` will read.
    pub fn resolved_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => default_config_path()
                .map_err(|e| ConfigError::ConfigDirUnavailable(e.to_string())),
        }
    }

    /// Read and validate the overrides.
    ///
    /// A missing file yields empty overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any entry
    /// fails validation.
    pub fn load(self) -> Result<ShortcutOverrides, ConfigError> {
        if self.disabled {
            tracing::debug!("Shortcut overrides disabled");
            return Ok(ShortcutOverrides::default());
        }

        let path = self.resolved_path()?;
        let Some(overrides) = read_overrides_file(&path)? else {
            tracing::debug!(path = %path.display(), "No shortcut overrides file");
            return Ok(ShortcutOverrides::default());
        };

        validate_overrides(&overrides.overrides)
            .map_err(|source| ConfigError::InvalidOverrides { path: path.clone(), source })?;

        tracing::info!(path = %path.display(), "Loaded {} shortcut override(s)", overrides.len());
        Ok(overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let overrides = ConfigLoader::new()
            .with_config_path(dir.path().join("none.json"))
            .load()
            .unwrap();
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_load_rejects_conflicts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shortcuts.json");
        std::fs::write(
            &path,
            r#"{ "overrides": { "save": "Ctrl+S", "submit": "Ctrl+s" } }"#,
        )
        .unwrap();

        let result = ConfigLoader::new().with_config_path(path).load();
        assert!(matches!(result, Err(ConfigError::InvalidOverrides { .. })));
    }

    #[test]
    fn test_disabled_skips_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shortcuts.json");
        std::fs::write(&path, "garbage").unwrap();

        let overrides = ConfigLoader::new()
            .with_config_path(path)
            .disabled(true)
            .load()
            .unwrap();
        assert!(overrides.is_empty());
    }
}
