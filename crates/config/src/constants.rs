//! Centralized constants for the shortcuts workspace.

/// Directory name used under the platform config directory.
pub const APP_DIR_NAME: &str = "shortcuts";

/// File name of the overrides file.
pub const OVERRIDES_FILE_NAME: &str = "shortcuts.json";

/// Environment variable naming an explicit overrides file.
pub const ENV_CONFIG_PATH: &str = "SHORTCUTS_CONFIG_PATH";

/// Environment variable that disables loading overrides entirely ("1" or "true").
pub const ENV_OVERRIDES_DISABLED: &str = "SHORTCUTS_OVERRIDES_DISABLED";
