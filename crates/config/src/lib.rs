//! Configuration for keyboard shortcuts.
//!
//! This crate provides the key combination types, key string parsing and
//! validation, and the loader for user-defined shortcut overrides.

mod constants;
pub mod keybind;
mod loader;
pub mod persistence;
pub mod types;

pub use constants::{ENV_CONFIG_PATH, ENV_OVERRIDES_DISABLED};
pub use keybind::{InvalidKeyError, Key, KeyCombination, KeyModifiers, KeybindError, parse_key};
pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use persistence::{ConfigFileError, read_overrides_file, save_overrides_file};
pub use types::ShortcutOverrides;
