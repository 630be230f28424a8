//! Shortcut override configuration types.
//!
//! Responsibilities:
//! - Define `ShortcutOverrides` for user-defined shortcut customizations.
//! - Resolve override entries into parsed key combinations.
//!
//! Does NOT handle:
//! - Key parsing or validation rules (see `keybind` module at crate root).
//! - Applying overrides to live registrations (see the core crate).
//!
//! Invariants:
//! - Overrides are keyed by shortcut name, the name a registration was given.
//! - `ShortcutOverrides` uses `BTreeMap` for deterministic serialization.
//! - Only shortcuts explicitly listed here are rebound; all others keep their keys.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::keybind::{KeyCombination, KeybindError, validate_overrides};

/// User-defined shortcut overrides.
///
/// Maps shortcut names to key combination strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutOverrides {
    /// Map of shortcut name -> key combination string.
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
}

impl ShortcutOverrides {
    /// Returns true if there are no overrides configured.
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Number of configured overrides.
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    /// Get the raw override string for a shortcut, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.overrides.get(name).map(|s| s.as_str())
    }

    /// Adds or replaces an override.
    pub fn insert(&mut self, name: impl Into<String>, key: impl Into<String>) {
        self.overrides.insert(name.into(), key.into());
    }

    /// Validates every entry and returns the parsed combinations in name order.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure (syntax, reserved key, conflict).
    pub fn resolve(&self) -> Result<Vec<(String, KeyCombination)>, KeybindError> {
        validate_overrides(&self.overrides)?;

        self.overrides
            .iter()
            .map(|(name, key)| Ok((name.clone(), KeyCombination::parse(key)?)))
            .collect()
    }
}
