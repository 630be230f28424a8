//! Key combination parsing and validation.
//!
//! Responsibilities:
//! - Define the `Key` / `KeyModifiers` / `KeyCombination` value types.
//! - Parse human-readable key strings ("Ctrl+Alt+K", "F5", "Enter") into combinations.
//! - Validate shortcut overrides for conflicts, reserved keys and invalid syntax.
//!
//! Does NOT handle:
//! - Integration with crossterm (that's in the core crate).
//! - Runtime key event matching or dispatch.
//!
//! Invariants:
//! - A `KeyCombination` always holds a validated key; there is no way to build an
//!   invalid one outside this module.
//! - ASCII letters are stored lowercase, so 'K' and 'k' name the same key.
//! - Equality and hashing depend only on the key and the modifier *set*.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest function key that can be bound.
pub const MAX_FUNCTION_KEY: u8 = 24;

/// Rejected key identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidKeyError {
    /// Control characters and whitespace are not bindable as characters.
    #[error("character {0:?} cannot be bound as a shortcut key")]
    UnsupportedChar(char),

    /// Function key number outside F1-F24.
    #[error("function key F{0} is out of range (F1-F{MAX_FUNCTION_KEY})")]
    FunctionKeyOutOfRange(u8),
}

/// Errors that can occur when parsing or validating key bindings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeybindError {
    /// Invalid key syntax
    #[error("Invalid key syntax: '{key}'. Expected format like 'k', 'Ctrl+k', 'Alt+Shift+Enter', 'F1'")]
    InvalidSyntax {
        /// The invalid key string
        key: String,
    },

    /// Unknown key name
    #[error("Unknown key name: '{name}'")]
    UnknownKey {
        /// The unknown key name
        name: String,
    },

    /// Key name was recognised but is not bindable
    #[error(transparent)]
    InvalidKey(#[from] InvalidKeyError),

    /// An override could not be parsed
    #[error("Invalid key '{key}' for shortcut '{name}': {reason}")]
    InvalidOverride {
        /// Shortcut name from the overrides map
        name: String,
        /// The offending key string
        key: String,
        /// Parser message
        reason: String,
    },

    /// Conflicting keybindings
    #[error("Conflicting shortcuts: '{key}' is assigned to both {first} and {second}")]
    Conflict {
        /// The conflicting key
        key: String,
        /// First shortcut using this key
        first: String,
        /// Second shortcut using this key
        second: String,
    },

    /// Reserved keybinding
    #[error("Reserved key combination: '{key}' cannot be overridden")]
    ReservedKey {
        /// The reserved key
        key: String,
    },
}

/// The primary (non-modifier) key of a combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// A printable character key (e.g., 'a', '1', '*')
    Char(char),
    /// Function key F1-F24
    F(u8),
    /// Escape key
    Esc,
    /// Enter/Return key
    Enter,
    /// Space key
    Space,
    /// Tab key
    Tab,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Insert key
    Insert,
    /// Home key
    Home,
    /// End key
    End,
    /// Page Up key
    PageUp,
    /// Page Down key
    PageDown,
    /// Up arrow key
    Up,
    /// Down arrow key
    Down,
    /// Left arrow key
    Left,
    /// Right arrow key
    Right,
}

impl Key {
    /// Checks the key is bindable and returns its normalised form.
    fn validated(self) -> Result<Self, InvalidKeyError> {
        match self {
            Self::Char(c) if c.is_control() || c.is_whitespace() => {
                Err(InvalidKeyError::UnsupportedChar(c))
            }
            Self::Char(c) => Ok(Self::Char(c.to_ascii_lowercase())),
            Self::F(n) if n == 0 || n > MAX_FUNCTION_KEY => {
                Err(InvalidKeyError::FunctionKeyOutOfRange(n))
            }
            other => Ok(other),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            Self::F(n) => write!(f, "F{}", n),
            Self::Esc => write!(f, "Esc"),
            Self::Enter => write!(f, "Enter"),
            Self::Space => write!(f, "Space"),
            Self::Tab => write!(f, "Tab"),
            Self::Backspace => write!(f, "Backspace"),
            Self::Delete => write!(f, "Delete"),
            Self::Insert => write!(f, "Insert"),
            Self::Home => write!(f, "Home"),
            Self::End => write!(f, "End"),
            Self::PageUp => write!(f, "PageUp"),
            Self::PageDown => write!(f, "PageDown"),
            Self::Up => write!(f, "Up"),
            Self::Down => write!(f, "Down"),
            Self::Left => write!(f, "Left"),
            Self::Right => write!(f, "Right"),
        }
    }
}

bitflags! {
    /// Modifier set of a key combination.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
    pub struct KeyModifiers: u8 {
        const CTRL = 1 << 0;
        const ALT = 1 << 1;
        const SHIFT = 1 << 2;
        /// Cmd on macOS, the Windows/Super key elsewhere.
        const META = 1 << 3;
    }
}

impl fmt::Display for KeyModifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = modifier_names(*self);
        if parts.is_empty() {
            write!(f, "None")
        } else {
            write!(f, "{}", parts.join("+"))
        }
    }
}

fn modifier_names(modifiers: KeyModifiers) -> Vec<&'static str> {
    let mut parts = Vec::new();
    if modifiers.contains(KeyModifiers::CTRL) {
        parts.push("Ctrl");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift");
    }
    if modifiers.contains(KeyModifiers::META) {
        parts.push("Meta");
    }
    parts
}

/// A primary key plus a set of modifiers.
///
/// Serialised as its canonical string (`"Ctrl+Alt+K"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyCombination {
    key: Key,
    modifiers: KeyModifiers,
}

impl KeyCombination {
    /// Builds a combination, rejecting keys that cannot be bound.
    ///
    /// # Examples
    ///
    /// ```
    /// use shortcuts_config::keybind::{Key, KeyCombination, KeyModifiers};
    ///
    /// let alt_ctrl = KeyModifiers::ALT | KeyModifiers::CTRL;
    /// let a = KeyCombination::new(Key::Char('K'), alt_ctrl).unwrap();
    /// let b = KeyCombination::new(Key::Char('k'), KeyModifiers::CTRL | KeyModifiers::ALT)
    ///     .unwrap();
    /// assert_eq!(a, b);
    ///
    /// assert!(KeyCombination::new(Key::Char('\n'), KeyModifiers::empty()).is_err());
    /// ```
    pub fn new(key: Key, modifiers: KeyModifiers) -> Result<Self, InvalidKeyError> {
        Ok(Self {
            key: key.validated()?,
            modifiers,
        })
    }

    /// Shorthand for a combination without modifiers.
    pub fn key(key: Key) -> Result<Self, InvalidKeyError> {
        Self::new(key, KeyModifiers::empty())
    }

    /// Parses a key string like "Ctrl+x", "F1", "Alt+Shift+Enter".
    pub fn parse(key_str: &str) -> Result<Self, KeybindError> {
        parse_key(key_str)
    }

    /// The primary key.
    pub fn primary(&self) -> Key {
        self.key
    }

    /// The modifier set.
    pub fn modifiers(&self) -> KeyModifiers {
        self.modifiers
    }

    /// Returns a copy with the given modifiers added.
    #[must_use]
    pub fn with_modifiers(self, modifiers: KeyModifiers) -> Self {
        Self {
            modifiers: self.modifiers | modifiers,
            ..self
        }
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in modifier_names(self.modifiers) {
            write!(f, "{}+", name)?;
        }
        write!(f, "{}", self.key)
    }
}

impl FromStr for KeyCombination {
    type Err = KeybindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key(s)
    }
}

impl TryFrom<String> for KeyCombination {
    type Error = KeybindError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_key(&value)
    }
}

impl From<KeyCombination> for String {
    fn from(value: KeyCombination) -> Self {
        value.to_string()
    }
}

/// Parse a key string like "Ctrl+x", "F1", "Meta+Shift+Tab" into a combination.
///
/// # Examples
///
/// ```
/// use shortcuts_config::keybind::{parse_key, Key, KeyModifiers};
///
/// let combo = parse_key("Ctrl+x").unwrap();
/// assert_eq!(combo.primary(), Key::Char('x'));
/// assert!(combo.modifiers().contains(KeyModifiers::CTRL));
///
/// let combo = parse_key("F1").unwrap();
/// assert_eq!(combo.primary(), Key::F(1));
/// ```
pub fn parse_key(key_str: &str) -> Result<KeyCombination, KeybindError> {
    let key_str = key_str.trim();

    if key_str.is_empty() {
        return Err(KeybindError::InvalidSyntax {
            key: key_str.to_string(),
        });
    }

    // A trailing "++" (or a bare "+") binds the plus key itself
    let (prefix, key_name) = if key_str == "+" {
        ("", "+")
    } else if let Some(prefix) = key_str.strip_suffix("++") {
        (prefix, "+")
    } else {
        match key_str.rsplit_once('+') {
            Some((prefix, name)) => (prefix, name.trim()),
            None => ("", key_str),
        }
    };

    if key_name.is_empty() || parse_modifier(key_name).is_some() {
        return Err(KeybindError::InvalidSyntax {
            key: key_str.to_string(),
        });
    }

    let mut modifiers = KeyModifiers::empty();
    if !prefix.is_empty() {
        for part in prefix.split('+').map(str::trim) {
            match parse_modifier(part) {
                Some(modifier) => modifiers |= modifier,
                None => {
                    // Anything before the key name must be a modifier
                    return Err(KeybindError::InvalidSyntax {
                        key: key_str.to_string(),
                    });
                }
            }
        }
    }

    let key = parse_key_name(key_name)?;
    Ok(KeyCombination::new(key, modifiers)?)
}

fn parse_modifier(name: &str) -> Option<KeyModifiers> {
    match name.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Some(KeyModifiers::CTRL),
        "alt" | "option" => Some(KeyModifiers::ALT),
        "shift" => Some(KeyModifiers::SHIFT),
        "meta" | "cmd" | "super" => Some(KeyModifiers::META),
        _ => None,
    }
}

/// Parse a key name (without modifiers).
fn parse_key_name(name: &str) -> Result<Key, KeybindError> {
    let name_lower = name.to_ascii_lowercase();

    match name_lower.as_str() {
        "esc" | "escape" => return Ok(Key::Esc),
        "enter" | "return" => return Ok(Key::Enter),
        "space" => return Ok(Key::Space),
        "tab" => return Ok(Key::Tab),
        "backspace" => return Ok(Key::Backspace),
        "delete" | "del" => return Ok(Key::Delete),
        "insert" | "ins" => return Ok(Key::Insert),
        "home" => return Ok(Key::Home),
        "end" => return Ok(Key::End),
        "pageup" | "page_up" | "pgup" => return Ok(Key::PageUp),
        "pagedown" | "page_down" | "pgdn" => return Ok(Key::PageDown),
        "up" | "arrowup" => return Ok(Key::Up),
        "down" | "arrowdown" => return Ok(Key::Down),
        "left" | "arrowleft" => return Ok(Key::Left),
        "right" | "arrowright" => return Ok(Key::Right),
        _ => {}
    }

    if let Some(num_str) = name_lower.strip_prefix('f')
        && let Ok(num) = num_str.parse::<u8>()
    {
        return Ok(Key::F(num));
    }

    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(Key::Char(c));
    }

    Err(KeybindError::UnknownKey {
        name: name.to_string(),
    })
}

/// Key combinations the browser host never delivers to page scripts.
pub const RESERVED_KEYS: &[&str] = &["Ctrl+W", "Ctrl+T", "Ctrl+N", "Ctrl+Shift+N"];

/// Returns true if `combo` is one of [`RESERVED_KEYS`].
pub fn is_reserved(combo: &KeyCombination) -> bool {
    RESERVED_KEYS
        .iter()
        .filter_map(|key| parse_key(key).ok())
        .any(|reserved| reserved == *combo)
}

/// Validate a set of shortcut overrides (shortcut name -> key string).
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use shortcuts_config::keybind::validate_overrides;
///
/// let mut overrides = BTreeMap::new();
/// overrides.insert("save".to_string(), "Ctrl+S".to_string());
/// overrides.insert("help".to_string(), "F1".to_string());
///
/// assert!(validate_overrides(&overrides).is_ok());
/// ```
pub fn validate_overrides(overrides: &BTreeMap<String, String>) -> Result<(), KeybindError> {
    let mut key_to_name: HashMap<KeyCombination, &str> = HashMap::new();

    for (name, key_str) in overrides {
        let combo = parse_key(key_str).map_err(|e| KeybindError::InvalidOverride {
            name: name.clone(),
            key: key_str.clone(),
            reason: e.to_string(),
        })?;

        if is_reserved(&combo) {
            return Err(KeybindError::ReservedKey {
                key: key_str.clone(),
            });
        }

        if let Some(existing) = key_to_name.get(&combo) {
            return Err(KeybindError::Conflict {
                key: combo.to_string(),
                first: (*existing).to_string(),
                second: name.clone(),
            });
        }
        key_to_name.insert(combo, name);
    }

    Ok(())
}
