//! Error types for shortcut registration and the component tree.

use shortcuts_config::{InvalidKeyError, KeybindError};
use thiserror::Error;

use crate::component::ComponentId;

/// Errors returned by the component tree and the shortcut registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShortcutError {
    #[error("Unknown component: {0}")]
    UnknownComponent(ComponentId),

    #[error("Cannot append {child} to {parent}: it would create a cycle")]
    Cycle {
        parent: ComponentId,
        child: ComponentId,
    },

    #[error("The root component cannot be moved, detached or destroyed")]
    RootComponent,

    #[error("Shortcut has no key combination; call `on` before registering")]
    MissingKey,

    #[error(transparent)]
    InvalidKey(#[from] InvalidKeyError),

    #[error(transparent)]
    Keybind(#[from] KeybindError),
}

/// Result alias for shortcut operations.
pub type Result<T> = std::result::Result<T, ShortcutError>;
