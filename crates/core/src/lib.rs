//! Keyboard shortcut registration and dispatch.
//!
//! A [`Session`] owns a [`ComponentTree`] and a [`ShortcutRegistry`]. Shortcuts
//! are described with [`ShortcutRegistration`], optionally scoped to subtrees
//! or bound to a component's lifecycle, and run when a matching [`KeyEvent`]
//! is dispatched.

pub mod component;
pub mod error;
pub mod event;
pub mod registration;
pub mod registry;
pub mod session;
pub mod terminal;

pub use component::{ComponentId, ComponentTree};
pub use error::{Result, ShortcutError};
pub use event::{DispatchOutcome, EventControl, KeyEvent};
pub use registration::{RegistrationState, ShortcutAction, ShortcutHandle, ShortcutRegistration};
pub use registry::{LiveRegistration, ShortcutContext, ShortcutInfo, ShortcutRegistry};
pub use session::Session;
pub use shortcuts_config::{Key, KeyCombination, KeyModifiers};
pub use terminal::combination_from_crossterm;
