//! Configuration type definitions for shortcuts.
//!
//! Responsibilities:
//! - Define the persisted shortcut override representation.
//!
//! Does NOT handle:
//! - Loading configuration from files or environment variables (see `loader` module).
//! - Key parsing or validation (see `keybind` module at crate root).

pub mod keybind;

pub use keybind::ShortcutOverrides;
