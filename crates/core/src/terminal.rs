//! Conversion from crossterm key events to key combinations.
//!
//! Responsibilities:
//! - Map crossterm key codes and modifier bits onto `Key` and `KeyModifiers`.
//! - Fold `BackTab` into `Shift+Tab` and a literal space into `Key::Space`.
//!
//! Does NOT handle:
//! - Reading events from the terminal (the host owns the event loop).

use crossterm::event::{
    KeyCode, KeyEvent as TerminalKeyEvent, KeyEventKind, KeyModifiers as TerminalModifiers,
};
use shortcuts_config::{Key, KeyCombination, KeyModifiers, KeybindError};

use crate::error::Result;

/// Converts a crossterm key event into a combination.
///
/// Keys with no shortcut equivalent (media keys, lone modifiers, ...) yield
/// `KeybindError::UnknownKey`.
pub fn combination_from_crossterm(event: &TerminalKeyEvent) -> Result<KeyCombination> {
    let mut modifiers = modifiers_from_crossterm(event.modifiers);
    let key = match event.code {
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::F(n) => Key::F(n),
        KeyCode::Esc => Key::Esc,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => {
            modifiers |= KeyModifiers::SHIFT;
            Key::Tab
        }
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Insert => Key::Insert,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        other => {
            return Err(KeybindError::UnknownKey {
                name: format!("{other:?}"),
            }
            .into());
        }
    };
    Ok(KeyCombination::new(key, modifiers)?)
}

/// Whether the event should trigger shortcuts. Release events never do.
pub fn is_press(event: &TerminalKeyEvent) -> bool {
    event.kind != KeyEventKind::Release
}

fn modifiers_from_crossterm(modifiers: TerminalModifiers) -> KeyModifiers {
    let mut flags = KeyModifiers::empty();
    if modifiers.contains(TerminalModifiers::CONTROL) {
        flags |= KeyModifiers::CTRL;
    }
    if modifiers.contains(TerminalModifiers::ALT) {
        flags |= KeyModifiers::ALT;
    }
    if modifiers.contains(TerminalModifiers::SHIFT) {
        flags |= KeyModifiers::SHIFT;
    }
    if modifiers.intersects(TerminalModifiers::SUPER | TerminalModifiers::META) {
        flags |= KeyModifiers::META;
    }
    flags
}
