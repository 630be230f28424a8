//! A session: one component tree plus its shortcut registry.
//!
//! Responsibilities:
//! - Be the explicit "current UI" passed to dispatch instead of ambient lookups.
//! - Route tree mutations so detachment reaches lifecycle-bound shortcuts.
//!
//! Invariants:
//! - Every detach or destroy performed through the session is forwarded to the
//!   registry before the call returns.

use crossterm::event::KeyEvent as TerminalKeyEvent;
use shortcuts_config::ShortcutOverrides;

use crate::component::{ComponentId, ComponentTree};
use crate::error::Result;
use crate::event::{DispatchOutcome, EventControl, KeyEvent};
use crate::registration::{RegistrationState, ShortcutHandle, ShortcutRegistration};
use crate::registry::{LiveRegistration, ShortcutInfo, ShortcutRegistry};
use crate::terminal::{combination_from_crossterm, is_press};

#[derive(Debug, Default)]
pub struct Session {
    tree: ComponentTree,
    shortcuts: ShortcutRegistry,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    pub fn shortcuts(&self) -> &ShortcutRegistry {
        &self.shortcuts
    }

    pub fn root(&self) -> ComponentId {
        self.tree.root()
    }

    pub fn create(&mut self, label: impl Into<String>) -> ComponentId {
        self.tree.create(label)
    }

    pub fn create_focusable(&mut self, label: impl Into<String>) -> ComponentId {
        self.tree.create_focusable(label)
    }

    /// Appends `child` to `parent`; if that moves it out of the attached tree,
    /// shortcuts bound to the moved subtree are removed.
    pub fn append(&mut self, parent: ComponentId, child: ComponentId) -> Result<()> {
        let was_attached = self.tree.is_attached(child);
        self.tree.append(parent, child)?;
        if was_attached && !self.tree.is_attached(child) {
            let moved = self.tree.subtree(child);
            self.shortcuts.handle_detached(&moved);
        }
        Ok(())
    }

    pub fn detach(&mut self, component: ComponentId) -> Result<()> {
        let detached = self.tree.detach(component)?;
        self.shortcuts.handle_detached(&detached);
        Ok(())
    }

    pub fn destroy(&mut self, component: ComponentId) -> Result<()> {
        let removed = self.tree.destroy(component)?;
        self.shortcuts.handle_detached(&removed);
        Ok(())
    }

    pub fn focus(&mut self, component: ComponentId) -> bool {
        self.tree.focus(component)
    }

    pub fn focused(&self) -> Option<ComponentId> {
        self.tree.focused()
    }

    /// Clicks `component`, running its listeners. Returns false if it is detached.
    pub fn click(&mut self, component: ComponentId) -> bool {
        self.tree.click(component)
    }

    pub fn add_click_listener(
        &mut self,
        component: ComponentId,
        listener: impl FnMut(ComponentId) + 'static,
    ) -> Result<()> {
        self.tree.add_click_listener(component, listener)
    }

    pub fn register(&mut self, registration: ShortcutRegistration) -> Result<ShortcutHandle> {
        self.shortcuts.register(&self.tree, registration)
    }

    /// Removes a shortcut; a no-op if it is already removed.
    pub fn remove(&mut self, handle: ShortcutHandle) -> bool {
        handle.remove(&mut self.shortcuts)
    }

    pub fn state(&self, handle: ShortcutHandle) -> RegistrationState {
        self.shortcuts.state(handle)
    }

    pub fn configure(&mut self, handle: ShortcutHandle) -> Option<LiveRegistration<'_>> {
        self.shortcuts.configure(handle)
    }

    pub fn apply_overrides(&mut self, overrides: &ShortcutOverrides) -> Result<usize> {
        self.shortcuts.apply_overrides(overrides)
    }

    pub fn describe(&self) -> Vec<ShortcutInfo> {
        self.shortcuts.describe()
    }

    /// Dispatches `event`, taking the focused component as origin when the
    /// event carries none.
    pub fn dispatch(&mut self, event: KeyEvent) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        self.dispatch_with(event, &mut outcome)
    }

    /// Like [`dispatch`](Self::dispatch), also reporting suppression to the host.
    pub fn dispatch_with(
        &mut self,
        mut event: KeyEvent,
        control: &mut dyn EventControl,
    ) -> DispatchOutcome {
        if event.origin.is_none() {
            event.origin = self.tree.focused();
        }
        self.shortcuts.dispatch(&mut self.tree, &event, control)
    }

    /// Dispatches a crossterm key event to the focused component.
    ///
    /// Release events dispatch nothing.
    pub fn dispatch_terminal(&mut self, event: &TerminalKeyEvent) -> Result<DispatchOutcome> {
        if !is_press(event) {
            return Ok(DispatchOutcome::default());
        }
        let combination = combination_from_crossterm(event)?;
        Ok(self.dispatch(KeyEvent::new(combination)))
    }
}
