//! Shortcut registry and dispatch.
//!
//! Responsibilities:
//! - Store active registrations keyed by combination, in insertion order.
//! - Resolve a key event to matching registrations (combination, scope, owner) and run them.
//! - Remove registrations explicitly, on lifecycle-owner detachment, and lazily when
//!   every scope component has been destroyed.
//!
//! Does NOT handle:
//! - Component attach/detach bookkeeping (see `component`).
//! - Host default-action and propagation control (reported through `EventControl`).
//!
//! Invariants:
//! - A handle appears in exactly one combination list while active.
//! - Matching registrations are snapshotted before any action runs; a registration
//!   removed by an earlier action of the same dispatch does not run.
//! - Each registration runs at most once per event.

use std::collections::HashMap;

use shortcuts_config::{KeyCombination, KeyModifiers, ShortcutOverrides};

use crate::component::{ComponentId, ComponentTree};
use crate::error::{Result, ShortcutError};
use crate::event::{DispatchOutcome, EventControl, KeyEvent};
use crate::registration::{
    RegistrationState, ShortcutAction, ShortcutHandle, ShortcutRegistration,
};

struct Entry {
    combination: KeyCombination,
    scopes: Vec<ComponentId>,
    lifecycle_owner: Option<ComponentId>,
    prevent_default: bool,
    stop_propagation: bool,
    name: Option<String>,
    /// `None` while the action is running.
    action: Option<ShortcutAction>,
}

enum Match {
    Yes,
    No,
    /// Owner or every scope component has been destroyed.
    Stale,
}

/// Read-only description of an active shortcut, for help output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutInfo {
    pub handle: ShortcutHandle,
    pub combination: KeyCombination,
    pub name: Option<String>,
    pub scopes: Vec<ComponentId>,
    pub lifecycle_owner: Option<ComponentId>,
}

/// Active shortcuts of one session.
#[derive(Default)]
pub struct ShortcutRegistry {
    next_id: u64,
    entries: HashMap<u64, Entry>,
    by_key: HashMap<KeyCombination, Vec<u64>>,
    /// Lifecycle subscriptions: owner -> registrations removed when it detaches.
    lifecycle: HashMap<ComponentId, Vec<u64>>,
}

impl std::fmt::Debug for ShortcutRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShortcutRegistry")
            .field("active", &self.entries.len())
            .field("combinations", &self.by_key.len())
            .finish_non_exhaustive()
    }
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Activates a registration.
    ///
    /// # Errors
    ///
    /// `MissingKey` if `on` was never called; `UnknownComponent` if the
    /// lifecycle owner or a scope component is not in `tree`.
    pub fn register(
        &mut self,
        tree: &ComponentTree,
        registration: ShortcutRegistration,
    ) -> Result<ShortcutHandle> {
        let combination = registration.combination().ok_or(ShortcutError::MissingKey)?;

        for component in registration
            .scopes
            .iter()
            .chain(registration.lifecycle_owner.iter())
        {
            if !tree.contains(*component) {
                return Err(ShortcutError::UnknownComponent(*component));
            }
        }

        let id = self.next_id;
        self.next_id += 1;

        if let Some(owner) = registration.lifecycle_owner {
            self.lifecycle.entry(owner).or_default().push(id);
        }
        self.by_key.entry(combination).or_default().push(id);

        tracing::debug!(
            shortcut = id,
            key = %combination,
            scopes = registration.scopes.len(),
            name = registration.name.as_deref(),
            "Registered shortcut"
        );

        self.entries.insert(
            id,
            Entry {
                combination,
                scopes: registration.scopes,
                lifecycle_owner: registration.lifecycle_owner,
                prevent_default: registration.prevent_default,
                stop_propagation: registration.stop_propagation,
                name: registration.name,
                action: Some(registration.action),
            },
        );

        Ok(ShortcutHandle(id))
    }

    /// Deactivates a registration; a no-op for removed handles.
    ///
    /// Returns true if this call removed it.
    pub fn unregister(&mut self, handle: ShortcutHandle) -> bool {
        let Some(entry) = self.entries.remove(&handle.0) else {
            return false;
        };

        self.unlink_key(handle.0, &entry.combination);
        if let Some(owner) = entry.lifecycle_owner {
            self.unsubscribe(handle.0, owner);
        }

        tracing::debug!(shortcut = handle.0, key = %entry.combination, "Removed shortcut");
        true
    }

    fn unlink_key(&mut self, id: u64, combination: &KeyCombination) {
        if let Some(ids) = self.by_key.get_mut(combination) {
            ids.retain(|other| *other != id);
            if ids.is_empty() {
                self.by_key.remove(combination);
            }
        }
    }

    fn unsubscribe(&mut self, id: u64, owner: ComponentId) {
        if let Some(ids) = self.lifecycle.get_mut(&owner) {
            ids.retain(|other| *other != id);
            if ids.is_empty() {
                self.lifecycle.remove(&owner);
            }
        }
    }

    pub fn state(&self, handle: ShortcutHandle) -> RegistrationState {
        if self.entries.contains_key(&handle.0) {
            RegistrationState::Active
        } else {
            RegistrationState::Removed
        }
    }

    /// Live configuration handle; `None` once the registration is removed.
    ///
    /// Scope and owner ids set here are not checked against the tree; ids that
    /// do not resolve are pruned on the next dispatch.
    pub fn configure(&mut self, handle: ShortcutHandle) -> Option<LiveRegistration<'_>> {
        if self.entries.contains_key(&handle.0) {
            Some(LiveRegistration {
                registry: self,
                handle,
            })
        } else {
            None
        }
    }

    /// Removes registrations bound to any of the given (now detached) components.
    ///
    /// Returns the number removed.
    pub(crate) fn handle_detached(&mut self, components: &[ComponentId]) -> usize {
        let mut removed = 0;
        for component in components {
            let Some(ids) = self.lifecycle.remove(component) else {
                continue;
            };
            for id in ids {
                tracing::debug!(shortcut = id, owner = %component, "Lifecycle owner detached");
                if self.unregister(ShortcutHandle(id)) {
                    removed += 1;
                }
            }
        }
        removed
    }

    /// Rebinds named registrations to the combinations in `overrides`.
    ///
    /// Names with no matching registration are logged and skipped. Returns the
    /// number of registrations rebound.
    ///
    /// # Errors
    ///
    /// Fails without changing anything if the overrides do not validate.
    pub fn apply_overrides(&mut self, overrides: &ShortcutOverrides) -> Result<usize> {
        let resolved = overrides.resolve()?;
        let mut applied = 0;

        for (name, combination) in resolved {
            let mut ids: Vec<u64> = self
                .entries
                .iter()
                .filter(|(_, entry)| entry.name.as_deref() == Some(name.as_str()))
                .map(|(id, _)| *id)
                .collect();

            if ids.is_empty() {
                tracing::warn!(name = %name, "Override for unknown shortcut ignored");
                continue;
            }

            ids.sort_unstable();
            for id in ids {
                self.rekey(id, combination);
                applied += 1;
            }
        }

        tracing::info!("Applied {} shortcut override(s)", applied);
        Ok(applied)
    }

    fn rekey(&mut self, id: u64, combination: KeyCombination) {
        let Some(entry) = self.entries.get_mut(&id) else {
            return;
        };
        if entry.combination == combination {
            return;
        }
        let old = std::mem::replace(&mut entry.combination, combination);
        self.unlink_key(id, &old);
        self.by_key.entry(combination).or_default().push(id);
        tracing::debug!(shortcut = id, from = %old, to = %combination, "Rebound shortcut");
    }

    /// Active registrations in registration order.
    pub fn describe(&self) -> Vec<ShortcutInfo> {
        let mut infos: Vec<ShortcutInfo> = self
            .entries
            .iter()
            .map(|(id, entry)| ShortcutInfo {
                handle: ShortcutHandle(*id),
                combination: entry.combination,
                name: entry.name.clone(),
                scopes: entry.scopes.clone(),
                lifecycle_owner: entry.lifecycle_owner,
            })
            .collect();
        infos.sort_by_key(|info| info.handle);
        infos
    }

    fn match_entry(
        &mut self,
        tree: &ComponentTree,
        id: u64,
        origin: Option<ComponentId>,
    ) -> Match {
        let Some(entry) = self.entries.get_mut(&id) else {
            return Match::No;
        };

        if let Some(owner) = entry.lifecycle_owner {
            if !tree.contains(owner) {
                return Match::Stale;
            }
            if !tree.is_attached(owner) {
                return Match::No;
            }
        }

        if entry.scopes.is_empty() {
            return Match::Yes;
        }

        entry.scopes.retain(|scope| tree.contains(*scope));
        if entry.scopes.is_empty() {
            return Match::Stale;
        }

        match origin {
            Some(origin) if entry.scopes.iter().any(|scope| tree.is_within(origin, *scope)) => {
                Match::Yes
            }
            _ => Match::No,
        }
    }

    /// Runs every registration matching `event`, in registration order.
    ///
    /// The OR of the matched registrations' flags is reported to `control`
    /// and returned in the outcome.
    pub(crate) fn dispatch(
        &mut self,
        tree: &mut ComponentTree,
        event: &KeyEvent,
        control: &mut dyn EventControl,
    ) -> DispatchOutcome {
        let Some(candidates) = self.by_key.get(&event.combination).cloned() else {
            tracing::trace!(key = %event.combination, "No shortcuts for key");
            return DispatchOutcome::default();
        };

        let mut matched = Vec::with_capacity(candidates.len());
        for id in candidates {
            match self.match_entry(tree, id, event.origin) {
                Match::Yes => matched.push(id),
                Match::No => {}
                Match::Stale => {
                    tracing::debug!(shortcut = id, "Pruning shortcut with destroyed components");
                    self.unregister(ShortcutHandle(id));
                }
            }
        }

        let mut outcome = DispatchOutcome::default();
        for id in matched {
            let Some(entry) = self.entries.get_mut(&id) else {
                tracing::trace!(shortcut = id, "Skipping shortcut removed during dispatch");
                continue;
            };
            let Some(mut action) = entry.action.take() else {
                continue;
            };
            let prevent_default = entry.prevent_default;
            let stop_propagation = entry.stop_propagation;

            tracing::trace!(shortcut = id, key = %event.combination, "Running shortcut");
            {
                let mut ctx = ShortcutContext {
                    registry: self,
                    tree: &mut *tree,
                    event,
                    handle: ShortcutHandle(id),
                };
                action(&mut ctx);
            }

            if let Some(entry) = self.entries.get_mut(&id) {
                entry.action = Some(action);
            }

            outcome.invoked += 1;
            outcome.default_prevented |= prevent_default;
            outcome.propagation_stopped |= stop_propagation;
        }

        if outcome.default_prevented {
            control.prevent_default();
        }
        if outcome.propagation_stopped {
            control.stop_propagation();
        }
        outcome
    }
}

/// Access given to a running shortcut action.
pub struct ShortcutContext<'a> {
    registry: &'a mut ShortcutRegistry,
    tree: &'a mut ComponentTree,
    event: &'a KeyEvent,
    handle: ShortcutHandle,
}

impl ShortcutContext<'_> {
    /// The event being dispatched.
    pub fn event(&self) -> &KeyEvent {
        self.event
    }

    /// Handle of the running shortcut.
    pub fn handle(&self) -> ShortcutHandle {
        self.handle
    }

    pub fn tree(&self) -> &ComponentTree {
        &*self.tree
    }

    /// Removes the running shortcut; other shortcuts matched by this event still run.
    pub fn remove_self(&mut self) -> bool {
        self.registry.unregister(self.handle)
    }

    /// Removes another shortcut. If this event matched it and it has not run
    /// yet, it is skipped.
    pub fn remove(&mut self, handle: ShortcutHandle) -> bool {
        self.registry.unregister(handle)
    }

    /// Registers a shortcut; it does not run for the event being dispatched.
    pub fn register(&mut self, registration: ShortcutRegistration) -> Result<ShortcutHandle> {
        self.registry.register(&*self.tree, registration)
    }

    pub fn configure(&mut self, handle: ShortcutHandle) -> Option<LiveRegistration<'_>> {
        self.registry.configure(handle)
    }

    pub fn focus(&mut self, component: ComponentId) -> bool {
        self.tree.focus(component)
    }

    pub fn click(&mut self, component: ComponentId) -> bool {
        self.tree.click(component)
    }
}

/// Fluent reconfiguration of an active registration.
pub struct LiveRegistration<'a> {
    registry: &'a mut ShortcutRegistry,
    handle: ShortcutHandle,
}

impl LiveRegistration<'_> {
    fn entry(&mut self) -> Option<&mut Entry> {
        self.registry.entries.get_mut(&self.handle.0)
    }

    /// Changes the combination; the shortcut moves to the end of the new key's order.
    pub fn on(self, combination: KeyCombination) -> Self {
        self.registry.rekey(self.handle.0, combination);
        self
    }

    pub fn alt(self) -> Self {
        self.with_modifier(KeyModifiers::ALT)
    }

    pub fn ctrl(self) -> Self {
        self.with_modifier(KeyModifiers::CTRL)
    }

    pub fn shift(self) -> Self {
        self.with_modifier(KeyModifiers::SHIFT)
    }

    pub fn meta(self) -> Self {
        self.with_modifier(KeyModifiers::META)
    }

    fn with_modifier(mut self, modifier: KeyModifiers) -> Self {
        if let Some(combination) = self.entry().map(|entry| entry.combination) {
            self.registry
                .rekey(self.handle.0, combination.with_modifiers(modifier));
        }
        self
    }

    /// Replaces the scope; empty means global.
    pub fn scope(mut self, components: impl IntoIterator<Item = ComponentId>) -> Self {
        let mut scopes: Vec<ComponentId> = components.into_iter().collect();
        scopes.sort();
        scopes.dedup();
        if let Some(entry) = self.entry() {
            entry.scopes = scopes;
        }
        self
    }

    pub fn bind_lifecycle_to(mut self, owner: ComponentId) -> Self {
        let id = self.handle.0;
        let previous = self
            .entry()
            .and_then(|entry| entry.lifecycle_owner.replace(owner));
        if let Some(previous) = previous {
            self.registry.unsubscribe(id, previous);
        }
        self.registry.lifecycle.entry(owner).or_default().push(id);
        self
    }

    pub fn prevent_default(mut self) -> Self {
        if let Some(entry) = self.entry() {
            entry.prevent_default = true;
        }
        self
    }

    pub fn stop_propagation(mut self) -> Self {
        if let Some(entry) = self.entry() {
            entry.stop_propagation = true;
        }
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if let Some(entry) = self.entry() {
            entry.name = Some(name);
        }
        self
    }

    /// Deactivates the registration.
    pub fn remove(self) -> bool {
        self.registry.unregister(self.handle)
    }

    pub fn handle(&self) -> ShortcutHandle {
        self.handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn key(s: &str) -> KeyCombination {
        KeyCombination::parse(s).unwrap()
    }

    type Log = Rc<RefCell<Vec<&'static str>>>;

    fn recorder() -> (Log, impl Fn(&'static str) -> Box<dyn FnMut()>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let make = move |label: &'static str| -> Box<dyn FnMut()> {
            let sink = sink.clone();
            Box::new(move || sink.borrow_mut().push(label))
        };
        (log, make)
    }

    fn dispatch(
        registry: &mut ShortcutRegistry,
        tree: &mut ComponentTree,
        event: KeyEvent,
    ) -> DispatchOutcome {
        let mut control = DispatchOutcome::default();
        registry.dispatch(tree, &event, &mut control)
    }

    #[test]
    fn test_register_requires_key() {
        let tree = ComponentTree::new();
        let mut registry = ShortcutRegistry::new();
        let result = registry.register(&tree, ShortcutRegistration::exec(|| {}));
        assert_eq!(result, Err(ShortcutError::MissingKey));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_rejects_unknown_scope() {
        let mut tree = ComponentTree::new();
        let gone = tree.create("gone");
        tree.destroy(gone).unwrap();

        let mut registry = ShortcutRegistry::new();
        let result = registry.register(
            &tree,
            ShortcutRegistration::exec(|| {}).on(key("a")).scope([gone]),
        );
        assert_eq!(result, Err(ShortcutError::UnknownComponent(gone)));
    }

    #[test]
    fn test_unregister_is_idempotent() {
        let tree = ComponentTree::new();
        let mut registry = ShortcutRegistry::new();
        let handle = registry
            .register(&tree, ShortcutRegistration::exec(|| {}).on(key("Backspace")))
            .unwrap();

        assert_eq!(registry.state(handle), RegistrationState::Active);
        assert!(handle.remove(&mut registry));
        assert!(!handle.remove(&mut registry));
        assert_eq!(registry.state(handle), RegistrationState::Removed);
        assert!(registry.configure(handle).is_none());
    }

    #[test]
    fn test_dispatch_runs_in_registration_order() {
        let mut tree = ComponentTree::new();
        let mut registry = ShortcutRegistry::new();
        let (log, make) = recorder();

        for label in ["first", "second", "third"] {
            registry
                .register(&tree, ShortcutRegistration::exec(make(label)).on(key("Ctrl+K")))
                .unwrap();
        }

        let outcome = dispatch(&mut registry, &mut tree, KeyEvent::new(key("Ctrl+K")));
        assert_eq!(outcome.invoked, 3);
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_dispatch_requires_exact_modifiers() {
        let mut tree = ComponentTree::new();
        let mut registry = ShortcutRegistry::new();
        let (log, make) = recorder();
        registry
            .register(&tree, ShortcutRegistration::exec(make("k")).on(key("k")).alt())
            .unwrap();

        assert_eq!(dispatch(&mut registry, &mut tree, KeyEvent::new(key("k"))).invoked, 0);
        assert_eq!(
            dispatch(&mut registry, &mut tree, KeyEvent::new(key("Ctrl+Alt+k"))).invoked,
            0
        );
        assert_eq!(dispatch(&mut registry, &mut tree, KeyEvent::new(key("Alt+K"))).invoked, 1);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_flags_are_reported_to_control() {
        let mut tree = ComponentTree::new();
        let mut registry = ShortcutRegistry::new();
        registry
            .register(&tree, ShortcutRegistration::exec(|| {}).on(key("*")))
            .unwrap();
        registry
            .register(
                &tree,
                ShortcutRegistration::exec(|| {}).on(key("*")).prevent_default(),
            )
            .unwrap();

        let mut control = DispatchOutcome::default();
        let outcome = registry.dispatch(&mut tree, &KeyEvent::new(key("*")), &mut control);
        assert!(outcome.default_prevented);
        assert!(!outcome.propagation_stopped);
        assert!(control.default_prevented);
        assert!(!control.propagation_stopped);
    }

    #[test]
    fn test_self_removal_does_not_affect_other_matches() {
        let mut tree = ComponentTree::new();
        let mut registry = ShortcutRegistry::new();
        let (log, make) = recorder();
        let mut after = make("after");

        let once = registry
            .register(
                &tree,
                ShortcutRegistration::exec_with(|ctx| {
                    ctx.remove_self();
                })
                .on(key("Enter")),
            )
            .unwrap();
        registry
            .register(&tree, ShortcutRegistration::exec(move || after()).on(key("Enter")))
            .unwrap();

        let outcome = dispatch(&mut registry, &mut tree, KeyEvent::new(key("Enter")));
        assert_eq!(outcome.invoked, 2);
        assert_eq!(*log.borrow(), vec!["after"]);
        assert_eq!(registry.state(once), RegistrationState::Removed);

        let outcome = dispatch(&mut registry, &mut tree, KeyEvent::new(key("Enter")));
        assert_eq!(outcome.invoked, 1);
    }

    #[test]
    fn test_removing_a_later_match_skips_it() {
        let mut tree = ComponentTree::new();
        let mut registry = ShortcutRegistry::new();
        let (log, make) = recorder();

        let victim_slot: Rc<RefCell<Option<ShortcutHandle>>> = Rc::new(RefCell::new(None));
        let slot = victim_slot.clone();
        registry
            .register(
                &tree,
                ShortcutRegistration::exec_with(move |ctx| {
                    if let Some(victim) = *slot.borrow() {
                        ctx.remove(victim);
                    }
                })
                .on(key("F2")),
            )
            .unwrap();
        let victim = registry
            .register(&tree, ShortcutRegistration::exec(make("victim")).on(key("F2")))
            .unwrap();
        *victim_slot.borrow_mut() = Some(victim);

        let outcome = dispatch(&mut registry, &mut tree, KeyEvent::new(key("F2")));
        assert_eq!(outcome.invoked, 1);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_registered_during_dispatch_waits_for_next_event() {
        let mut tree = ComponentTree::new();
        let mut registry = ShortcutRegistry::new();
        let (log, make) = recorder();
        let mut pending = Some(make("late"));

        registry
            .register(
                &tree,
                ShortcutRegistration::exec_with(move |ctx| {
                    if let Some(late) = pending.take() {
                        ctx.register(ShortcutRegistration::exec(late).on(key("F3")))
                            .unwrap();
                    }
                })
                .on(key("F3")),
            )
            .unwrap();

        assert_eq!(dispatch(&mut registry, &mut tree, KeyEvent::new(key("F3"))).invoked, 1);
        assert!(log.borrow().is_empty());
        assert_eq!(dispatch(&mut registry, &mut tree, KeyEvent::new(key("F3"))).invoked, 2);
        assert_eq!(*log.borrow(), vec!["late"]);
    }

    #[test]
    fn test_destroyed_scopes_are_pruned_lazily() {
        let mut tree = ComponentTree::new();
        let panel = tree.create("panel");
        let other = tree.create("other");
        tree.append(tree.root(), panel).unwrap();
        tree.append(tree.root(), other).unwrap();

        let mut registry = ShortcutRegistry::new();
        let only_panel = registry
            .register(&tree, ShortcutRegistration::exec(|| {}).on(key("x")).scope([panel]))
            .unwrap();
        let both = registry
            .register(
                &tree,
                ShortcutRegistration::exec(|| {}).on(key("x")).scope([panel, other]),
            )
            .unwrap();

        tree.destroy(panel).unwrap();
        // Still active until the next dispatch looks at it
        assert_eq!(registry.state(only_panel), RegistrationState::Active);

        let event = KeyEvent::new(key("x")).with_origin(other);
        let outcome = dispatch(&mut registry, &mut tree, event);
        assert_eq!(outcome.invoked, 1);
        assert_eq!(registry.state(only_panel), RegistrationState::Removed);
        assert_eq!(registry.state(both), RegistrationState::Active);
        assert_eq!(registry.describe()[0].scopes, vec![other]);
    }

    #[test]
    fn test_live_on_rekeys() {
        let mut tree = ComponentTree::new();
        let mut registry = ShortcutRegistry::new();
        let handle = registry
            .register(&tree, ShortcutRegistration::exec(|| {}).on(key("a")))
            .unwrap();

        registry
            .configure(handle)
            .unwrap()
            .on(key("b"))
            .ctrl()
            .stop_propagation();

        assert_eq!(dispatch(&mut registry, &mut tree, KeyEvent::new(key("a"))).invoked, 0);
        let outcome = dispatch(&mut registry, &mut tree, KeyEvent::new(key("Ctrl+B")));
        assert_eq!(outcome.invoked, 1);
        assert!(outcome.propagation_stopped);
    }

    #[test]
    fn test_live_scope_replaces_scope() {
        let mut tree = ComponentTree::new();
        let panel = tree.create("panel");
        let field = tree.create_focusable("field");
        tree.append(tree.root(), panel).unwrap();
        tree.append(panel, field).unwrap();

        let mut registry = ShortcutRegistry::new();
        let handle = registry
            .register(&tree, ShortcutRegistration::exec(|| {}).on(key("Enter")))
            .unwrap();

        registry.configure(handle).unwrap().scope([panel, panel]);
        assert_eq!(registry.describe()[0].scopes, vec![panel]);
        assert_eq!(dispatch(&mut registry, &mut tree, KeyEvent::new(key("Enter"))).invoked, 0);
        let inside = KeyEvent::new(key("Enter")).with_origin(field);
        assert_eq!(dispatch(&mut registry, &mut tree, inside).invoked, 1);

        registry.configure(handle).unwrap().scope(Vec::<ComponentId>::new());
        assert_eq!(dispatch(&mut registry, &mut tree, KeyEvent::new(key("Enter"))).invoked, 1);
    }

    #[test]
    fn test_live_lifecycle_rebind_moves_subscription() {
        let mut tree = ComponentTree::new();
        let first = tree.create("first");
        let second = tree.create("second");
        tree.append(tree.root(), first).unwrap();
        tree.append(tree.root(), second).unwrap();

        let mut registry = ShortcutRegistry::new();
        let handle = registry
            .register(
                &tree,
                ShortcutRegistration::exec(|| {}).on(key("Esc")).bind_lifecycle_to(first),
            )
            .unwrap();

        registry.configure(handle).unwrap().bind_lifecycle_to(second);
        assert_eq!(registry.describe()[0].lifecycle_owner, Some(second));

        let detached = tree.detach(first).unwrap();
        assert_eq!(registry.handle_detached(&detached), 0);
        assert_eq!(registry.state(handle), RegistrationState::Active);

        let detached = tree.detach(second).unwrap();
        assert_eq!(registry.handle_detached(&detached), 1);
        assert_eq!(registry.state(handle), RegistrationState::Removed);
    }

    #[test]
    fn test_live_flags_and_name() {
        let mut tree = ComponentTree::new();
        let mut registry = ShortcutRegistry::new();
        let handle = registry
            .register(&tree, ShortcutRegistration::exec(|| {}).on(key("Ctrl+S")))
            .unwrap();

        let outcome = dispatch(&mut registry, &mut tree, KeyEvent::new(key("Ctrl+S")));
        assert!(!outcome.default_prevented);

        registry.configure(handle).unwrap().prevent_default().named("save");
        let outcome = dispatch(&mut registry, &mut tree, KeyEvent::new(key("Ctrl+S")));
        assert!(outcome.default_prevented);
        assert!(!outcome.propagation_stopped);
        assert_eq!(registry.describe()[0].name.as_deref(), Some("save"));

        let mut overrides = ShortcutOverrides::default();
        overrides.insert("save", "Alt+S");
        assert_eq!(registry.apply_overrides(&overrides).unwrap(), 1);
        assert_eq!(dispatch(&mut registry, &mut tree, KeyEvent::new(key("Alt+S"))).invoked, 1);
    }

    #[test]
    fn test_live_remove() {
        let mut tree = ComponentTree::new();
        let owner = tree.create("owner");
        tree.append(tree.root(), owner).unwrap();
        let mut registry = ShortcutRegistry::new();
        let handle = registry
            .register(
                &tree,
                ShortcutRegistration::exec(|| {}).on(key("F4")).bind_lifecycle_to(owner),
            )
            .unwrap();

        let live = registry.configure(handle).unwrap();
        assert_eq!(live.handle(), handle);
        assert!(live.remove());

        assert_eq!(registry.state(handle), RegistrationState::Removed);
        assert!(registry.configure(handle).is_none());
        assert!(!handle.remove(&mut registry));
        assert_eq!(dispatch(&mut registry, &mut tree, KeyEvent::new(key("F4"))).invoked, 0);
        assert_eq!(registry.handle_detached(&tree.detach(owner).unwrap()), 0);
    }

    #[test]
    fn test_destroyed_lifecycle_owner_is_pruned() {
        let mut tree = ComponentTree::new();
        let owner = tree.create("owner");
        tree.append(tree.root(), owner).unwrap();

        let mut registry = ShortcutRegistry::new();
        let handle = registry
            .register(
                &tree,
                ShortcutRegistration::exec(|| {}).on(key("Home")).bind_lifecycle_to(owner),
            )
            .unwrap();

        tree.destroy(owner).unwrap();
        assert_eq!(registry.state(handle), RegistrationState::Active);

        assert_eq!(dispatch(&mut registry, &mut tree, KeyEvent::new(key("Home"))).invoked, 0);
        assert_eq!(registry.state(handle), RegistrationState::Removed);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_handle_detached_removes_bound_shortcuts() {
        let mut tree = ComponentTree::new();
        let view = tree.create("view");
        tree.append(tree.root(), view).unwrap();

        let mut registry = ShortcutRegistry::new();
        let bound = registry
            .register(
                &tree,
                ShortcutRegistration::exec(|| {}).on(key("Backspace")).bind_lifecycle_to(view),
            )
            .unwrap();
        let global = registry
            .register(&tree, ShortcutRegistration::exec(|| {}).on(key("Backspace")))
            .unwrap();

        let detached = tree.detach(view).unwrap();
        assert_eq!(registry.handle_detached(&detached), 1);
        assert_eq!(registry.state(bound), RegistrationState::Removed);
        assert_eq!(registry.state(global), RegistrationState::Active);
    }

    #[test]
    fn test_overrides_rebind_named_shortcuts() {
        let mut tree = ComponentTree::new();
        let mut registry = ShortcutRegistry::new();
        registry
            .register(&tree, ShortcutRegistration::exec(|| {}).on(key("Ctrl+S")).named("save"))
            .unwrap();

        let mut overrides = ShortcutOverrides::default();
        overrides.insert("save", "Alt+S");
        overrides.insert("missing", "F9");

        assert_eq!(registry.apply_overrides(&overrides).unwrap(), 1);
        assert_eq!(dispatch(&mut registry, &mut tree, KeyEvent::new(key("Ctrl+S"))).invoked, 0);
        assert_eq!(dispatch(&mut registry, &mut tree, KeyEvent::new(key("Alt+S"))).invoked, 1);
    }

    #[test]
    fn test_invalid_overrides_change_nothing() {
        let tree = ComponentTree::new();
        let mut registry = ShortcutRegistry::new();
        registry
            .register(&tree, ShortcutRegistration::exec(|| {}).on(key("Ctrl+S")).named("save"))
            .unwrap();

        let mut overrides = ShortcutOverrides::default();
        overrides.insert("save", "Ctrl+Nope");

        assert!(matches!(
            registry.apply_overrides(&overrides),
            Err(ShortcutError::Keybind(_))
        ));
        assert_eq!(registry.describe()[0].combination, key("Ctrl+S"));
    }
}
