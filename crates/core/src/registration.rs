//! Fluent builder describing a shortcut before it is registered.
//!
//! Responsibilities:
//! - Collect the key combination, scope, lifecycle owner, flags and action.
//! - Provide preset builders for focus and click shortcuts.
//!
//! Does NOT handle:
//! - Validation against the component tree (done by `ShortcutRegistry::register`).
//! - Reconfiguring live registrations (see `LiveRegistration`).

use std::fmt;

use shortcuts_config::{KeyCombination, KeyModifiers};

use crate::component::ComponentId;
use crate::registry::{ShortcutContext, ShortcutRegistry};

/// Callback run when a shortcut fires.
pub type ShortcutAction = Box<dyn FnMut(&mut ShortcutContext<'_>)>;

/// Identifies a registered shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShortcutHandle(pub(crate) u64);

impl ShortcutHandle {
    /// Deactivates the shortcut. Removing twice is a no-op.
    ///
    /// Returns true if this call removed it.
    pub fn remove(self, registry: &mut ShortcutRegistry) -> bool {
        registry.unregister(self)
    }
}

impl fmt::Display for ShortcutHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shortcut-{}", self.0)
    }
}

/// Lifecycle state of a registration. `Removed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    Active,
    Removed,
}

/// Builder for a shortcut.
///
/// ```
/// use shortcuts_config::KeyCombination;
/// use shortcuts_core::{KeyEvent, Session, ShortcutRegistration};
///
/// let mut session = Session::new();
/// let field = session.create_focusable("username");
/// session.append(session.root(), field).unwrap();
///
/// let enter = KeyCombination::parse("Enter").unwrap();
/// session
///     .register(ShortcutRegistration::exec(|| println!("login")).on(enter).scope([field]))
///     .unwrap();
///
/// let outcome = session.dispatch(KeyEvent::new(enter).with_origin(field));
/// assert_eq!(outcome.invoked, 1);
/// ```
pub struct ShortcutRegistration {
    pub(crate) combination: Option<KeyCombination>,
    pub(crate) extra_modifiers: KeyModifiers,
    pub(crate) scopes: Vec<ComponentId>,
    pub(crate) lifecycle_owner: Option<ComponentId>,
    pub(crate) prevent_default: bool,
    pub(crate) stop_propagation: bool,
    pub(crate) name: Option<String>,
    pub(crate) action: ShortcutAction,
}

impl fmt::Debug for ShortcutRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutRegistration")
            .field("combination", &self.combination())
            .field("scopes", &self.scopes)
            .field("lifecycle_owner", &self.lifecycle_owner)
            .field("prevent_default", &self.prevent_default)
            .field("stop_propagation", &self.stop_propagation)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl ShortcutRegistration {
    /// Shortcut running a zero-argument action.
    pub fn exec(mut action: impl FnMut() + 'static) -> Self {
        Self::exec_with(move |_| action())
    }

    /// Shortcut whose action receives the dispatch context.
    pub fn exec_with(action: impl FnMut(&mut ShortcutContext<'_>) + 'static) -> Self {
        Self {
            combination: None,
            extra_modifiers: KeyModifiers::empty(),
            scopes: Vec::new(),
            lifecycle_owner: None,
            prevent_default: false,
            stop_propagation: false,
            name: None,
            action: Box::new(action),
        }
    }

    /// Shortcut that focuses `target`, bound to its lifecycle.
    pub fn focus_shortcut(target: ComponentId) -> Self {
        Self::exec_with(move |ctx| {
            if !ctx.focus(target) {
                tracing::debug!(component = %target, "Focus shortcut target cannot take focus");
            }
        })
        .bind_lifecycle_to(target)
    }

    /// Shortcut that clicks `target`, bound to its lifecycle.
    pub fn click_shortcut(target: ComponentId) -> Self {
        Self::exec_with(move |ctx| {
            ctx.click(target);
        })
        .bind_lifecycle_to(target)
    }

    /// Sets the triggering combination; the last call wins.
    pub fn on(mut self, combination: KeyCombination) -> Self {
        self.combination = Some(combination);
        self.extra_modifiers = KeyModifiers::empty();
        self
    }

    /// Adds Alt to the combination set by the most recent `on`.
    pub fn alt(self) -> Self {
        self.with_modifier(KeyModifiers::ALT)
    }

    /// Adds Ctrl to the combination set by the most recent `on`.
    pub fn ctrl(self) -> Self {
        self.with_modifier(KeyModifiers::CTRL)
    }

    /// Adds Shift to the combination set by the most recent `on`.
    pub fn shift(self) -> Self {
        self.with_modifier(KeyModifiers::SHIFT)
    }

    /// Adds Meta to the combination set by the most recent `on`.
    pub fn meta(self) -> Self {
        self.with_modifier(KeyModifiers::META)
    }

    fn with_modifier(mut self, modifier: KeyModifiers) -> Self {
        self.extra_modifiers |= modifier;
        self
    }

    /// Restricts the shortcut to events originating inside the given components.
    ///
    /// Replaces any previous scope; an empty scope makes the shortcut global.
    pub fn scope(mut self, components: impl IntoIterator<Item = ComponentId>) -> Self {
        self.scopes = components.into_iter().collect();
        self.scopes.sort();
        self.scopes.dedup();
        self
    }

    /// Removes the shortcut when `owner` detaches; inactive while `owner` is detached.
    pub fn bind_lifecycle_to(mut self, owner: ComponentId) -> Self {
        self.lifecycle_owner = Some(owner);
        self
    }

    pub fn prevent_default(mut self) -> Self {
        self.prevent_default = true;
        self
    }

    pub fn stop_propagation(mut self) -> Self {
        self.stop_propagation = true;
        self
    }

    /// Names the shortcut so configuration overrides can rebind it.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The effective combination, if `on` has been called.
    pub fn combination(&self) -> Option<KeyCombination> {
        self.combination
            .map(|combination| combination.with_modifiers(self.extra_modifiers))
    }
}
