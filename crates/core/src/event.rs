//! Key events delivered by the host and the result of dispatching them.

use shortcuts_config::KeyCombination;

use crate::component::ComponentId;

/// A key press as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub combination: KeyCombination,
    /// Component the event originated from; `None` means the document body.
    pub origin: Option<ComponentId>,
}

impl KeyEvent {
    pub fn new(combination: KeyCombination) -> Self {
        Self {
            combination,
            origin: None,
        }
    }

    /// Sets the originating component.
    #[must_use]
    pub fn with_origin(mut self, origin: ComponentId) -> Self {
        self.origin = Some(origin);
        self
    }
}

/// Host primitives for suppressing the default action and event propagation.
pub trait EventControl {
    fn prevent_default(&mut self);
    fn stop_propagation(&mut self);
}

/// Summary of one dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Number of shortcut actions that ran.
    pub invoked: usize,
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

impl DispatchOutcome {
    pub fn is_handled(&self) -> bool {
        self.invoked > 0
    }
}

impl EventControl for DispatchOutcome {
    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}
