//! Minimal component tree used to resolve shortcut scopes and lifecycles.
//!
//! Responsibilities:
//! - Track parent/child relationships and whether a component is attached to the root.
//! - Track the focused component and per-component click listeners.
//! - Report which components changed attachment state on detach/destroy.
//!
//! Does NOT handle:
//! - Rendering, layout or event bubbling.
//! - Notifying shortcut registrations (the session forwards detach results).
//!   Structural mutations are crate-private so that `Session` is the only way
//!   to append, detach or destroy components.
//!
//! Invariants:
//! - The root component always exists and is always attached.
//! - A component has at most one parent and appears once in its parent's children.
//! - The focused component, if any, is attached and focusable.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Result, ShortcutError};

/// Identifier of a component in a [`ComponentTree`].
///
/// Ids are never reused, so a stale id simply stops resolving once the
/// component is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type ClickListener = Box<dyn FnMut(ComponentId)>;

struct Node {
    label: String,
    parent: Option<ComponentId>,
    children: Vec<ComponentId>,
    focusable: bool,
    click_listeners: Vec<ClickListener>,
}

impl Node {
    fn new(label: String, focusable: bool) -> Self {
        Self {
            label,
            parent: None,
            children: Vec::new(),
            focusable,
            click_listeners: Vec::new(),
        }
    }
}

/// Component hierarchy of one session.
pub struct ComponentTree {
    nodes: HashMap<ComponentId, Node>,
    root: ComponentId,
    next_id: u64,
    focused: Option<ComponentId>,
}

impl fmt::Debug for ComponentTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentTree")
            .field("components", &self.nodes.len())
            .field("root", &self.root)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

impl Default for ComponentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentTree {
    /// Creates a tree containing only the root component.
    pub fn new() -> Self {
        let root = ComponentId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::new("ui".to_string(), false));
        Self {
            nodes,
            root,
            next_id: 1,
            focused: None,
        }
    }

    /// The root component; always attached.
    pub fn root(&self) -> ComponentId {
        self.root
    }

    /// Creates a detached component.
    pub fn create(&mut self, label: impl Into<String>) -> ComponentId {
        self.insert(label.into(), false)
    }

    /// Creates a detached component that can receive focus.
    pub fn create_focusable(&mut self, label: impl Into<String>) -> ComponentId {
        self.insert(label.into(), true)
    }

    fn insert(&mut self, label: String, focusable: bool) -> ComponentId {
        let id = ComponentId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(label, focusable));
        id
    }

    fn node(&self, id: ComponentId) -> Result<&Node> {
        self.nodes.get(&id).ok_or(ShortcutError::UnknownComponent(id))
    }

    fn node_mut(&mut self, id: ComponentId) -> Result<&mut Node> {
        self.nodes
            .get_mut(&id)
            .ok_or(ShortcutError::UnknownComponent(id))
    }

    /// Returns true if the component exists (has not been destroyed).
    pub fn contains(&self, id: ComponentId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Label given at creation.
    pub fn label(&self, id: ComponentId) -> Option<&str> {
        self.nodes.get(&id).map(|n| n.label.as_str())
    }

    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Marks whether the component can receive focus.
    pub fn set_focusable(&mut self, id: ComponentId, focusable: bool) -> Result<()> {
        self.node_mut(id)?.focusable = focusable;
        if !focusable && self.focused == Some(id) {
            self.focused = None;
        }
        Ok(())
    }

    /// Returns true if `node` is `ancestor` or lies in its subtree.
    pub fn is_within(&self, node: ComponentId, ancestor: ComponentId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Returns true if the component is connected to the root.
    pub fn is_attached(&self, id: ComponentId) -> bool {
        self.contains(id) && self.is_within(id, self.root)
    }

    /// The component and all of its descendants, parents before children.
    pub fn subtree(&self, id: ComponentId) -> Vec<ComponentId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(&current) else {
                continue;
            };
            out.push(current);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Appends `child` to `parent`, moving it out of its previous parent.
    ///
    /// # Errors
    ///
    /// Fails for unknown ids, for the root as child, and when `parent` is
    /// inside `child`'s subtree.
    pub(crate) fn append(&mut self, parent: ComponentId, child: ComponentId) -> Result<()> {
        self.node(parent)?;
        self.node(child)?;
        if child == self.root {
            return Err(ShortcutError::RootComponent);
        }
        if self.is_within(parent, child) {
            return Err(ShortcutError::Cycle { parent, child });
        }

        self.unlink(child);
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);

        if !self.is_attached(child) {
            self.clear_focus_within(child);
        }
        Ok(())
    }

    fn unlink(&mut self, child: ComponentId) {
        let old_parent = self.nodes.get_mut(&child).and_then(|n| n.parent.take());
        if let Some(old_parent) = old_parent
            && let Some(node) = self.nodes.get_mut(&old_parent)
        {
            node.children.retain(|c| *c != child);
        }
    }

    fn clear_focus_within(&mut self, id: ComponentId) {
        if let Some(focused) = self.focused
            && self.is_within(focused, id)
        {
            self.focused = None;
        }
    }

    /// Removes the component from its parent.
    ///
    /// Returns the components that went from attached to detached; empty if
    /// the component was already detached.
    pub(crate) fn detach(&mut self, id: ComponentId) -> Result<Vec<ComponentId>> {
        self.node(id)?;
        if id == self.root {
            return Err(ShortcutError::RootComponent);
        }

        let was_attached = self.is_attached(id);
        self.clear_focus_within(id);
        self.unlink(id);

        if was_attached {
            Ok(self.subtree(id))
        } else {
            Ok(Vec::new())
        }
    }

    /// Detaches the component and forgets it and its descendants.
    ///
    /// Returns every destroyed id.
    pub(crate) fn destroy(&mut self, id: ComponentId) -> Result<Vec<ComponentId>> {
        self.detach(id)?;
        let removed = self.subtree(id);
        for component in &removed {
            self.nodes.remove(component);
        }
        Ok(removed)
    }

    /// Moves focus to the component.
    ///
    /// Returns false (leaving focus unchanged) if it is unknown, detached or
    /// not focusable.
    pub fn focus(&mut self, id: ComponentId) -> bool {
        let focusable = self.nodes.get(&id).is_some_and(|n| n.focusable);
        if !focusable || !self.is_attached(id) {
            return false;
        }
        self.focused = Some(id);
        true
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    pub fn focused(&self) -> Option<ComponentId> {
        self.focused
    }

    /// Registers a listener run by [`click`](Self::click).
    pub fn add_click_listener(
        &mut self,
        id: ComponentId,
        listener: impl FnMut(ComponentId) + 'static,
    ) -> Result<()> {
        self.node_mut(id)?.click_listeners.push(Box::new(listener));
        Ok(())
    }

    /// Simulates a click: runs the component's click listeners.
    ///
    /// Returns false if the component is unknown or detached.
    pub fn click(&mut self, id: ComponentId) -> bool {
        if !self.is_attached(id) {
            return false;
        }
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        for listener in node.click_listeners.iter_mut() {
            listener(id);
        }
        true
    }
}
