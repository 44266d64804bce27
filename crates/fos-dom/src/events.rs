//! DOM Events
//!
//! Event objects and a listener registry with registration de-duplication.

use std::collections::{HashMap, HashSet};

use crate::NodeId;

/// Event type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    KeyUp,
    KeyPress,
    Focus,
    Change,
    Submit,
}

impl EventType {
    /// Check if this event type can bubble
    pub fn bubbles(&self) -> bool {
        !matches!(self, EventType::Focus)
    }

    /// Check if the default action can be prevented
    pub fn cancelable(&self) -> bool {
        matches!(self, EventType::Click | EventType::KeyPress | EventType::Submit)
    }
}

/// Handler function ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(pub u64);

/// Dispatched event
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: EventType,
    pub target: NodeId,
    /// Key name for keyboard events
    pub key: Option<String>,
    default_prevented: bool,
}

impl Event {
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            key: None,
            default_prevented: false,
        }
    }

    /// Keyboard event carrying a key name
    pub fn key(event_type: EventType, target: NodeId, key: &str) -> Self {
        Self {
            key: Some(key.to_string()),
            ..Self::new(event_type, target)
        }
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.event_type.cancelable() {
            self.default_prevented = true;
        }
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Listener registry keyed by (target, event type)
///
/// Registering the same handler twice on the same target and type is a no-op,
/// so setup code can run more than once without stacking listeners.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    handlers: HashMap<(NodeId, EventType), Vec<HandlerId>>,
    signatures: HashSet<(NodeId, EventType, HandlerId)>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add event listener, returns false for a duplicate registration
    pub fn add_listener(&mut self, target: NodeId, event_type: EventType, handler: HandlerId) -> bool {
        if !self.signatures.insert((target, event_type, handler)) {
            tracing::trace!(?target, ?event_type, ?handler, "duplicate listener ignored");
            return false;
        }
        self.handlers.entry((target, event_type)).or_default().push(handler);
        true
    }

    /// Remove event listener
    pub fn remove_listener(&mut self, target: NodeId, event_type: EventType, handler: HandlerId) -> bool {
        if !self.signatures.remove(&(target, event_type, handler)) {
            return false;
        }
        if let Some(list) = self.handlers.get_mut(&(target, event_type)) {
            list.retain(|&h| h != handler);
        }
        true
    }

    /// Handlers registered directly on `target` for `event_type`, in registration order
    pub fn get_handlers(&self, target: NodeId, event_type: EventType) -> &[HandlerId] {
        self.handlers
            .get(&(target, event_type))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of registered listeners
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}
