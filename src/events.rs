//! Typed publish/subscribe plumbing between a rendering host and a designer.
//!
//! Inbound, the host translates pointer and keyboard input into
//! [`InputEvent`]s and hands them to the designer. Outbound, the designer
//! publishes [`FlowEvent`]s on its own [`EventBus`] so the host knows what to
//! redraw. Each designer owns its bus; there is no process-wide instance.

use crate::geometry::Offset;
use crate::model::{ElementId, PinRef};
use crate::zorder::ZOrderAction;

pub type SubscriptionId = usize;

/// Input from the rendering layer. Pointer events on an element carry the
/// struck element, so the designer does not need to hit-test them.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    BlockPointerDown { block_id: String, position: Offset },
    PinPointerDown { pin: PinRef, position: Offset },
    ConnectionPointerDown { connection_id: String, position: Offset },
    /// Pointer down on empty canvas background.
    CanvasPointerDown { position: Offset },
    PointerMove { position: Offset },
    PointerUp { position: Offset },
    PointerLeave,
    KeyUp(Key),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Delete,
    Escape,
    Other(String),
}

impl Key {
    /// Maps a DOM-style key name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Delete" => Key::Delete,
            "Escape" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }
}

/// Notifications published after the designer mutates its flow.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    FlowLoaded { blocks: usize, connections: usize },
    BlockAdded(String),
    BlockRemoved(String),
    BlockMoved { block_id: String, location: Offset },
    ConnectionAdded(String),
    ConnectionRemoved(String),
    SelectionChanged {
        block: Option<String>,
        connection: Option<String>,
    },
    ZOrderChanged { block_id: String, action: ZOrderAction },
    /// The in-progress connection started, moved, or was cleared.
    DrawingConnectionChanged,
    /// An element's appearance changed without a structural change.
    ElementChanged(ElementId),
}

/// A single-threaded publish/subscribe hub.
///
/// Handlers run synchronously, in subscription order, during `publish`.
pub struct EventBus<E> {
    handlers: Vec<(SubscriptionId, Box<dyn FnMut(&E)>)>,
    next_id: SubscriptionId,
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&E) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    pub fn publish(&mut self, event: &E) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }

    /// Drops every subscription.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}
