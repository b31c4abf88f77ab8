//! Event system: typed input events plus a typed signal hub.
//!
//! Key principles:
//! - Typed event payloads (no key-value or string lookups)
//! - Handler returns bool (true = consumed, stops forwarding)
//! - Registration per event type (only notify interested handlers)
//! - Dispatch iterates a snapshot of the subscriber list, so handlers
//!   may subscribe or unsubscribe while an event is being delivered
//!   (a window starting a drag subscribes itself to mouse-move
//!   mid-event)
//!
//! Handlers subscribe in priority order: the GUI overlay registers
//! before game behaviours and consumes events while a window has
//! focus, which stops forwarding.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// A key was pressed
    Keyboard,
    /// Mouse cursor moved
    MouseMove,
    /// Mouse button changed state
    MousePress,
}

/// Mouse button identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left button
    Left,
    /// Middle button
    Middle,
    /// Right button
    Right,
    /// Any other button, by raw index
    Other(u8),
}

/// A typed input event
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Keyboard input
    Keyboard {
        /// Raw key code from the window system
        key: u32,
        /// True for non-character keys (arrows, function keys)
        special: bool,
    },
    /// Mouse motion; the delta is computed by the bus from the
    /// previously observed position
    MouseMove {
        /// Cursor x in window coordinates
        x: f32,
        /// Cursor y in window coordinates
        y: f32,
        /// Change in x since the previous move event
        dx: f32,
        /// Change in y since the previous move event
        dy: f32,
    },
    /// Mouse button press or release
    MousePress {
        /// Cursor x in window coordinates
        x: f32,
        /// Cursor y in window coordinates
        y: f32,
        /// Which button changed
        button: MouseButton,
        /// True on press, false on release
        pressed: bool,
    },
}

impl Event {
    /// The type tag used for subscription routing.
    pub fn event_type(&self) -> EventType {
        match self {
            Self::Keyboard { .. } => EventType::Keyboard,
            Self::MouseMove { .. } => EventType::MouseMove,
            Self::MousePress { .. } => EventType::MousePress,
        }
    }
}

/// Event handler trait.
///
/// Returns true if the event was consumed, which stops forwarding to
/// later subscribers. The bus is passed back in so handlers can
/// subscribe or unsubscribe during dispatch.
pub trait EventHandler {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, event: &Event, bus: &mut EventBus) -> bool;
}

/// Identifies a subscription so it can be removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

/// A shared, interior-mutable event handler.
pub type SharedHandler = Rc<RefCell<dyn EventHandler>>;

/// Event bus with per-type subscriber lists.
///
/// Raw input from the window system enters through the `feed_*`
/// methods and is re-emitted as typed [`Event`]s to subscribers in
/// registration order.
pub struct EventBus {
    subscribers: HashMap<EventType, Vec<(SubscriberId, SharedHandler)>>,
    next_id: u64,
    last_mouse: Option<(f32, f32)>,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self {
            subscribers: HashMap::new(),
            next_id: 0,
            last_mouse: None,
        }
    }

    /// Register a handler for a specific event type. Only handlers
    /// registered for this type will be notified.
    pub fn subscribe(&mut self, event_type: EventType, handler: SharedHandler) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers
            .entry(event_type)
            .or_default()
            .push((id, handler));
        id
    }

    /// Remove a subscription. Removing an id that is already gone is a
    /// no-op, so handlers can unsubscribe themselves during dispatch
    /// without bookkeeping.
    pub fn unsubscribe(&mut self, event_type: EventType, id: SubscriberId) {
        if let Some(list) = self.subscribers.get_mut(&event_type) {
            list.retain(|(sid, _)| *sid != id);
        }
    }

    /// Number of live subscriptions for an event type.
    pub fn subscriber_count(&self, event_type: EventType) -> usize {
        self.subscribers.get(&event_type).map_or(0, Vec::len)
    }

    /// Process a raw keyboard input event.
    pub fn feed_keyboard(&mut self, key: u32, special: bool) {
        self.dispatch(&Event::Keyboard { key, special });
    }

    /// Process a raw mouse move event. The delta against the previous
    /// position is computed here; the first move has a zero delta.
    pub fn feed_mouse_move(&mut self, x: f32, y: f32) {
        let (dx, dy) = match self.last_mouse {
            Some((px, py)) => (x - px, y - py),
            None => (0.0, 0.0),
        };
        self.last_mouse = Some((x, y));
        self.dispatch(&Event::MouseMove { x, y, dx, dy });
    }

    /// Process a raw mouse button event.
    pub fn feed_mouse_press(&mut self, x: f32, y: f32, button: MouseButton, pressed: bool) {
        self.dispatch(&Event::MousePress {
            x,
            y,
            button,
            pressed,
        });
    }

    /// Dispatch an event to subscribers of its type, stopping at the
    /// first handler that consumes it.
    ///
    /// The subscriber list is snapshotted before iteration; handlers
    /// added during dispatch see only subsequent events, and handlers
    /// removed during dispatch are still called for this one.
    pub fn dispatch(&mut self, event: &Event) {
        let snapshot: Vec<SharedHandler> = self
            .subscribers
            .get(&event.event_type())
            .map(|list| list.iter().map(|(_, h)| Rc::clone(h)).collect())
            .unwrap_or_default();

        for handler in snapshot {
            match handler.try_borrow_mut() {
                Ok(mut handler) => {
                    if handler.on_event(event, self) {
                        break;
                    }
                }
                Err(_) => {
                    // Reentrant dispatch reached a handler that is
                    // already running; skip it for this event.
                    log::warn!("event handler busy during dispatch of {:?}", event.event_type());
                }
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

mod signal;
pub use signal::{Signal, SignalHub, SignalKind};
