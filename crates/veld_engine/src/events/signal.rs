//! Typed signal pub/sub for decoupled engine wiring.
//!
//! Scene code announces lifecycle moments here (an object spawned, a
//! collision started) without knowing who listens; GUI and behaviour
//! code subscribe per signal kind. Payloads are typed enum variants
//! rather than name/argument pairs.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A signal with its typed payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// The scene finished its prepare pass
    ScenePrepared,
    /// An object was registered with the scene
    ObjectSpawned(String),
    /// An object was unregistered from the scene
    ObjectRemoved(String),
    /// Two entities came into contact during a physics step
    Collision {
        /// Object id of the first entity
        first: String,
        /// Object id of the second entity
        second: String,
    },
    /// A frame update completed and a redraw should happen
    RedrawRequested,
}

impl Signal {
    /// The kind tag used for subscription routing.
    pub fn kind(&self) -> SignalKind {
        match self {
            Self::ScenePrepared => SignalKind::ScenePrepared,
            Self::ObjectSpawned(_) => SignalKind::ObjectSpawned,
            Self::ObjectRemoved(_) => SignalKind::ObjectRemoved,
            Self::Collision { .. } => SignalKind::Collision,
            Self::RedrawRequested => SignalKind::RedrawRequested,
        }
    }
}

/// Discriminant of [`Signal`], used as the subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// See [`Signal::ScenePrepared`]
    ScenePrepared,
    /// See [`Signal::ObjectSpawned`]
    ObjectSpawned,
    /// See [`Signal::ObjectRemoved`]
    ObjectRemoved,
    /// See [`Signal::Collision`]
    Collision,
    /// See [`Signal::RedrawRequested`]
    RedrawRequested,
}

/// A shared signal callback.
pub type SignalCallback = Rc<RefCell<dyn FnMut(&Signal)>>;

/// Signal hub with per-kind subscriber lists.
///
/// Like the event bus, emission iterates a snapshot of the subscriber
/// list so callbacks may subscribe further callbacks mid-emission.
pub struct SignalHub {
    subscribers: HashMap<SignalKind, Vec<SignalCallback>>,
}

impl SignalHub {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self {
            subscribers: HashMap::new(),
        }
    }

    /// Subscribe a callback to one signal kind.
    pub fn subscribe(&mut self, kind: SignalKind, callback: SignalCallback) {
        self.subscribers.entry(kind).or_default().push(callback);
    }

    /// Notify all subscribers of the signal's kind.
    pub fn emit(&mut self, signal: &Signal) {
        let snapshot: Vec<SignalCallback> = self
            .subscribers
            .get(&signal.kind())
            .map(|list| list.iter().map(Rc::clone).collect())
            .unwrap_or_default();

        for callback in snapshot {
            if let Ok(mut callback) = callback.try_borrow_mut() {
                callback(signal);
            } else {
                log::warn!("signal callback busy during emission of {:?}", signal.kind());
            }
        }
    }
}

impl Default for SignalHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_receive_matching_kind_only() {
        let mut hub = SignalHub::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        hub.subscribe(
            SignalKind::ObjectSpawned,
            Rc::new(RefCell::new(move |signal: &Signal| {
                sink.borrow_mut().push(signal.clone());
            })),
        );

        hub.emit(&Signal::ObjectSpawned("crate01".into()));
        hub.emit(&Signal::RedrawRequested);

        assert_eq!(*seen.borrow(), vec![Signal::ObjectSpawned("crate01".into())]);
    }

    #[test]
    fn collision_signal_carries_both_ids() {
        let mut hub = SignalHub::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        hub.subscribe(
            SignalKind::Collision,
            Rc::new(RefCell::new(move |signal: &Signal| {
                if let Signal::Collision { first, second } = signal {
                    sink.borrow_mut().push((first.clone(), second.clone()));
                }
            })),
        );

        hub.emit(&Signal::Collision {
            first: "a".into(),
            second: "b".into(),
        });

        assert_eq!(*seen.borrow(), vec![("a".to_string(), "b".to_string())]);
    }
}
