//! Publish/subscribe port used for the transport and the log-capture source.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;

/// Callback invoked with each event payload.
pub type Handler = Box<dyn FnMut(&Value)>;

/// Identifies a registered handler for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Minimal event bus capability.
///
/// Methods take `&self` so a bus can be shared (`Rc<dyn EventBus>`) between
/// the controller, the bootstrap and the host that feeds it.
pub trait EventBus {
    /// Registers `handler` for `event`.
    fn on(&self, event: &str, handler: Handler) -> ListenerId;

    /// Delivers `payload` to every handler registered for `event`, in registration order.
    ///
    /// Implementations may skip a handler that is still running when the same
    /// event is emitted from inside it; that handler does not see the nested
    /// payload. [`LocalBus`] behaves this way.
    fn emit(&self, event: &str, payload: &Value);

    /// Unregisters a handler. Returns `false` if it was not registered.
    fn remove_listener(&self, event: &str, id: ListenerId) -> bool;
}

/// Serializes `payload` and emits it on `bus`.
pub fn emit_json<T: Serialize>(
    bus: &dyn EventBus,
    event: &str,
    payload: &T,
) -> Result<(), serde_json::Error> {
    let value = serde_json::to_value(payload)?;
    bus.emit(event, &value);
    Ok(())
}

type SharedHandler = Rc<RefCell<Handler>>;

/// Single-threaded in-process bus.
///
/// Handlers may register, remove or emit from inside a callback. A handler
/// that is already running is skipped rather than re-entered, and the nested
/// payload is lost for it (a `warn` is logged).
#[derive(Default)]
pub struct LocalBus {
    state: RefCell<BusState>,
}

#[derive(Default)]
struct BusState {
    next_id: u64,
    listeners: HashMap<String, Vec<(ListenerId, SharedHandler)>>,
}

impl LocalBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handlers registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.state
            .borrow()
            .listeners
            .get(event)
            .map_or(0, Vec::len)
    }
}

impl EventBus for LocalBus {
    fn on(&self, event: &str, handler: Handler) -> ListenerId {
        let mut state = self.state.borrow_mut();
        let id = ListenerId(state.next_id);
        state.next_id += 1;
        let shared: SharedHandler = Rc::new(RefCell::new(handler));
        state
            .listeners
            .entry(event.to_owned())
            .or_default()
            .push((id, shared));
        id
    }

    fn emit(&self, event: &str, payload: &Value) {
        let handlers: Vec<SharedHandler> = self
            .state
            .borrow()
            .listeners
            .get(event)
            .map(|list| list.iter().map(|(_, h)| Rc::clone(h)).collect())
            .unwrap_or_default();

        for handler in handlers {
            match handler.try_borrow_mut() {
                Ok(mut callback) => (&mut *callback)(payload),
                Err(_) => tracing::warn!(event, "skipping re-entrant event handler"),
            }
        }
    }

    fn remove_listener(&self, event: &str, id: ListenerId) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(list) = state.listeners.get_mut(event) else {
            return false;
        };
        let before = list.len();
        list.retain(|(lid, _)| *lid != id);
        let removed = list.len() != before;
        if list.is_empty() {
            state.listeners.remove(event);
        }
        removed
    }
}
