//! Signal/slot bus for host notifications.
//!
//! A signal holds a set of connected slots (callbacks) and invokes them all
//! on emit. Signals are cheaply cloneable handles to shared state, so a
//! host can hand the same signal to the engine and to its own event
//! plumbing.
//!
//! Invocation is always direct and synchronous: the engine runs inside a
//! single-threaded cooperative event loop, so there is no queued or
//! cross-thread delivery. Slots are cloned out of the lock before being
//! invoked, so a slot may connect or disconnect other slots while running.
//!
//! # Example
//!
//! ```
//! use cartomark_core::Signal;
//!
//! let data_loaded = Signal::<u32>::new();
//! let conn_id = data_loaded.connect(|tiles| {
//!     println!("loaded {tiles} tiles");
//! });
//! data_loaded.emit(&12);
//! data_loaded.disconnect(conn_id);
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// The ID remains valid until the connection is explicitly
    /// disconnected or the last handle to the signal is dropped.
    pub struct ConnectionId;
}

type Slot<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct SignalInner<E> {
    slots: Mutex<SlotMap<ConnectionId, Slot<E>>>,
}

/// A typed signal with multiple connected slots.
pub struct Signal<E> {
    inner: Arc<SignalInner<E>>,
}

impl<E> Signal<E> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SignalInner {
                slots: Mutex::new(SlotMap::with_key()),
            }),
        }
    }

    /// Connect a slot. Returns an ID usable with [`Signal::disconnect`].
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.inner.slots.lock().insert(Arc::new(slot))
    }

    /// Remove a connection. Returns `false` if the ID was already gone.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.inner.slots.lock().remove(id).is_some()
    }

    /// Invoke every connected slot with the given event.
    pub fn emit(&self, event: &E) {
        let slots: Vec<Slot<E>> = self.inner.slots.lock().values().cloned().collect();
        for slot in slots {
            slot(event);
        }
    }

    /// The number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.inner.slots.lock().len()
    }
}

impl<E> Clone for Signal<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> Default for Signal<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Signal<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connection_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn emit_reaches_all_slots() {
        let signal = Signal::<u32>::new();
        let count = Arc::new(AtomicU32::new(0));

        let c1 = Arc::clone(&count);
        signal.connect(move |v| {
            c1.fetch_add(*v, Ordering::SeqCst);
        });
        let c2 = Arc::clone(&count);
        signal.connect(move |v| {
            c2.fetch_add(*v * 10, Ordering::SeqCst);
        });

        signal.emit(&2);
        assert_eq!(count.load(Ordering::SeqCst), 22);
    }

    #[test]
    fn disconnect_stops_delivery() {
        let signal = Signal::<()>::new();
        let count = Arc::new(AtomicU32::new(0));

        let c = Arc::clone(&count);
        let id = signal.connect(move |()| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        signal.emit(&());
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit(&());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clones_share_connections() {
        let signal = Signal::<()>::new();
        let clone = signal.clone();
        let count = Arc::new(AtomicU32::new(0));

        let c = Arc::clone(&count);
        clone.connect(move |()| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        signal.emit(&());
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(signal.connection_count(), 1);
    }

    #[test]
    fn slot_may_connect_during_emit() {
        let signal = Signal::<()>::new();
        let clone = signal.clone();
        signal.connect(move |()| {
            clone.connect(|()| {});
        });
        signal.emit(&());
        assert_eq!(signal.connection_count(), 2);
    }
}
