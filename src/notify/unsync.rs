// ============================================================================
// ripple-list - Notifier (single-threaded)
// Ordered, synchronous fan-out of change events to subscriber callbacks
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::trace;

use crate::core::{ChangeEvent, ListError, SubscriptionId};

// =============================================================================
// TYPE ALIASES
// =============================================================================

/// Fallible subscriber callback. Returning an error aborts delivery of the
/// current event to any later subscriber and surfaces from the mutating call.
pub type SubscriberFn<T> = Box<dyn FnMut(&ChangeEvent<T>) -> Result<(), ListError>>;

// =============================================================================
// NOTIFIER
// =============================================================================

struct Entry<T> {
    id: SubscriptionId,
    // Rc so delivery can run from a snapshot while a callback edits the
    // registry (subscribe/unsubscribe from inside a callback is allowed).
    callback: Rc<RefCell<SubscriberFn<T>>>,
}

/// Ordered registry of subscriber callbacks for one list instance.
///
/// Registration order is call order; delivery order follows registration
/// order. Delivery is synchronous, on the thread performing the mutation,
/// and fail-fast: the first callback error stops the chain.
///
/// A callback must not mutate the list that is currently publishing to it;
/// the delivery snapshot holds a live borrow of the callback itself, so
/// re-entry panics on the inner `RefCell`.
pub struct Notifier<T> {
    entries: RefCell<Vec<Entry<T>>>,
    next_id: Cell<u64>,
}

impl<T> Notifier<T> {
    /// Create an empty notifier.
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Register an infallible callback for every future change event.
    pub fn subscribe<F>(&self, mut callback: F) -> SubscriptionId
    where
        F: FnMut(&ChangeEvent<T>) + 'static,
    {
        self.subscribe_fallible(move |event| {
            callback(event);
            Ok(())
        })
    }

    /// Register a fallible callback for every future change event.
    ///
    /// An `Err` return aborts delivery to later subscribers and propagates
    /// to the caller of the mutation that triggered the event.
    pub fn subscribe_fallible<F>(&self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ChangeEvent<T>) -> Result<(), ListError> + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push(Entry {
            id,
            callback: Rc::new(RefCell::new(Box::new(callback))),
        });
        trace!(subscription = id.0, "subscriber registered");
        id
    }

    /// Remove a registration. Returns false if the id was already gone.
    ///
    /// A delivery already in progress still reaches the removed subscriber
    /// for the in-flight event; subsequent events do not.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        let removed = entries.len() != before;
        if removed {
            trace!(subscription = id.0, "subscriber removed");
        }
        removed
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Deliver one event to every currently registered subscriber, in
    /// registration order. Fail-fast on the first callback error.
    pub(crate) fn publish(&self, event: &ChangeEvent<T>) -> Result<(), ListError> {
        if self.entries.borrow().is_empty() {
            return Ok(());
        }

        // Snapshot the registry so callbacks may subscribe/unsubscribe
        // without invalidating the iteration.
        let snapshot: Vec<(SubscriptionId, Rc<RefCell<SubscriberFn<T>>>)> = self
            .entries
            .borrow()
            .iter()
            .map(|entry| (entry.id, entry.callback.clone()))
            .collect();

        for (id, callback) in snapshot {
            trace!(subscription = id.0, kind = ?event.kind, "delivering change event");
            (callback.borrow_mut())(event)?;
        }
        Ok(())
    }
}

impl<T> Default for Notifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Notifier<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
