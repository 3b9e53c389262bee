// ============================================================================
// ripple-list - SyncNotifier (thread-safe)
// Fan-out registry used by the lock-guarded list variant
// ============================================================================

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::trace;

use crate::core::{ChangeEvent, ListError, SubscriptionId};

// =============================================================================
// TYPE ALIASES
// =============================================================================

/// Fallible subscriber callback for the thread-safe variant. Must be `Send`
/// because delivery happens on whichever thread performed the mutation.
pub type SyncSubscriberFn<T> = Box<dyn FnMut(&ChangeEvent<T>) -> Result<(), ListError> + Send>;

// =============================================================================
// SYNC NOTIFIER
// =============================================================================

pub(crate) struct SyncEntry<T> {
    id: SubscriptionId,
    callback: SyncSubscriberFn<T>,
}

/// Thread-safe registry of subscriber callbacks for one guarded list.
///
/// Registration order is call order; delivery order follows registration
/// order. The registry lock doubles as the delivery lock: the owning list
/// acquires it before releasing its storage lock, so deliveries across
/// threads retain mutation order.
///
/// Callbacks run while the delivery lock is held. A callback must therefore
/// not call back into the same list or manage subscriptions of the same
/// notifier; the lock is non-reentrant and doing so self-deadlocks.
pub struct SyncNotifier<T> {
    entries: Mutex<Vec<SyncEntry<T>>>,
    next_id: AtomicU64,
}

impl<T> SyncNotifier<T> {
    /// Create an empty notifier.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Register an infallible callback for every future change event.
    pub fn subscribe<F>(&self, mut callback: F) -> SubscriptionId
    where
        F: FnMut(&ChangeEvent<T>) + Send + 'static,
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
        F: FnMut(&ChangeEvent<T>) -> Result<(), ListError> + Send + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock_entries().push(SyncEntry {
            id,
            callback: Box::new(callback),
        });
        trace!(subscription = id.0, "subscriber registered");
        id
    }

    /// Remove a registration. Returns false if the id was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut entries = self.lock_entries();
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
        self.lock_entries().len()
    }

    /// Acquire the registry/delivery lock.
    ///
    /// The owning list takes this guard while still holding its storage lock
    /// (lock handoff), then releases the storage lock before delivering.
    /// Poisoning is ignored: a panicking callback leaves the registry itself
    /// structurally intact.
    pub(crate) fn lock_entries(&self) -> MutexGuard<'_, Vec<SyncEntry<T>>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver a batch of events produced by one mutation, in event order,
    /// each to every subscriber in registration order. Fail-fast on the
    /// first callback error.
    pub(crate) fn deliver(
        entries: &mut Vec<SyncEntry<T>>,
        events: &[ChangeEvent<T>],
    ) -> Result<(), ListError> {
        for event in events {
            for entry in entries.iter_mut() {
                trace!(subscription = entry.id.0, kind = ?event.kind, "delivering change event");
                (entry.callback)(event)?;
            }
        }
        Ok(())
    }
}

impl<T> Default for SyncNotifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for SyncNotifier<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncNotifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[test]
    fn delivers_batch_in_event_then_registration_order() {
        let notifier: SyncNotifier<i32> = SyncNotifier::new();
        let seen: Arc<Mutex<Vec<(usize, i32)>>> = Arc::new(Mutex::new(Vec::new()));

        for tag in 0..2 {
            let seen = seen.clone();
            notifier.subscribe(move |event| {
                seen.lock().unwrap().push((tag, event.item));
            });
        }

        let events = [ChangeEvent::added(10), ChangeEvent::added(20)];
        let mut entries = notifier.lock_entries();
        SyncNotifier::deliver(&mut entries, &events).unwrap();
        drop(entries);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![(0, 10), (1, 10), (0, 20), (1, 20)]
        );
    }

    #[test]
    fn failing_subscriber_stops_the_batch() {
        let notifier: SyncNotifier<i32> = SyncNotifier::new();
        let later = Arc::new(AtomicUsize::new(0));

        notifier.subscribe_fallible(|_| Err(ListError::invariant("boom")));
        {
            let later = later.clone();
            notifier.subscribe(move |_| {
                later.fetch_add(1, Ordering::SeqCst);
            });
        }

        let events = [ChangeEvent::added(1), ChangeEvent::added(2)];
        let mut entries = notifier.lock_entries();
        let err = SyncNotifier::deliver(&mut entries, &events).unwrap_err();
        drop(entries);

        assert_eq!(err, ListError::invariant("boom"));
        assert_eq!(later.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let notifier: SyncNotifier<i32> = SyncNotifier::new();
        let id = notifier.subscribe(|_| {});
        assert_eq!(notifier.subscriber_count(), 1);
        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[test]
    fn subscription_ids_are_unique_across_threads() {
        let notifier: Arc<SyncNotifier<i32>> = Arc::new(SyncNotifier::new());
        let mut handles = Vec::new();
        for _ in 0..4 {
            let notifier = notifier.clone();
            handles.push(std::thread::spawn(move || {
                (0..50).map(|_| notifier.subscribe(|_| {})).collect::<Vec<_>>()
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.extend(handle.join().unwrap());
        }
        ids.sort_by_key(|id| id.0);
        ids.dedup();
        assert_eq!(ids.len(), 200);
    }
}
