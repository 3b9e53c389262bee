// ============================================================================
// ripple-list - SyncRippleList
// The same observable-list contract behind a coarse-grained lock
// ============================================================================

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::core::types::default_equals;
use crate::core::{ChangeEvent, EqualsFn, ListError, ListResult, SubscriptionId};
use crate::mirror::{attach_sync_mirror, MirrorTarget};
use crate::notify::SyncNotifier;

// =============================================================================
// SYNC RIPPLE LIST
// =============================================================================

/// The lock-guarded sibling of [`RippleList`](crate::RippleList).
///
/// Every public operation, read or write, runs under the container's storage
/// lock, so all calls on one instance serialize and a reader always observes
/// a consistent snapshot. The lock is scoped to the whole container, not per
/// element, and is non-reentrant. Cross-call atomicity is NOT provided: a
/// `remove` followed by a `push` can interleave with other threads between
/// the two calls.
///
/// The storage lock is never held across subscriber fan-out. A mutation
/// completes under the storage lock, queues its events, acquires the
/// delivery lock *before* releasing the storage lock, and then delivers
/// holding only the delivery lock. Deliveries across threads therefore
/// retain mutation order, and callbacks never run under the storage lock.
/// Two consequences for callers:
///
/// - by the time callbacks run, the list already holds its post-mutation
///   state - for every operation, including the remove family;
/// - a failing subscriber leaves the list in that post-mutation state and
///   any not-yet-notified subscriber unaware of it (fail-fast).
///
/// Subscriber callbacks must not call back into the same list instance or
/// manage its subscriptions: the delivery lock is non-reentrant and doing so
/// self-deadlocks.
///
/// `SyncRippleList<T>` is `Send + Sync` when `T: Send`.
pub struct SyncRippleList<T> {
    items: Mutex<Vec<T>>,
    equals: EqualsFn<T>,
    notifier: SyncNotifier<T>,
}

impl<T> SyncRippleList<T> {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Create an empty list using `PartialEq` equality.
    pub fn new() -> Self
    where
        T: PartialEq,
    {
        Self::new_with_equals(default_equals::<T>)
    }

    /// Create an empty list with a custom equality function.
    pub fn new_with_equals(equals: EqualsFn<T>) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            equals,
            notifier: SyncNotifier::new(),
        }
    }

    /// Create an empty list with at least the given capacity.
    pub fn with_capacity(capacity: usize) -> Self
    where
        T: PartialEq,
    {
        Self {
            items: Mutex::new(Vec::with_capacity(capacity)),
            equals: default_equals::<T>,
            notifier: SyncNotifier::new(),
        }
    }

    /// Create a list holding the given elements. No events are published for
    /// the initial content.
    pub fn from_vec(items: Vec<T>) -> Self
    where
        T: PartialEq,
    {
        Self {
            items: Mutex::new(items),
            equals: default_equals::<T>,
            notifier: SyncNotifier::new(),
        }
    }

    /// Create a list from an iterator. No events are published for the
    /// initial content.
    pub fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self
    where
        T: PartialEq,
    {
        Self::from_vec(iter.into_iter().collect())
    }

    /// Create a list seeded with `initial` and a mirror subscription that
    /// replays every future delta onto `target`.
    ///
    /// As with [`RippleList::with_mirror`](crate::RippleList::with_mirror),
    /// the target is NOT pre-populated; only mutations made after
    /// construction propagate.
    pub fn with_mirror<I, M>(initial: I, target: &Arc<Mutex<M>>) -> (Self, SubscriptionId)
    where
        I: IntoIterator<Item = T>,
        M: MirrorTarget<T> + Send + 'static,
        T: PartialEq + Clone + Send + 'static,
    {
        let list = Self::from_iter(initial);
        let id = attach_sync_mirror(&list, target);
        (list, id)
    }

    // =========================================================================
    // SUBSCRIPTIONS
    // =========================================================================

    /// Register an infallible callback for every future change event.
    /// Delivery order follows registration order.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ChangeEvent<T>) + Send + 'static,
    {
        self.notifier.subscribe(callback)
    }

    /// Register a fallible callback. An `Err` return aborts delivery to
    /// later subscribers and surfaces from the mutating call (fail-fast).
    pub fn subscribe_fallible<F>(&self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ChangeEvent<T>) -> Result<(), ListError> + Send + 'static,
    {
        self.notifier.subscribe_fallible(callback)
    }

    /// Remove a subscription. Returns false if the id was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.notifier.subscriber_count()
    }

    // =========================================================================
    // LENGTH & CAPACITY
    // =========================================================================

    /// Number of elements in the list.
    pub fn len(&self) -> usize {
        self.lock_items().len()
    }

    /// True if the list contains no elements.
    pub fn is_empty(&self) -> bool {
        self.lock_items().is_empty()
    }

    /// Current capacity of the backing storage.
    pub fn capacity(&self) -> usize {
        self.lock_items().capacity()
    }

    /// Reserve room for at least `additional` more elements.
    pub fn reserve(&self, additional: usize) {
        self.lock_items().reserve(additional);
    }

    /// Shrink the backing storage to fit the current length.
    pub fn shrink_to_fit(&self) {
        self.lock_items().shrink_to_fit();
    }

    // =========================================================================
    // READS (each takes the lock for a consistent snapshot)
    // =========================================================================

    /// Copy of the element at `index`, or `IndexOutOfRange`.
    pub fn get(&self, index: usize) -> ListResult<T>
    where
        T: Clone,
    {
        let items = self.lock_items();
        items
            .get(index)
            .cloned()
            .ok_or_else(|| ListError::out_of_range(index, items.len()))
    }

    /// Copy of the first element, if any.
    pub fn first(&self) -> Option<T>
    where
        T: Clone,
    {
        self.lock_items().first().cloned()
    }

    /// Copy of the last element, if any.
    pub fn last(&self) -> Option<T>
    where
        T: Clone,
    {
        self.lock_items().last().cloned()
    }

    /// True if some element equals `value` under the list's equality.
    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }

    /// Index of the first element equal to `value`, if any.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.lock_items()
            .iter()
            .position(|item| (self.equals)(item, value))
    }

    /// Index of the last element equal to `value`, if any.
    pub fn last_index_of(&self, value: &T) -> Option<usize> {
        self.lock_items()
            .iter()
            .rposition(|item| (self.equals)(item, value))
    }

    /// Copy of the first element satisfying the predicate.
    pub fn find<P: FnMut(&T) -> bool>(&self, mut predicate: P) -> Option<T>
    where
        T: Clone,
    {
        self.lock_items()
            .iter()
            .find(|item| predicate(item))
            .cloned()
    }

    /// Index of the first element satisfying the predicate.
    pub fn find_index<P: FnMut(&T) -> bool>(&self, mut predicate: P) -> Option<usize> {
        self.lock_items().iter().position(|item| predicate(item))
    }

    /// True if any element satisfies the predicate.
    pub fn exists<P: FnMut(&T) -> bool>(&self, predicate: P) -> bool {
        self.find_index(predicate).is_some()
    }

    /// True if every element satisfies the predicate.
    pub fn true_for_all<P: FnMut(&T) -> bool>(&self, mut predicate: P) -> bool {
        self.lock_items().iter().all(|item| predicate(item))
    }

    /// Copy of the `count` elements starting at `index`.
    pub fn get_range(&self, index: usize, count: usize) -> ListResult<Vec<T>>
    where
        T: Clone,
    {
        let items = self.lock_items();
        let end = Self::range_end(&items, index, count)?;
        Ok(items[index..end].to_vec())
    }

    /// Copy of the elements.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.lock_items().clone()
    }

    /// Consume the list, returning the backing storage.
    pub fn into_vec(self) -> Vec<T> {
        self.items.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Call `f` for each element in order, holding the lock for the whole
    /// traversal. `f` must not call back into this list.
    pub fn for_each<F: FnMut(&T)>(&self, mut f: F) {
        for item in self.lock_items().iter() {
            f(item);
        }
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Append `value` at the end. Publishes one `Added(value)`.
    pub fn push(&self, value: T) -> ListResult<()>
    where
        T: Clone,
    {
        let mut items = self.lock_items();
        let event = ChangeEvent::added(value.clone());
        items.push(value);
        self.handoff_and_deliver(items, &[event])
    }

    /// Append every value, preserving order, then publish one `Added` per
    /// value in insertion order.
    pub fn extend<I: IntoIterator<Item = T>>(&self, values: I) -> ListResult<()>
    where
        T: Clone,
    {
        let values: Vec<T> = values.into_iter().collect();
        let events: Vec<ChangeEvent<T>> =
            values.iter().cloned().map(ChangeEvent::added).collect();

        let mut items = self.lock_items();
        items.extend(values);
        self.handoff_and_deliver(items, &events)
    }

    /// Insert `value` at `index` (which may equal the length), shifting
    /// later elements right. Publishes `Added(value)`.
    pub fn insert(&self, index: usize, value: T) -> ListResult<()>
    where
        T: Clone,
    {
        let mut items = self.lock_items();
        if index > items.len() {
            return Err(ListError::out_of_range(index, items.len()));
        }
        let event = ChangeEvent::added(value.clone());
        items.insert(index, value);
        self.handoff_and_deliver(items, &[event])
    }

    /// Insert every value at `index`, preserving order, then publish one
    /// `Added` per value in insertion order.
    pub fn insert_range<I: IntoIterator<Item = T>>(&self, index: usize, values: I) -> ListResult<()>
    where
        T: Clone,
    {
        let values: Vec<T> = values.into_iter().collect();
        let events: Vec<ChangeEvent<T>> =
            values.iter().cloned().map(ChangeEvent::added).collect();

        let mut items = self.lock_items();
        if index > items.len() {
            return Err(ListError::out_of_range(index, items.len()));
        }
        items.splice(index..index, values);
        self.handoff_and_deliver(items, &events)
    }

    /// Replace the slot at `index`.
    ///
    /// Equal values (injected equality) overwrite silently; different values
    /// publish `Removed(old)` then `Added(new)`, in that order, as one
    /// mutation's event batch.
    pub fn set(&self, index: usize, value: T) -> ListResult<()>
    where
        T: Clone,
    {
        let mut items = self.lock_items();
        let len = items.len();
        let slot = items
            .get_mut(index)
            .ok_or_else(|| ListError::out_of_range(index, len))?;

        if (self.equals)(slot, &value) {
            *slot = value;
            return Ok(());
        }

        let old = std::mem::replace(slot, value.clone());
        let events = [ChangeEvent::removed(old), ChangeEvent::added(value)];
        self.handoff_and_deliver(items, &events)
    }

    /// Remove the first element equal to `value`. Returns whether an
    /// element was removed; publishes `Removed` only on success. Removing an
    /// absent value is a no-op: `Ok(false)`, no event.
    pub fn remove(&self, value: &T) -> ListResult<bool> {
        let mut items = self.lock_items();
        let Some(index) = items.iter().position(|item| (self.equals)(item, value)) else {
            return Ok(false);
        };
        let removed = items.remove(index);
        self.handoff_and_deliver(items, &[ChangeEvent::removed(removed)])?;
        Ok(true)
    }

    /// Remove the element at `index` and return it. Publishes
    /// `Removed(item)`.
    pub fn remove_at(&self, index: usize) -> ListResult<T>
    where
        T: Clone,
    {
        let mut items = self.lock_items();
        if index >= items.len() {
            return Err(ListError::out_of_range(index, items.len()));
        }
        let removed = items.remove(index);
        let event = ChangeEvent::removed(removed.clone());
        self.handoff_and_deliver(items, &[event])?;
        Ok(removed)
    }

    /// Remove the contiguous block of `count` elements starting at `index`.
    /// Publishes one `Removed` per element, in sequence order.
    pub fn remove_range(&self, index: usize, count: usize) -> ListResult<()> {
        let mut items = self.lock_items();
        let end = Self::range_end(&items, index, count)?;
        let events: Vec<ChangeEvent<T>> =
            items.drain(index..end).map(ChangeEvent::removed).collect();
        self.handoff_and_deliver(items, &events)
    }

    /// Remove every element satisfying the predicate, preserving the
    /// relative order of survivors. Publishes one `Removed` per removed
    /// element and returns the removed count.
    pub fn remove_all<P: FnMut(&T) -> bool>(&self, mut predicate: P) -> ListResult<usize> {
        let mut items = self.lock_items();
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(items.len());
        for item in items.drain(..) {
            if predicate(&item) {
                removed.push(item);
            } else {
                kept.push(item);
            }
        }
        *items = kept;

        let count = removed.len();
        let events: Vec<ChangeEvent<T>> =
            removed.into_iter().map(ChangeEvent::removed).collect();
        self.handoff_and_deliver(items, &events)?;
        Ok(count)
    }

    /// Remove every element, publishing one `Removed` per element in
    /// sequence order.
    pub fn clear(&self) -> ListResult<()> {
        let mut items = self.lock_items();
        let events: Vec<ChangeEvent<T>> =
            items.drain(..).map(ChangeEvent::removed).collect();
        self.handoff_and_deliver(items, &events)
    }

    // =========================================================================
    // IN-PLACE OPERATIONS (no notification side effects)
    // =========================================================================

    /// Reverse the element order.
    pub fn reverse(&self) {
        self.lock_items().reverse();
    }

    /// Sort the elements.
    pub fn sort(&self)
    where
        T: Ord,
    {
        self.lock_items().sort();
    }

    /// Sort the elements with a comparator.
    pub fn sort_by<F: FnMut(&T, &T) -> std::cmp::Ordering>(&self, compare: F) {
        self.lock_items().sort_by(compare);
    }

    /// Sort the elements by a key function.
    pub fn sort_by_key<K: Ord, F: FnMut(&T) -> K>(&self, f: F) {
        self.lock_items().sort_by_key(f);
    }

    /// Binary search in a sorted list.
    pub fn binary_search(&self, value: &T) -> Result<usize, usize>
    where
        T: Ord,
    {
        self.lock_items().binary_search(value)
    }

    /// Binary search with a comparator.
    pub fn binary_search_by<F: FnMut(&T) -> std::cmp::Ordering>(
        &self,
        compare: F,
    ) -> Result<usize, usize> {
        self.lock_items().binary_search_by(compare)
    }

    // =========================================================================
    // INTERNAL
    // =========================================================================

    fn lock_items(&self) -> MutexGuard<'_, Vec<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue the mutation's events for delivery: take the delivery lock
    /// while the storage lock is still held, release the storage lock, then
    /// deliver. The handoff is what keeps delivery in mutation order across
    /// threads.
    fn handoff_and_deliver(
        &self,
        items: MutexGuard<'_, Vec<T>>,
        events: &[ChangeEvent<T>],
    ) -> ListResult<()> {
        if events.is_empty() {
            return Ok(());
        }
        let mut entries = self.notifier.lock_entries();
        drop(items);
        SyncNotifier::deliver(&mut entries, events)
    }

    fn range_end(items: &[T], index: usize, count: usize) -> ListResult<usize> {
        let len = items.len();
        match index.checked_add(count) {
            Some(end) if index <= len && end <= len => Ok(end),
            _ => Err(ListError::out_of_range(index.saturating_add(count), len)),
        }
    }
}

impl<T: PartialEq> Default for SyncRippleList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SyncRippleList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncRippleList")
            .field("items", &*self.lock_items())
            .field("subscribers", &self.notifier.subscriber_count())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
