// ============================================================================
// ripple-list - RippleList
// Observable list for a single-threaded owner
// ============================================================================

use std::ops::Index;
use std::rc::Rc;

use crate::core::types::default_equals;
use crate::core::{ChangeEvent, EqualsFn, ListError, ListResult, SubscriptionId};
use crate::mirror::{attach_mirror, MirrorTarget};
use crate::notify::Notifier;

// =============================================================================
// RIPPLE LIST
// =============================================================================

/// An insertion-ordered, zero-indexed, observable list.
///
/// Every structural mutation publishes one [`ChangeEvent`] per affected
/// element, in element order, synchronously and on the calling thread, to
/// every subscriber in registration order. Duplicates are allowed; element
/// identity is decided by an injectable equality function defaulting to
/// `PartialEq`.
///
/// Mutating operations return `Result` because subscriber callbacks are
/// fallible: the first callback error aborts delivery to later subscribers
/// and surfaces from the mutating call. The per-operation docs state what
/// the list holds when that happens.
///
/// This variant performs no locking; mutators take `&mut self`, so a single
/// owner (or an external lock) is required. For a lock-guarded sibling with
/// the same contract, see [`SyncRippleList`](crate::SyncRippleList).
///
/// # Example
///
/// ```
/// use ripple_list::{ChangeKind, RippleList};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let mut list = RippleList::new();
/// let log = Rc::new(RefCell::new(Vec::new()));
///
/// let log_handle = log.clone();
/// list.subscribe(move |event| {
///     log_handle.borrow_mut().push((event.kind, event.item));
/// });
///
/// list.push(1).unwrap();
/// list.push(2).unwrap();
/// list.remove(&1).unwrap();
///
/// assert_eq!(
///     *log.borrow(),
///     vec![
///         (ChangeKind::Added, 1),
///         (ChangeKind::Added, 2),
///         (ChangeKind::Removed, 1),
///     ]
/// );
/// ```
pub struct RippleList<T> {
    items: Vec<T>,
    equals: EqualsFn<T>,
    notifier: Notifier<T>,
}

impl<T> RippleList<T> {
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
            items: Vec::new(),
            equals,
            notifier: Notifier::new(),
        }
    }

    /// Create an empty list with at least the given capacity.
    pub fn with_capacity(capacity: usize) -> Self
    where
        T: PartialEq,
    {
        Self {
            items: Vec::with_capacity(capacity),
            equals: default_equals::<T>,
            notifier: Notifier::new(),
        }
    }

    /// Create a list holding the given elements. No events are published for
    /// the initial content.
    pub fn from_vec(items: Vec<T>) -> Self
    where
        T: PartialEq,
    {
        Self {
            items,
            equals: default_equals::<T>,
            notifier: Notifier::new(),
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
    /// The target is NOT pre-populated: only mutations made after
    /// construction propagate. Pre-seed the target yourself if it must start
    /// equal to `initial`. The returned id tears the mirror down via
    /// [`unsubscribe`](Self::unsubscribe).
    ///
    /// # Example
    ///
    /// ```
    /// use ripple_list::RippleList;
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    ///
    /// let target: Rc<RefCell<Vec<i32>>> = Rc::new(RefCell::new(Vec::new()));
    /// let (mut list, _mirror) = RippleList::with_mirror([1, 2], &target);
    ///
    /// assert!(target.borrow().is_empty(), "initial content is not mirrored");
    ///
    /// list.push(3).unwrap();
    /// assert_eq!(*target.borrow(), vec![3]);
    /// ```
    pub fn with_mirror<I, M>(initial: I, target: &Rc<std::cell::RefCell<M>>) -> (Self, SubscriptionId)
    where
        I: IntoIterator<Item = T>,
        M: MirrorTarget<T> + 'static,
        T: PartialEq + Clone + 'static,
    {
        let list = Self::from_iter(initial);
        let id = attach_mirror(&list, target);
        (list, id)
    }

    // =========================================================================
    // SUBSCRIPTIONS
    // =========================================================================

    /// Register an infallible callback for every future change event.
    /// Delivery order follows registration order.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ChangeEvent<T>) + 'static,
    {
        self.notifier.subscribe(callback)
    }

    /// Register a fallible callback. An `Err` return aborts delivery to
    /// later subscribers and surfaces from the mutating call (fail-fast).
    pub fn subscribe_fallible<F>(&self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ChangeEvent<T>) -> Result<(), ListError> + 'static,
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
        self.items.len()
    }

    /// True if the list contains no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current capacity of the backing storage.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Reserve room for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        self.items.reserve(additional);
    }

    /// Shrink the backing storage to fit the current length.
    pub fn shrink_to_fit(&mut self) {
        self.items.shrink_to_fit();
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Element at `index`, or `IndexOutOfRange` when `index >= len`.
    pub fn get(&self, index: usize) -> ListResult<&T> {
        self.items
            .get(index)
            .ok_or_else(|| ListError::out_of_range(index, self.items.len()))
    }

    /// First element, if any.
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// Last element, if any.
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// True if some element equals `value` under the list's equality.
    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }

    /// Index of the first element equal to `value`, if any.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.items.iter().position(|item| (self.equals)(item, value))
    }

    /// Index of the last element equal to `value`, if any.
    pub fn last_index_of(&self, value: &T) -> Option<usize> {
        self.items.iter().rposition(|item| (self.equals)(item, value))
    }

    /// First element satisfying the predicate.
    pub fn find<P: FnMut(&T) -> bool>(&self, mut predicate: P) -> Option<&T> {
        self.items.iter().find(|item| predicate(item))
    }

    /// Index of the first element satisfying the predicate.
    pub fn find_index<P: FnMut(&T) -> bool>(&self, mut predicate: P) -> Option<usize> {
        self.items.iter().position(|item| predicate(item))
    }

    /// Last element satisfying the predicate.
    pub fn find_last<P: FnMut(&T) -> bool>(&self, mut predicate: P) -> Option<&T> {
        self.items.iter().rev().find(|item| predicate(item))
    }

    /// Index of the last element satisfying the predicate.
    pub fn find_last_index<P: FnMut(&T) -> bool>(&self, mut predicate: P) -> Option<usize> {
        self.items.iter().rposition(|item| predicate(item))
    }

    /// True if any element satisfies the predicate.
    pub fn exists<P: FnMut(&T) -> bool>(&self, predicate: P) -> bool {
        self.find_index(predicate).is_some()
    }

    /// True if every element satisfies the predicate.
    pub fn true_for_all<P: FnMut(&T) -> bool>(&self, mut predicate: P) -> bool {
        self.items.iter().all(|item| predicate(item))
    }

    /// Copy of the `count` elements starting at `index`.
    pub fn get_range(&self, index: usize, count: usize) -> ListResult<Vec<T>>
    where
        T: Clone,
    {
        let end = self.range_end(index, count)?;
        Ok(self.items[index..end].to_vec())
    }

    /// Iterator over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// View of the elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        self.items.as_slice()
    }

    /// Copy of the elements.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.clone()
    }

    /// Consume the list, returning the backing storage. Subscriptions are
    /// dropped with the list.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Call `f` for each element in order.
    pub fn for_each<F: FnMut(&T)>(&self, mut f: F) {
        for item in &self.items {
            f(item);
        }
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Append `value` at the end. Publishes one `Added(value)` after the
    /// append is visible, so a failing subscriber leaves the element in
    /// place.
    pub fn push(&mut self, value: T) -> ListResult<()>
    where
        T: Clone,
    {
        let event = ChangeEvent::added(value.clone());
        self.items.push(value);
        self.notifier.publish(&event)
    }

    /// Append every value, preserving order, then publish one `Added` per
    /// value in insertion order.
    ///
    /// Not atomic with respect to observers: a callback re-reading the list
    /// between events sees all values already appended.
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) -> ListResult<()>
    where
        T: Clone,
    {
        let values: Vec<T> = values.into_iter().collect();
        self.items.extend(values.iter().cloned());
        for value in values {
            self.notifier.publish(&ChangeEvent::added(value))?;
        }
        Ok(())
    }

    /// Insert `value` at `index`, shifting later elements right. `index`
    /// may equal the length (append position). Publishes `Added(value)`
    /// after the insert.
    pub fn insert(&mut self, index: usize, value: T) -> ListResult<()>
    where
        T: Clone,
    {
        if index > self.items.len() {
            return Err(ListError::out_of_range(index, self.items.len()));
        }
        let event = ChangeEvent::added(value.clone());
        self.items.insert(index, value);
        self.notifier.publish(&event)
    }

    /// Insert every value at `index`, preserving order, then publish one
    /// `Added` per value in insertion order.
    pub fn insert_range<I: IntoIterator<Item = T>>(&mut self, index: usize, values: I) -> ListResult<()>
    where
        T: Clone,
    {
        if index > self.items.len() {
            return Err(ListError::out_of_range(index, self.items.len()));
        }
        let values: Vec<T> = values.into_iter().collect();
        self.items.splice(index..index, values.iter().cloned());
        for value in values {
            self.notifier.publish(&ChangeEvent::added(value))?;
        }
        Ok(())
    }

    /// Replace the slot at `index`.
    ///
    /// If the new value equals the old one (injected equality) the slot is
    /// still overwritten but nothing is published. Otherwise the replacement
    /// is decomposed for subscribers into `Removed(old)` - published while
    /// the old value still occupies the slot - then the overwrite, then
    /// `Added(new)`. Mirrors only understand add/remove primitives, so a
    /// replace must arrive as that pair, in that order.
    pub fn set(&mut self, index: usize, value: T) -> ListResult<()>
    where
        T: Clone,
    {
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or_else(|| ListError::out_of_range(index, len))?;

        if (self.equals)(slot, &value) {
            *slot = value;
            return Ok(());
        }

        let removed = ChangeEvent::removed(slot.clone());
        self.notifier.publish(&removed)?;
        self.items[index] = value.clone();
        self.notifier.publish(&ChangeEvent::added(value))
    }

    /// Remove the first element equal to `value`. Returns whether an
    /// element was removed; publishes `Removed` only on success, after the
    /// storage has shrunk.
    ///
    /// Removing an absent value is a no-op: `Ok(false)`, no event.
    pub fn remove(&mut self, value: &T) -> ListResult<bool> {
        match self.index_of(value) {
            Some(index) => {
                let removed = self.items.remove(index);
                self.notifier.publish(&ChangeEvent::removed(removed))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove the element at `index` and return it.
    ///
    /// `Removed(item)` is published before the storage shrinks, so a failing
    /// subscriber aborts the call with the element still in place.
    pub fn remove_at(&mut self, index: usize) -> ListResult<T>
    where
        T: Clone,
    {
        if index >= self.items.len() {
            return Err(ListError::out_of_range(index, self.items.len()));
        }
        let event = ChangeEvent::removed(self.items[index].clone());
        self.notifier.publish(&event)?;
        Ok(self.items.remove(index))
    }

    /// Remove the contiguous block of `count` elements starting at `index`.
    ///
    /// One `Removed` is published per element, in sequence order, all before
    /// the storage shrinks; a failing subscriber aborts the call with every
    /// element still in place.
    pub fn remove_range(&mut self, index: usize, count: usize) -> ListResult<()>
    where
        T: Clone,
    {
        let end = self.range_end(index, count)?;
        for item in &self.items[index..end] {
            self.notifier.publish(&ChangeEvent::removed(item.clone()))?;
        }
        self.items.drain(index..end);
        Ok(())
    }

    /// Remove every element satisfying the predicate, preserving the
    /// relative order of survivors. Publishes one `Removed` per removed
    /// element, after the storage has been rebuilt, and returns the removed
    /// count.
    pub fn remove_all<P: FnMut(&T) -> bool>(&mut self, mut predicate: P) -> ListResult<usize> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.items.len());
        for item in self.items.drain(..) {
            if predicate(&item) {
                removed.push(item);
            } else {
                kept.push(item);
            }
        }
        self.items = kept;

        let count = removed.len();
        for item in removed {
            self.notifier.publish(&ChangeEvent::removed(item))?;
        }
        Ok(count)
    }

    /// Remove every element. One `Removed` is published per element, in
    /// sequence order, all before the storage is emptied; a failing
    /// subscriber aborts the call with the content intact.
    pub fn clear(&mut self) -> ListResult<()>
    where
        T: Clone,
    {
        for item in &self.items {
            self.notifier.publish(&ChangeEvent::removed(item.clone()))?;
        }
        self.items.clear();
        Ok(())
    }

    // =========================================================================
    // IN-PLACE OPERATIONS (no notification side effects)
    // =========================================================================
    //
    // Reorderings and searches delegate straight to the backing storage.
    // The element multiset is unchanged, so no events fire.

    /// Reverse the element order.
    pub fn reverse(&mut self) {
        self.items.reverse();
    }

    /// Sort the elements.
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.items.sort();
    }

    /// Sort the elements with a comparator.
    pub fn sort_by<F: FnMut(&T, &T) -> std::cmp::Ordering>(&mut self, compare: F) {
        self.items.sort_by(compare);
    }

    /// Sort the elements by a key function.
    pub fn sort_by_key<K: Ord, F: FnMut(&T) -> K>(&mut self, f: F) {
        self.items.sort_by_key(f);
    }

    /// Binary search in a sorted list.
    pub fn binary_search(&self, value: &T) -> Result<usize, usize>
    where
        T: Ord,
    {
        self.items.binary_search(value)
    }

    /// Binary search with a comparator.
    pub fn binary_search_by<F: FnMut(&T) -> std::cmp::Ordering>(
        &self,
        compare: F,
    ) -> Result<usize, usize> {
        self.items.binary_search_by(compare)
    }

    // =========================================================================
    // INTERNAL
    // =========================================================================

    fn range_end(&self, index: usize, count: usize) -> ListResult<usize> {
        let len = self.items.len();
        match index.checked_add(count) {
            Some(end) if index <= len && end <= len => Ok(end),
            _ => Err(ListError::out_of_range(index.saturating_add(count), len)),
        }
    }
}

impl<T: PartialEq> Default for RippleList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for RippleList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RippleList")
            .field("items", &self.items)
            .field("subscribers", &self.notifier.subscriber_count())
            .finish()
    }
}

impl<T> Index<usize> for RippleList<T> {
    type Output = T;

    /// Panicking index access. For checked access, use `get()`.
    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a RippleList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorded(list: &RippleList<i32>) -> Rc<RefCell<Vec<ChangeEvent<i32>>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let handle = log.clone();
        list.subscribe(move |event| handle.borrow_mut().push(event.clone()));
        log
    }

    #[test]
    fn create_empty() {
        let list: RippleList<i32> = RippleList::new();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
    }

    #[test]
    fn from_vec_publishes_nothing() {
        let list = RippleList::from_vec(vec![1, 2, 3]);
        let log = recorded(&list);
        assert_eq!(list.len(), 3);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn push_appends_and_publishes() {
        let mut list = RippleList::new();
        let log = recorded(&list);
        list.push(7).unwrap();

        assert_eq!(list.as_slice(), &[7]);
        assert_eq!(*log.borrow(), vec![ChangeEvent::added(7)]);
    }

    #[test]
    fn insert_positions_and_bounds() {
        let mut list = RippleList::from_vec(vec![1, 3]);
        list.insert(1, 2).unwrap();
        list.insert(3, 4).unwrap(); // index == len is the append position
        assert_eq!(list.as_slice(), &[1, 2, 3, 4]);

        let err = list.insert(9, 0).unwrap_err();
        assert_eq!(err, ListError::IndexOutOfRange { index: 9, len: 4 });
    }

    #[test]
    fn insert_range_keeps_order() {
        let mut list = RippleList::from_vec(vec![1, 5]);
        let log = recorded(&list);
        list.insert_range(1, [2, 3, 4]).unwrap();

        assert_eq!(list.as_slice(), &[1, 2, 3, 4, 5]);
        assert_eq!(
            *log.borrow(),
            vec![
                ChangeEvent::added(2),
                ChangeEvent::added(3),
                ChangeEvent::added(4),
            ]
        );
    }

    #[test]
    fn set_equal_value_is_silent_but_overwrites() {
        // Equality by absolute value: -2 and 2 compare equal but differ.
        fn abs_equals(a: &i32, b: &i32) -> bool {
            a.abs() == b.abs()
        }

        let mut list = RippleList::new_with_equals(abs_equals);
        list.push(2).unwrap();
        let log = recorded(&list);

        list.set(0, -2).unwrap();
        assert_eq!(list.as_slice(), &[-2], "slot is overwritten even on equal");
        assert!(log.borrow().is_empty(), "no event for an equal replacement");
    }

    #[test]
    fn set_different_value_publishes_remove_then_add() {
        let mut list = RippleList::from_vec(vec![1, 2]);
        let log = recorded(&list);

        list.set(0, 9).unwrap();
        assert_eq!(list.as_slice(), &[9, 2]);
        assert_eq!(
            *log.borrow(),
            vec![ChangeEvent::removed(1), ChangeEvent::added(9)]
        );
    }

    #[test]
    fn set_out_of_range() {
        let mut list: RippleList<i32> = RippleList::new();
        let err = list.set(0, 1).unwrap_err();
        assert_eq!(err, ListError::IndexOutOfRange { index: 0, len: 0 });
    }

    #[test]
    fn remove_first_occurrence_only() {
        let mut list = RippleList::from_vec(vec![1, 2, 2]);
        let log = recorded(&list);

        assert!(list.remove(&2).unwrap());
        assert_eq!(list.as_slice(), &[1, 2], "the later duplicate survives");
        assert_eq!(*log.borrow(), vec![ChangeEvent::removed(2)]);
    }

    #[test]
    fn remove_absent_value_is_a_silent_no_op() {
        let mut list = RippleList::from_vec(vec![1]);
        let log = recorded(&list);

        assert!(!list.remove(&9).unwrap());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn remove_at_returns_element() {
        let mut list = RippleList::from_vec(vec![10, 20, 30]);
        assert_eq!(list.remove_at(1).unwrap(), 20);
        assert_eq!(list.as_slice(), &[10, 30]);

        let err = list.remove_at(2).unwrap_err();
        assert_eq!(err, ListError::IndexOutOfRange { index: 2, len: 2 });
    }

    #[test]
    fn remove_range_emits_in_sequence_order() {
        let mut list = RippleList::from_vec(vec![1, 2, 3, 4, 5]);
        let log = recorded(&list);

        list.remove_range(1, 3).unwrap();
        assert_eq!(list.as_slice(), &[1, 5]);
        assert_eq!(
            *log.borrow(),
            vec![
                ChangeEvent::removed(2),
                ChangeEvent::removed(3),
                ChangeEvent::removed(4),
            ]
        );

        let err = list.remove_range(1, 5).unwrap_err();
        assert_eq!(err, ListError::IndexOutOfRange { index: 6, len: 2 });
    }

    #[test]
    fn remove_all_returns_true_count_and_keeps_survivor_order() {
        let mut list = RippleList::from_vec(vec![1, 2, 3, 4, 5, 6]);
        let log = recorded(&list);

        let removed = list.remove_all(|&x| x % 2 == 0).unwrap();
        assert_eq!(removed, 3);
        assert_eq!(list.as_slice(), &[1, 3, 5]);
        assert_eq!(
            *log.borrow(),
            vec![
                ChangeEvent::removed(2),
                ChangeEvent::removed(4),
                ChangeEvent::removed(6),
            ]
        );
    }

    #[test]
    fn clear_emits_every_element_in_order() {
        let mut list = RippleList::from_vec(vec![9, 2]);
        let log = recorded(&list);

        list.clear().unwrap();
        assert!(list.is_empty());
        assert_eq!(
            *log.borrow(),
            vec![ChangeEvent::removed(9), ChangeEvent::removed(2)]
        );
    }

    #[test]
    fn queries_use_injected_equality() {
        fn abs_equals(a: &i32, b: &i32) -> bool {
            a.abs() == b.abs()
        }

        let mut list = RippleList::new_with_equals(abs_equals);
        list.extend([1, -2, 3]).unwrap();

        assert!(list.contains(&2));
        assert_eq!(list.index_of(&2), Some(1));
        assert_eq!(list.last_index_of(&-3), Some(2));
    }

    #[test]
    fn find_family() {
        let list = RippleList::from_vec(vec![1, 2, 3, 4]);
        assert_eq!(list.find(|&x| x > 2), Some(&3));
        assert_eq!(list.find_index(|&x| x > 2), Some(2));
        assert_eq!(list.find_last(|&x| x > 2), Some(&4));
        assert_eq!(list.find_last_index(|&x| x > 2), Some(3));
        assert!(list.exists(|&x| x == 4));
        assert!(!list.true_for_all(|&x| x < 4));
    }

    #[test]
    fn get_range_copies_block() {
        let list = RippleList::from_vec(vec![1, 2, 3, 4]);
        assert_eq!(list.get_range(1, 2).unwrap(), vec![2, 3]);
        assert!(list.get_range(3, 2).is_err());
        assert_eq!(list.get_range(4, 0).unwrap(), Vec::<i32>::new());
    }

    #[test]
    fn in_place_operations_publish_nothing() {
        let mut list = RippleList::from_vec(vec![3, 1, 2]);
        let log = recorded(&list);

        list.sort();
        assert_eq!(list.as_slice(), &[1, 2, 3]);
        list.reverse();
        assert_eq!(list.as_slice(), &[3, 2, 1]);
        list.sort_by(|a, b| a.cmp(b));
        assert_eq!(list.binary_search(&2), Ok(1));

        assert!(log.borrow().is_empty());
    }

    #[test]
    fn failing_subscriber_surfaces_from_the_mutation() {
        let mut list: RippleList<i32> = RippleList::new();
        list.subscribe_fallible(|_| Err(ListError::invariant("refused")));

        let err = list.push(1).unwrap_err();
        assert_eq!(err, ListError::invariant("refused"));
        // Append-family: the element is already in place when delivery fails.
        assert_eq!(list.as_slice(), &[1]);
    }

    #[test]
    fn failing_subscriber_aborts_remove_at_before_the_shrink() {
        let mut list = RippleList::from_vec(vec![1, 2]);
        list.subscribe_fallible(|_| Err(ListError::invariant("refused")));

        assert!(list.remove_at(0).is_err());
        // Remove-family emits before shrinking: the element is still there.
        assert_eq!(list.as_slice(), &[1, 2]);
    }

    #[test]
    fn index_and_iteration() {
        let list = RippleList::from_vec(vec![1, 2, 3]);
        assert_eq!(list[1], 2);
        let sum: i32 = (&list).into_iter().sum();
        assert_eq!(sum, 6);

        let mut collected = Vec::new();
        list.for_each(|&x| collected.push(x));
        assert_eq!(collected, vec![1, 2, 3]);
    }

    #[test]
    fn debug_format() {
        let list = RippleList::from_vec(vec![1, 2]);
        let debug = format!("{list:?}");
        assert!(debug.contains("RippleList"));
        assert!(debug.contains("[1, 2]"));
    }
}
