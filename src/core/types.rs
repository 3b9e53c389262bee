// ============================================================================
// ripple-list - Core Types
// Change events, injectable equality, subscription identity
// ============================================================================

// =============================================================================
// EQUALITY
// =============================================================================

/// Equality function used to decide whether two values are the same element.
///
/// Drives `remove`, the `set` replace-vs-noop decision, `contains`/`index_of`,
/// and mirror delta application. Must be total: any two values compare to a
/// definite answer.
pub type EqualsFn<T> = fn(&T, &T) -> bool;

/// Default equality using `PartialEq`.
///
/// # Example
/// ```
/// use ripple_list::default_equals;
///
/// assert!(default_equals(&42, &42));
/// assert!(!default_equals(&42, &43));
/// ```
pub fn default_equals<T: PartialEq>(a: &T, b: &T) -> bool {
    a == b
}

/// Never equal - every value is distinct from every other, including itself.
///
/// Makes `set` always emit a remove/add pair and `remove` never match.
pub fn never_equals<T>(_a: &T, _b: &T) -> bool {
    false
}

/// Always equal - every value matches.
///
/// Makes `set` a silent overwrite and `remove` take the first element.
pub fn always_equals<T>(_a: &T, _b: &T) -> bool {
    true
}

// =============================================================================
// CHANGE EVENTS
// =============================================================================

/// What happened to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// The element was inserted into the list.
    Added,
    /// The element was removed from the list.
    Removed,
}

/// A single element-level change.
///
/// One event is published per affected element, in element order. Events are
/// ephemeral: constructed, handed to every current subscriber by reference,
/// then dropped. The list never stores them.
///
/// A replacement via `set` is decomposed into `Removed(old)` followed by
/// `Added(new)`; subscribers never see an atomic swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent<T> {
    /// Whether the element entered or left the list.
    pub kind: ChangeKind,
    /// The affected value.
    pub item: T,
}

impl<T> ChangeEvent<T> {
    /// Event for an element entering the list.
    pub fn added(item: T) -> Self {
        Self {
            kind: ChangeKind::Added,
            item,
        }
    }

    /// Event for an element leaving the list.
    pub fn removed(item: T) -> Self {
        Self {
            kind: ChangeKind::Removed,
            item,
        }
    }

    /// True if this is an `Added` event.
    pub fn is_added(&self) -> bool {
        self.kind == ChangeKind::Added
    }

    /// True if this is a `Removed` event.
    pub fn is_removed(&self) -> bool {
        self.kind == ChangeKind::Removed
    }
}

// =============================================================================
// SUBSCRIPTION IDENTITY
// =============================================================================

/// Handle returned by `subscribe`, usable to unsubscribe later.
///
/// Ids are unique per notifier for its lifetime and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

// =============================================================================
// TESTS
// =============================================================================
