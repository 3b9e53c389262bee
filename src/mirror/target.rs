// ============================================================================
// ripple-list - Mirror Targets
// The minimal surface a caller-owned collection needs for delta replay
// ============================================================================

use std::collections::VecDeque;

/// A mutable collection that change deltas can be replayed onto.
///
/// The target stays owned by the caller; a mirror subscription only holds a
/// non-owning handle to it. `Added` deltas arrive as [`append`], `Removed`
/// deltas as [`remove_first_equal`].
///
/// Implementations for `Vec` and `VecDeque` are provided; anything else a
/// caller wants mirrored (an index, a UI row model) implements these two
/// methods.
///
/// [`append`]: MirrorTarget::append
/// [`remove_first_equal`]: MirrorTarget::remove_first_equal
pub trait MirrorTarget<T> {
    /// Add `item` at the end of the collection.
    fn append(&mut self, item: T);

    /// Remove the first element content-equal to `item`. Returns whether an
    /// element was removed; `false` signals divergence to the mirror.
    fn remove_first_equal(&mut self, item: &T) -> bool;
}

impl<T: PartialEq> MirrorTarget<T> for Vec<T> {
    fn append(&mut self, item: T) {
        self.push(item);
    }

    fn remove_first_equal(&mut self, item: &T) -> bool {
        match self.iter().position(|candidate| candidate == item) {
            Some(index) => {
                self.remove(index);
                true
            }
            None => false,
        }
    }
}

impl<T: PartialEq> MirrorTarget<T> for VecDeque<T> {
    fn append(&mut self, item: T) {
        self.push_back(item);
    }

    fn remove_first_equal(&mut self, item: &T) -> bool {
        match self.iter().position(|candidate| candidate == item) {
            Some(index) => {
                self.remove(index);
                true
            }
            None => false,
        }
    }
}
