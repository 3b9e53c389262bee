// ============================================================================
// ripple-list - Mirror Attachment
// Subscriptions that replay change deltas onto a caller-owned target
// ============================================================================

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::{Arc, Mutex, PoisonError, Weak as SyncWeak};

use tracing::warn;

use crate::core::{ChangeEvent, ChangeKind, ListError, SubscriptionId};
use crate::list::{RippleList, SyncRippleList};
use crate::mirror::MirrorTarget;

// =============================================================================
// ATTACH (single-threaded)
// =============================================================================

/// Subscribe a delta-replaying mirror of `list` onto `target`.
///
/// Each `Added` event appends a clone of the item to the target; each
/// `Removed` event removes the first content-equal occurrence. The target is
/// held through a `Weak` handle: the subscription never keeps it alive, and
/// the caller keeps the right to mutate it directly - though doing so breaks
/// the best-effort multiset equality and is the caller's responsibility.
///
/// Delivery failures surface as `InvariantViolation` from the mutating call:
/// either the target was dropped while subscribed, or a removal delta found
/// no matching element (the target was mutated externally).
///
/// The returned id tears the mirror down via `list.unsubscribe(id)`.
pub fn attach_mirror<T, M>(list: &RippleList<T>, target: &Rc<RefCell<M>>) -> SubscriptionId
where
    T: Clone + 'static,
    M: MirrorTarget<T> + 'static,
{
    let handle: Weak<RefCell<M>> = Rc::downgrade(target);
    list.subscribe_fallible(move |event| {
        let Some(target) = handle.upgrade() else {
            warn!("mirror target dropped while subscription active");
            return Err(ListError::invariant(
                "mirror target dropped while subscription active",
            ));
        };
        apply(&mut *target.borrow_mut(), event)
    })
}

// =============================================================================
// ATTACH (thread-safe)
// =============================================================================

/// [`attach_mirror`] for the lock-guarded list variant.
///
/// The target is locked per delta, independently of the list's own locks.
/// The target must not be another handle to the same list (callbacks must
/// not re-enter the firing container).
pub fn attach_sync_mirror<T, M>(
    list: &SyncRippleList<T>,
    target: &Arc<Mutex<M>>,
) -> SubscriptionId
where
    T: Clone + Send + 'static,
    M: MirrorTarget<T> + Send + 'static,
{
    let handle: SyncWeak<Mutex<M>> = Arc::downgrade(target);
    list.subscribe_fallible(move |event| {
        let Some(target) = handle.upgrade() else {
            warn!("mirror target dropped while subscription active");
            return Err(ListError::invariant(
                "mirror target dropped while subscription active",
            ));
        };
        let mut target = target.lock().unwrap_or_else(PoisonError::into_inner);
        apply(&mut *target, event)
    })
}

// =============================================================================
// DELTA APPLICATION
// =============================================================================

fn apply<T: Clone, M: MirrorTarget<T> + ?Sized>(
    target: &mut M,
    event: &ChangeEvent<T>,
) -> Result<(), ListError> {
    match event.kind {
        ChangeKind::Added => {
            target.append(event.item.clone());
            Ok(())
        }
        ChangeKind::Removed => {
            if target.remove_first_equal(&event.item) {
                Ok(())
            } else {
                warn!("removal delta found no matching element in mirror target");
                Err(ListError::invariant(
                    "removal delta found no matching element in mirror target",
                ))
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
