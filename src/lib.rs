// ============================================================================
// ripple-list - An Observable List with Mirrors
// ============================================================================
//
// An insertion-ordered list that publishes one change event per affected
// element, in element order, to subscribers registered against the instance.
// Comes in two variants with the same contract: `RippleList` for a
// single-threaded owner and `SyncRippleList` behind a coarse-grained lock.
// A mirror subscription replays the event stream onto a second, caller-owned
// collection to keep its element multiset in step with the source.
// ============================================================================

//! Observable lists whose changes ripple out to subscribers and mirrors.
//!
//! ```
//! use ripple_list::{ChangeKind, RippleList};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let mut list = RippleList::new();
//!
//! // A caller-owned target kept in step by replaying change deltas.
//! let target: Rc<RefCell<Vec<i32>>> = Rc::new(RefCell::new(Vec::new()));
//! ripple_list::attach_mirror(&list, &target);
//!
//! list.push(1)?;
//! list.push(2)?;
//! list.set(0, 9)?; // subscribers see Removed(1) then Added(9)
//!
//! assert_eq!(list.as_slice(), &[9, 2]);
//! assert_eq!(*target.borrow(), vec![2, 9]);
//! # Ok::<(), ripple_list::ListError>(())
//! ```

pub mod core;
pub mod list;
pub mod mirror;
pub mod notify;

// Re-export the public surface at the crate root for ergonomic access.
// (`self::` keeps the local `core` module from clashing with the `core`
// crate in the extern prelude.)
pub use self::core::error::{ListError, ListResult};
pub use self::core::types::{
    always_equals, default_equals, never_equals, ChangeEvent, ChangeKind, EqualsFn, SubscriptionId,
};
pub use list::sync::SyncRippleList;
pub use list::unsync::RippleList;
pub use mirror::attach::{attach_mirror, attach_sync_mirror};
pub use mirror::target::MirrorTarget;
pub use notify::sync::{SyncNotifier, SyncSubscriberFn};
pub use notify::unsync::{Notifier, SubscriberFn};

// =============================================================================
// TESTS
// =============================================================================
