// ============================================================================
// ripple-list - Notification Module
// Ordered synchronous fan-out, in single-threaded and thread-safe flavors
// ============================================================================

pub mod sync;
pub mod unsync;

pub use sync::{SyncNotifier, SyncSubscriberFn};
pub use unsync::{Notifier, SubscriberFn};
