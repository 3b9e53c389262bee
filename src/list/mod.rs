// ============================================================================
// ripple-list - List Module
// The observable list, in single-threaded and lock-guarded variants
// ============================================================================
//
// The concurrency mode is a construction-time choice between two types with
// the same contract, not a runtime flag: pick `RippleList` for a
// single-threaded owner, `SyncRippleList` to share across threads.

pub mod sync;
pub mod unsync;

pub use sync::SyncRippleList;
pub use unsync::RippleList;
