// ============================================================================
// ripple-list - Mirror Module
// Keeping a second, caller-owned collection in step with a list
// ============================================================================
//
// A mirror is a subscription that replays each change delta onto a target
// collection the caller owns. It tracks future deltas only: attaching never
// copies existing content into the target. Provided no third party mutates
// the target, the target's element multiset ends up equal to the source's
// after any run of source-only mutations.

pub mod attach;
pub mod target;

pub use attach::{attach_mirror, attach_sync_mirror};
pub use target::MirrorTarget;
