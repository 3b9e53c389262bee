// ============================================================================
// ripple-list - Core Module
// Value types and errors shared by every other module
// ============================================================================

pub mod error;
pub mod types;

pub use error::{ListError, ListResult};
pub use types::{
    always_equals, default_equals, never_equals, ChangeEvent, ChangeKind, EqualsFn, SubscriptionId,
};
