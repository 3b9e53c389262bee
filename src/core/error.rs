// ============================================================================
// ripple-list - Error Types
// ============================================================================

use thiserror::Error;

/// Errors surfaced by list operations and subscriber delivery.
///
/// Nothing is swallowed or retried internally: every error propagates to the
/// immediate caller of the operation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// An index-based access or mutation fell outside its valid bound.
    ///
    /// Reads and removals require `index < len`; insertions allow
    /// `index == len`. `len` is the list length observed at the time of the
    /// call.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The list length at the time of the call.
        len: usize,
    },

    /// A subscriber observed an inconsistency it cannot reconcile.
    ///
    /// Raised by mirror subscriptions when the target collection was dropped
    /// while subscribed, or when a removal delta finds no matching element in
    /// the target (the target was mutated externally). Reported instead of
    /// diverging silently; the caller decides whether to detach the mirror,
    /// rebuild the target, or give up.
    #[error("invariant violation: {reason}")]
    InvariantViolation {
        /// Description of the inconsistency.
        reason: String,
    },
}

impl ListError {
    /// Out-of-range error for `index` against a list of length `len`.
    pub(crate) fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Invariant-violation error with the given reason.
    pub(crate) fn invariant(reason: impl Into<String>) -> Self {
        Self::InvariantViolation {
            reason: reason.into(),
        }
    }

    /// True if retrying the failed operation can possibly succeed.
    ///
    /// Index errors are deterministic for an unchanged list; invariant
    /// violations can clear once the caller repairs the mirror target.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::IndexOutOfRange { .. } => false,
            Self::InvariantViolation { .. } => true,
        }
    }
}

/// Convenience alias for results carrying a [`ListError`].
pub type ListResult<T> = Result<T, ListError>;
