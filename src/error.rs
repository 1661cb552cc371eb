//! Error types.

use thiserror::Error;

/// The ways an operation on one of this crate's structures can be refused.
///
/// None of these is fatal: each is reported before any state is touched, so the
/// structure that returned it is still valid and usable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum HeapError {
    /// A top item was requested from a heap holding no items.
    #[error("the heap is empty")]
    EmptyHeap,
    /// A merge was asked for another item after every source ran dry.
    #[error("every merge source is exhausted")]
    Exhausted,
    /// A median was requested before any value had been added.
    #[error("no values have been observed")]
    EmptyStream,
    /// A top-k capacity was negative or could not be represented as a `usize`.
    #[error("top-k capacity must be a non-negative integer that fits in a usize")]
    CapacityMisuse,
}

/// A [`Result`](core::result::Result) defaulting to [`HeapError`].
pub type Result<T, E = HeapError> = core::result::Result<T, E>;
