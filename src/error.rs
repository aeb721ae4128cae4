//! Error types for heap operations

use thiserror::Error;

/// Error type for heap operations
///
/// Every failing operation leaves the heap exactly as it was before the call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// `peek` or `delete` was called on a heap with no elements
    #[error("heap is empty")]
    Empty,

    /// `build_heap` was called on a heap that still holds elements
    #[error("bulk build requires an empty heap, found {len} elements")]
    NotEmpty { len: usize },

    /// The new key orders after the current key
    #[error("new key is worse than the current key under the heap ordering")]
    KeyNotDecreased,

    /// The handle is no longer valid (element was removed, heap was cleared,
    /// or the handle came from a different heap)
    #[error("handle does not refer to a live element of this heap")]
    StaleHandle,
}

/// A broken structural invariant, reported by
/// [`IndexedHeap::check_invariants`](crate::IndexedHeap::check_invariants)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("slot {index} orders before its parent")]
    HeapOrder { index: usize },

    #[error("slot {index} holds an element that records position {recorded}")]
    Position { index: usize, recorded: usize },

    #[error("slot {index} refers to no live entry")]
    DanglingSlot { index: usize },

    #[error("{slots} occupied slots but {entries} live entries")]
    Count { slots: usize, entries: usize },
}
