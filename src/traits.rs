//! Common traits for heap data structures
//!
//! This module provides a two-tier trait hierarchy:
//!
//! - [`Heap`]: Base trait for a priority queue of (key, value) pairs
//! - [`DecreaseKeyHeap`]: Extended trait adding `decrease_key` and handle-based operations
//!
//! Generic algorithms (for example a Dijkstra frontier) can be written against
//! these traits instead of a concrete heap type.

use crate::error::HeapError;

/// A handle to an element in the heap, used for decrease_key operations
///
/// This is an opaque type that identifies a specific element in the heap.
pub trait Handle: Clone + PartialEq + Eq {}

/// Base trait for heap/priority queue data structures
///
/// This trait provides a simple API similar to Rust's `BinaryHeap`:
/// - `push` inserts an element (returns `()`)
/// - `pop` removes and returns the top element
/// - `peek` returns the top element without removing it
///
/// Unlike `BinaryHeap` which stores values directly, these heaps store
/// (key, value) pairs to separate the ordering key from the payload.
///
/// # Example
///
/// ```rust
/// use indexed_heap::{Heap, IndexedHeap};
///
/// let mut heap = IndexedHeap::new();
/// Heap::push(&mut heap, 3, "three");
/// Heap::push(&mut heap, 1, "one");
///
/// assert_eq!(Heap::peek(&heap), Some((&1, &"one")));
/// assert_eq!(Heap::pop(&mut heap), Some((1, "one")));
/// ```
pub trait Heap<K, V> {
    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given key
    fn push(&mut self, key: K, value: V);

    /// Returns the top key and associated value without removing it
    fn peek(&self) -> Option<(&K, &V)>;

    /// Removes and returns the top key and associated value
    fn pop(&mut self) -> Option<(K, V)>;
}

/// Extended heap trait with `decrease_key` support
///
/// - `push_with_handle` returns a handle that can be used with `decrease_key`
/// - `decrease_key` moves an element toward the root after improving its key
pub trait DecreaseKeyHeap<K, V>: Heap<K, V> {
    /// The handle type for this heap, used to reference elements for decrease_key
    type Handle: Handle;

    /// Inserts an element with the given key, returning a handle
    fn push_with_handle(&mut self, key: K, value: V) -> Self::Handle;

    /// Replaces the key of the element identified by the handle with a key
    /// that is not worse under the heap's ordering
    ///
    /// # Errors
    /// - [`HeapError::StaleHandle`] if the element is no longer in this heap
    /// - [`HeapError::KeyNotDecreased`] if the new key orders after the current one
    fn decrease_key(&mut self, handle: &Self::Handle, new_key: K) -> Result<(), HeapError>;
}
