//! Indexed Binary Heap for Rust
//!
//! This crate provides an array-backed binary heap whose elements are tracked
//! by handles, so a stored element's key can be decreased in O(log n) even as
//! the heap reorders itself.
//!
//! # Features
//!
//! - **O(log n)** insert, delete-top and `decrease_key`; **O(1)** peek
//! - **O(n)** bulk construction with bottom-up heapify ([`IndexedHeap::build_heap`])
//! - **Generational handles**: using a handle after its element left the heap is
//!   detected in O(1) and reported as [`HeapError::StaleHandle`]
//! - **Pluggable ordering** through [`Compare`]: min-heap by default,
//!   [`ReverseOrder`] for a max-heap, or any closure via [`FnComparator`]
//!
//! # Example
//!
//! ```rust
//! use indexed_heap::IndexedHeap;
//!
//! let mut heap = IndexedHeap::new();
//! let handle1 = heap.insert(5, "item1");
//! let _handle2 = heap.insert(3, "item2");
//! heap.decrease_key(&handle1, 1).unwrap();
//!
//! let top = heap.peek().unwrap();
//! assert_eq!((top.key(), top.value()), (&1, &"item1"));
//! ```

pub mod compare;
pub mod error;
pub mod indexed;
pub mod traits;
mod validate;

pub use compare::{Compare, FnComparator, NaturalOrder, ReverseOrder};
pub use error::{HeapError, InvariantViolation};
pub use indexed::{DrainSorted, Element, HeapHandle, IndexedHeap, Removed};
pub use traits::{DecreaseKeyHeap, Handle, Heap};
