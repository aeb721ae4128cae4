//! Key ordering capability
//!
//! The heap never calls `<` on keys directly. It asks a [`Compare`] value,
//! so the same sift algorithms serve min-heaps ([`NaturalOrder`]), max-heaps
//! ([`ReverseOrder`]) and any caller-defined total order ([`FnComparator`]).
//!
//! `Ordering::Less` always means "closer to the root".

use std::cmp::Ordering;
use std::fmt;

/// A total order over keys of type `K`
pub trait Compare<K: ?Sized> {
    /// Compares two keys; `Less` means `a` belongs nearer the root than `b`
    fn compare(&self, a: &K, b: &K) -> Ordering;

    /// Returns true if `a` strictly improves on `b`
    #[inline]
    fn precedes(&self, a: &K, b: &K) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

/// The key type's own `Ord` implementation (min-heap)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Compare<K> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// The inverse of the key type's `Ord` implementation (max-heap)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReverseOrder;

impl<K: Ord + ?Sized> Compare<K> for ReverseOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        b.cmp(a)
    }
}

/// Adapts a closure `Fn(&K, &K) -> Ordering` into a [`Compare`]
///
/// ```rust
/// use indexed_heap::{FnComparator, IndexedHeap};
///
/// // Order strings by length, shortest first
/// let by_len = FnComparator::new(|a: &String, b: &String| a.len().cmp(&b.len()));
/// let mut heap = IndexedHeap::with_comparator(by_len);
/// heap.insert("three".to_string(), 3);
/// heap.insert("a".to_string(), 1);
/// assert_eq!(heap.peek().unwrap().key(), "a");
/// ```
#[derive(Clone, Copy)]
pub struct FnComparator<F>(F);

impl<F> FnComparator<F> {
    pub fn new(f: F) -> Self {
        FnComparator(f)
    }
}

impl<F> fmt::Debug for FnComparator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnComparator").finish_non_exhaustive()
    }
}

impl<K: ?Sized, F> Compare<K> for FnComparator<F>
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.0)(a, b)
    }
}
