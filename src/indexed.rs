//! Indexed binary heap with position-tracking handles
//!
//! An array-backed complete binary tree (0-indexed: children of slot `i` live
//! at `2i + 1` and `2i + 2`, its parent at `(i - 1) / 2`). Each stored element
//! owns an entry in a generational arena that records the slot it currently
//! occupies, so a [`HeapHandle`] can find its element in O(1) and
//! `decrease_key` runs in O(log n).
//!
//! # Time Complexity
//!
//! | Operation      | Complexity |
//! |----------------|------------|
//! | `insert`       | O(log n)   |
//! | `delete`       | O(log n)   |
//! | `peek`         | O(1)       |
//! | `decrease_key` | O(log n)   |
//! | `build_heap`   | O(n)       |
//! | `clear`        | O(n)       |
//!
//! # Handles
//!
//! Handles are generational arena keys tagged with the owning heap's id. Once
//! an element leaves the heap (`delete`, `pop`, `clear`) its arena generation
//! is retired, and every later lookup through the old handle reports it as
//! stale. Handles from another heap instance are rejected the same way.
//!
//! # Example
//!
//! ```rust
//! use indexed_heap::{HeapError, IndexedHeap};
//!
//! let mut heap = IndexedHeap::new();
//! let a = heap.insert(5, "a");
//! let _b = heap.insert(3, "b");
//!
//! heap.decrease_key(&a, 1).unwrap();
//! assert_eq!(heap.peek().unwrap().key(), &1);
//!
//! let removed = heap.delete().unwrap();
//! assert_eq!((removed.handle, removed.key, removed.value), (a, 1, "a"));
//! assert_eq!(heap.decrease_key(&a, 0), Err(HeapError::StaleHandle));
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use slotmap::{new_key_type, SlotMap};

use crate::compare::{Compare, NaturalOrder, ReverseOrder};
use crate::error::HeapError;
use crate::traits::{DecreaseKeyHeap, Handle, Heap};

new_key_type! {
    /// Arena key for a heap entry
    pub(crate) struct EntryKey;
}

static NEXT_HEAP_ID: AtomicU64 = AtomicU64::new(0);

/// Handle to an element in an [`IndexedHeap`]
///
/// Returned by [`IndexedHeap::insert`] and [`IndexedHeap::build_heap`]. The
/// element's key, value and position are read through the heap that issued
/// the handle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct HeapHandle {
    heap_id: u64,
    entry: EntryKey,
}

impl Handle for HeapHandle {}

#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    /// Slot currently holding this entry
    pub(crate) position: usize,
}

/// Borrowed view of one element stored in the heap
#[derive(Debug)]
pub struct Element<'a, K, V> {
    handle: HeapHandle,
    key: &'a K,
    value: &'a V,
    position: usize,
}

impl<'a, K, V> Element<'a, K, V> {
    pub fn handle(&self) -> HeapHandle {
        self.handle
    }

    pub fn key(&self) -> &'a K {
        self.key
    }

    pub fn value(&self) -> &'a V {
        self.value
    }

    /// Storage slot of the element (0 is the root)
    pub fn position(&self) -> usize {
        self.position
    }
}

/// An element taken out of the heap by [`IndexedHeap::delete`]
///
/// `handle` is the handle the element was inserted under; it no longer
/// refers to anything in the heap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed<K, V> {
    pub handle: HeapHandle,
    pub key: K,
    pub value: V,
}

impl<K, V> Removed<K, V> {
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// Indexed binary heap
///
/// Ordered by the comparator `C`; the element that compares smallest sits at
/// the root. With the default [`NaturalOrder`] this is a min-heap, with
/// [`ReverseOrder`] a max-heap.
///
/// # Example
///
/// ```rust
/// use indexed_heap::IndexedHeap;
///
/// let mut heap = IndexedHeap::new();
/// let handles = heap.build_heap(vec!["z", "a", "m"], vec![1, 2, 3]).unwrap();
/// assert_eq!(heap.peek().unwrap().key(), &"a");
/// assert_eq!(heap.key(&handles[0]), Some(&"z"));
/// ```
#[derive(Debug)]
pub struct IndexedHeap<K, V, C = NaturalOrder> {
    pub(crate) id: u64,
    pub(crate) entries: SlotMap<EntryKey, Entry<K, V>>,
    /// Heap-ordered slots; `slots[i]` is the entry at position `i`
    pub(crate) slots: Vec<EntryKey>,
    pub(crate) cmp: C,
}

impl<K: Ord, V> IndexedHeap<K, V> {
    /// Creates an empty min-heap ordered by `K`'s `Ord` implementation
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, NaturalOrder)
    }
}

impl<K: Ord, V> IndexedHeap<K, V, ReverseOrder> {
    /// Creates an empty max-heap ordered by `K`'s `Ord` implementation
    pub fn new_max() -> Self {
        Self::with_comparator(ReverseOrder)
    }
}

impl<K: Ord, V> Default for IndexedHeap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Compare<K>> IndexedHeap<K, V, C> {
    /// Creates an empty heap ordered by `cmp`
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_capacity_and_comparator(0, cmp)
    }

    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        Self {
            id: NEXT_HEAP_ID.fetch_add(1, AtomicOrdering::Relaxed),
            entries: SlotMap::with_capacity_and_key(capacity),
            slots: Vec::with_capacity(capacity),
            cmp,
        }
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the root element without removing it
    ///
    /// # Errors
    /// [`HeapError::Empty`] if the heap has no elements.
    pub fn peek(&self) -> Result<Element<'_, K, V>, HeapError> {
        let entry = *self.slots.first().ok_or(HeapError::Empty)?;
        Ok(self.element(entry))
    }

    /// Returns the handle of the root element
    pub fn peek_handle(&self) -> Result<HeapHandle, HeapError> {
        self.peek().map(|element| element.handle)
    }

    /// Inserts an element and returns a handle for later `decrease_key` calls
    pub fn insert(&mut self, key: K, value: V) -> HeapHandle {
        let position = self.slots.len();
        let entry = self.entries.insert(Entry {
            key,
            value,
            position,
        });
        self.slots.push(entry);
        self.sift_up(position);
        self.handle(entry)
    }

    /// Removes the root element and returns it together with its handle
    ///
    /// The returned handle is already stale: `position` reports `None` and
    /// `decrease_key` rejects it.
    ///
    /// # Errors
    /// [`HeapError::Empty`] if the heap has no elements.
    pub fn delete(&mut self) -> Result<Removed<K, V>, HeapError> {
        if self.slots.is_empty() {
            return Err(HeapError::Empty);
        }

        // Moves the last slot into the root
        let top = self.slots.swap_remove(0);
        if let Some(&moved) = self.slots.first() {
            self.entries[moved].position = 0;
            self.sift_down(0);
        }

        let Entry { key, value, .. } = self
            .entries
            .remove(top)
            .expect("every occupied slot refers to a live entry");
        Ok(Removed {
            handle: self.handle(top),
            key,
            value,
        })
    }

    /// Removes the root element, or returns `None` if the heap is empty
    pub fn pop(&mut self) -> Option<(K, V)> {
        self.delete().ok().map(Removed::into_pair)
    }

    /// Bulk-builds the heap from parallel key and value sequences in O(n)
    ///
    /// Pairs `keys[i]` with `values[i]` up to the shorter of the two inputs.
    /// The returned handles are index-aligned with the inputs, wherever the
    /// elements end up after heapify.
    ///
    /// # Errors
    /// [`HeapError::NotEmpty`] if the heap already holds elements. The heap
    /// is not cleared; call [`clear`](Self::clear) first to rebuild.
    pub fn build_heap<IK, IV>(&mut self, keys: IK, values: IV) -> Result<Vec<HeapHandle>, HeapError>
    where
        IK: IntoIterator<Item = K>,
        IV: IntoIterator<Item = V>,
    {
        if !self.is_empty() {
            tracing::debug!(len = self.len(), "build_heap rejected on non-empty heap");
            return Err(HeapError::NotEmpty { len: self.len() });
        }
        Ok(self.heapify(keys.into_iter().zip(values)))
    }

    /// Replaces the key of a live element with one that is not worse under
    /// the heap's ordering, then restores heap order toward the root
    ///
    /// On a max-heap ([`ReverseOrder`]) this raises the key.
    ///
    /// # Errors
    /// - [`HeapError::StaleHandle`] if the element was removed, the heap was
    ///   cleared, or the handle was issued by another heap
    /// - [`HeapError::KeyNotDecreased`] if `new_key` orders after the current key
    ///
    /// A stale handle is reported as `StaleHandle` whatever `new_key` is.
    pub fn decrease_key(&mut self, handle: &HeapHandle, new_key: K) -> Result<(), HeapError> {
        let entry = self.live_entry(handle)?;
        let current = &self.entries[entry];
        if self.cmp.precedes(&current.key, &new_key) {
            tracing::debug!(position = current.position, "decrease_key rejected: key not decreased");
            return Err(HeapError::KeyNotDecreased);
        }

        let position = current.position;
        self.entries[entry].key = new_key;
        self.sift_up(position);
        Ok(())
    }

    /// Removes every element; all outstanding handles become stale
    pub fn clear(&mut self) {
        tracing::trace!(len = self.len(), "clearing heap");
        self.slots.clear();
        self.entries.clear();
    }

    pub fn contains(&self, handle: &HeapHandle) -> bool {
        self.live_entry(handle).is_ok()
    }

    /// Returns a view of the element behind `handle`, if it is still live
    pub fn get(&self, handle: &HeapHandle) -> Option<Element<'_, K, V>> {
        self.live_entry(handle).ok().map(|entry| self.element(entry))
    }

    pub fn key(&self, handle: &HeapHandle) -> Option<&K> {
        self.get(handle).map(|element| element.key)
    }

    pub fn value(&self, handle: &HeapHandle) -> Option<&V> {
        self.get(handle).map(|element| element.value)
    }

    /// Mutable access to the payload; keys only change through `decrease_key`
    pub fn value_mut(&mut self, handle: &HeapHandle) -> Option<&mut V> {
        let entry = self.live_entry(handle).ok()?;
        Some(&mut self.entries[entry].value)
    }

    /// Current slot of the element, or `None` once it has left the heap
    pub fn position(&self, handle: &HeapHandle) -> Option<usize> {
        self.get(handle).map(|element| element.position)
    }

    /// Iterates over elements in storage order (slot 0 first)
    ///
    /// Only the first element is guaranteed to be the top; the rest follow
    /// the tree layout, not priority order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Element<'_, K, V>> + '_ {
        self.slots.iter().map(move |&entry| self.element(entry))
    }

    /// Removes elements in priority order, top first
    pub fn drain_sorted(&mut self) -> DrainSorted<'_, K, V, C> {
        DrainSorted { heap: self }
    }

    /// Consumes the heap, returning its pairs in priority order
    pub fn into_sorted_vec(mut self) -> Vec<(K, V)> {
        let mut sorted = Vec::with_capacity(self.len());
        sorted.extend(self.drain_sorted());
        sorted
    }

    fn handle(&self, entry: EntryKey) -> HeapHandle {
        HeapHandle {
            heap_id: self.id,
            entry,
        }
    }

    fn element(&self, entry: EntryKey) -> Element<'_, K, V> {
        let e = &self.entries[entry];
        Element {
            handle: self.handle(entry),
            key: &e.key,
            value: &e.value,
            position: e.position,
        }
    }

    fn live_entry(&self, handle: &HeapHandle) -> Result<EntryKey, HeapError> {
        if handle.heap_id != self.id {
            return Err(HeapError::StaleHandle);
        }
        match self.entries.get(handle.entry) {
            Some(e) if self.slots.get(e.position) == Some(&handle.entry) => Ok(handle.entry),
            _ => Err(HeapError::StaleHandle),
        }
    }

    /// Appends pairs in input order and restores heap order bottom-up
    fn heapify(&mut self, pairs: impl Iterator<Item = (K, V)>) -> Vec<HeapHandle> {
        let heap_id = self.id;
        let mut handles = Vec::with_capacity(pairs.size_hint().0);
        for (key, value) in pairs {
            let position = self.slots.len();
            let entry = self.entries.insert(Entry {
                key,
                value,
                position,
            });
            self.slots.push(entry);
            handles.push(HeapHandle { heap_id, entry });
        }

        // Leaves are trivially heaps; start from the last internal node
        for index in (0..self.slots.len() / 2).rev() {
            self.sift_down(index);
        }
        tracing::trace!(len = handles.len(), "heap built");
        handles
    }

    #[inline]
    fn precedes(&self, a: usize, b: usize) -> bool {
        self.cmp.precedes(
            &self.entries[self.slots[a]].key,
            &self.entries[self.slots[b]].key,
        )
    }

    /// Swaps two slots and keeps both entries' recorded positions in sync
    #[inline]
    fn swap_slots(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
        let (entry_a, entry_b) = (self.slots[a], self.slots[b]);
        self.entries[entry_a].position = a;
        self.entries[entry_b].position = b;
    }

    /// Move element at index up to maintain heap property
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.precedes(index, parent) {
                self.swap_slots(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move element at index down to maintain heap property
    fn sift_down(&mut self, mut index: usize) {
        let len = self.slots.len();
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let preferred = if right < len && self.precedes(right, left) {
                right
            } else {
                left
            };

            if !self.precedes(preferred, index) {
                break;
            }
            self.swap_slots(index, preferred);
            index = preferred;
        }
    }
}

/// Draining iterator returned by [`IndexedHeap::drain_sorted`]
///
/// Elements not consumed before the iterator is dropped stay in the heap.
#[derive(Debug)]
pub struct DrainSorted<'a, K, V, C: Compare<K>> {
    heap: &'a mut IndexedHeap<K, V, C>,
}

impl<K, V, C: Compare<K>> Iterator for DrainSorted<'_, K, V, C> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.heap.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.heap.len();
        (len, Some(len))
    }
}

impl<K, V, C: Compare<K>> ExactSizeIterator for DrainSorted<'_, K, V, C> {}

impl<K, V, C: Compare<K>> FusedIterator for DrainSorted<'_, K, V, C> {}

/// Renders `[ (key,value,position), ... ]` in storage order; `[]` when empty
impl<K: fmt::Display, V: fmt::Display, C: Compare<K>> fmt::Display for IndexedHeap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("[]");
        }
        f.write_str("[ ")?;
        for (i, element) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "({},{},{})", element.key, element.value, element.position)?;
        }
        f.write_str(" ]")
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for IndexedHeap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut heap = IndexedHeap::new();
        heap.heapify(iter.into_iter());
        heap
    }
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for IndexedHeap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, C: Compare<K>> Heap<K, V> for IndexedHeap<K, V, C> {
    fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn push(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn peek(&self) -> Option<(&K, &V)> {
        IndexedHeap::peek(self)
            .ok()
            .map(|element| (element.key, element.value))
    }

    fn pop(&mut self) -> Option<(K, V)> {
        IndexedHeap::pop(self)
    }
}

impl<K, V, C: Compare<K>> DecreaseKeyHeap<K, V> for IndexedHeap<K, V, C> {
    type Handle = HeapHandle;

    fn push_with_handle(&mut self, key: K, value: V) -> HeapHandle {
        self.insert(key, value)
    }

    fn decrease_key(&mut self, handle: &HeapHandle, new_key: K) -> Result<(), HeapError> {
        IndexedHeap::decrease_key(self, handle, new_key)
    }
}
