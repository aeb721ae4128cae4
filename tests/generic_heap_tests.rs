//! Generic comprehensive tests written against the heap traits
//!
//! The helpers only use the `Heap` / `DecreaseKeyHeap` interface, and each
//! one is run against heaps built with different comparators and capacities.

use indexed_heap::{DecreaseKeyHeap, FnComparator, HeapError, IndexedHeap};
use std::cmp::Ordering;

// Test helpers that work with any DecreaseKeyHeap implementation

/// Test that empty heap behaves correctly
fn test_empty_heap<H: DecreaseKeyHeap<i32, String>>(mut heap: H) {
    assert!(heap.is_empty());
    assert_eq!(heap.len(), 0);
    assert_eq!(heap.peek(), None);
    assert_eq!(heap.pop(), None);
}

/// Test basic insert and pop operations
fn test_basic_operations<H: DecreaseKeyHeap<i32, &'static str>>(mut heap: H) {
    heap.push(5, "five");
    heap.push(1, "one");
    heap.push(10, "ten");
    heap.push(3, "three");

    assert!(!heap.is_empty());
    assert_eq!(heap.len(), 4);
    assert_eq!(heap.peek(), Some((&1, &"one")));

    assert_eq!(heap.pop(), Some((1, "one")));
    assert_eq!(heap.pop(), Some((3, "three")));
    assert_eq!(heap.pop(), Some((5, "five")));
    assert_eq!(heap.pop(), Some((10, "ten")));
    assert_eq!(heap.pop(), None);
    assert!(heap.is_empty());
}

/// Test decrease_key operations extensively
fn test_decrease_key_operations<H: DecreaseKeyHeap<i32, i32>>(mut heap: H) {
    let _h1 = heap.push_with_handle(100, 1);
    let h2 = heap.push_with_handle(200, 2);
    let _h3 = heap.push_with_handle(300, 3);
    let h4 = heap.push_with_handle(400, 4);

    assert_eq!(heap.peek(), Some((&100, &1)));

    // Decrease key of element not at min
    heap.decrease_key(&h2, 50).unwrap();
    assert_eq!(heap.peek(), Some((&50, &2)));

    // Decrease key to become new min
    heap.decrease_key(&h4, 25).unwrap();
    assert_eq!(heap.peek(), Some((&25, &4)));

    // Decrease key of current min even more
    heap.decrease_key(&h4, 1).unwrap();
    assert_eq!(heap.peek(), Some((&1, &4)));

    assert_eq!(heap.pop(), Some((1, 4)));
    assert_eq!(heap.pop(), Some((50, 2)));
    assert_eq!(heap.pop(), Some((100, 1)));
    assert_eq!(heap.pop(), Some((300, 3)));
}

/// Test decrease_key on multiple elements
fn test_multiple_decrease_keys<H: DecreaseKeyHeap<i32, i32>>(mut heap: H) {
    let mut handles = Vec::new();

    for i in 0..20 {
        handles.push(heap.push_with_handle((i + 1) * 100, i));
    }

    for (i, handle) in handles.iter().enumerate() {
        heap.decrease_key(handle, i as i32).unwrap();
    }

    assert_eq!(heap.peek(), Some((&0, &0)));
    for i in 0..20 {
        assert_eq!(heap.pop(), Some((i, i)));
    }
    assert!(heap.is_empty());
}

/// Test with duplicate priorities
fn test_duplicate_priorities<H: DecreaseKeyHeap<i32, &'static str>>(mut heap: H) {
    heap.push(5, "a");
    heap.push(5, "b");
    heap.push(5, "c");
    heap.push(1, "d");

    assert_eq!(heap.pop(), Some((1, "d")));

    // Items with same priority can come in any order
    let mut seen = std::collections::HashSet::new();
    for _ in 0..3 {
        let (pri, item) = heap.pop().unwrap();
        assert_eq!(pri, 5);
        assert!(seen.insert(item));
    }
    assert_eq!(seen.len(), 3);
}

/// A popped element's handle is rejected instead of touching another element
fn test_decrease_key_after_pop<H: DecreaseKeyHeap<i32, i32>>(mut heap: H) {
    let handle = heap.push_with_handle(10, 1);
    heap.push(20, 2);

    assert_eq!(heap.pop(), Some((10, 1)));
    assert_eq!(heap.decrease_key(&handle, 0), Err(HeapError::StaleHandle));
    assert_eq!(heap.peek(), Some((&20, &2)));
}

/// Decreasing to a worse key is refused and leaves the heap unchanged
fn test_decrease_key_wrong_direction<H: DecreaseKeyHeap<i32, i32>>(mut heap: H) {
    let low = heap.push_with_handle(1, 1);
    heap.push(5, 5);

    assert_eq!(heap.decrease_key(&low, 9), Err(HeapError::KeyNotDecreased));
    assert_eq!(heap.peek(), Some((&1, &1)));
    assert_eq!(heap.len(), 2);
}

/// Test many operations in sequence
fn test_stress_operations<H: DecreaseKeyHeap<i32, i32>>(mut heap: H) {
    let mut handles = Vec::new();

    for i in 0..100 {
        handles.push(heap.push_with_handle(i * 2, i));
    }

    for i in (0..100).step_by(3) {
        heap.decrease_key(&handles[i], i as i32 * 2 - 1).unwrap();
    }

    for _ in 0..20 {
        assert!(heap.pop().is_some());
    }

    assert!(!heap.is_empty());
    assert!(heap.peek().is_some());

    let mut count = 0;
    let mut last = i32::MIN;
    while let Some((priority, _)) = heap.pop() {
        assert!(priority >= last);
        last = priority;
        count += 1;
    }
    assert_eq!(count, 80);
}

/// Test that peek doesn't modify heap
fn test_peek_idempotent<H: DecreaseKeyHeap<i32, &'static str>>(mut heap: H) {
    heap.push(5, "five");
    heap.push(1, "one");

    assert_eq!(heap.peek(), Some((&1, &"one")));
    assert_eq!(heap.peek(), Some((&1, &"one")));
    assert_eq!(heap.len(), 2);

    assert_eq!(heap.pop(), Some((1, "one")));
    assert_eq!(heap.peek(), Some((&5, &"five")));
}

/// Test single element
fn test_single_element<H: DecreaseKeyHeap<i32, i32>>(mut heap: H) {
    let handle = heap.push_with_handle(42, 42);
    heap.decrease_key(&handle, 7).unwrap();
    assert_eq!(heap.peek(), Some((&7, &42)));
    assert_eq!(heap.pop(), Some((7, 42)));
    assert!(heap.is_empty());
    assert_eq!(heap.pop(), None);
}

fn by_natural(a: &i32, b: &i32) -> Ordering {
    a.cmp(b)
}

type FnHeap<V> = IndexedHeap<i32, V, FnComparator<fn(&i32, &i32) -> Ordering>>;

fn fn_heap<V>() -> FnHeap<V> {
    IndexedHeap::with_comparator(FnComparator::new(by_natural as fn(&i32, &i32) -> Ordering))
}

macro_rules! generic_suite {
    ($module:ident, $ctor:expr) => {
        mod $module {
            use super::*;

            #[test]
            fn empty_heap() {
                test_empty_heap($ctor);
            }

            #[test]
            fn basic_operations() {
                test_basic_operations($ctor);
            }

            #[test]
            fn decrease_key_operations() {
                test_decrease_key_operations($ctor);
            }

            #[test]
            fn multiple_decrease_keys() {
                test_multiple_decrease_keys($ctor);
            }

            #[test]
            fn duplicate_priorities() {
                test_duplicate_priorities($ctor);
            }

            #[test]
            fn decrease_key_after_pop() {
                test_decrease_key_after_pop($ctor);
            }

            #[test]
            fn decrease_key_wrong_direction() {
                test_decrease_key_wrong_direction($ctor);
            }

            #[test]
            fn stress_operations() {
                test_stress_operations($ctor);
            }

            #[test]
            fn peek_idempotent() {
                test_peek_idempotent($ctor);
            }

            #[test]
            fn single_element() {
                test_single_element($ctor);
            }
        }
    };
}

generic_suite!(natural_order, IndexedHeap::new());
generic_suite!(preallocated, IndexedHeap::with_capacity(128));
generic_suite!(fn_comparator, fn_heap());
