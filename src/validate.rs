//! Structural invariant checks for [`IndexedHeap`]
//!
//! These walk the whole heap in O(n) and are meant for tests and debugging,
//! not for hot paths.

use crate::compare::Compare;
use crate::error::InvariantViolation;
use crate::indexed::IndexedHeap;

impl<K, V, C: Compare<K>> IndexedHeap<K, V, C> {
    /// Verifies the count, slot liveness, position and heap-order invariants
    ///
    /// Returns the first violation found, checking slots from the root down.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.slots.len() != self.entries.len() {
            return Err(InvariantViolation::Count {
                slots: self.slots.len(),
                entries: self.entries.len(),
            });
        }

        for (index, &entry) in self.slots.iter().enumerate() {
            let Some(e) = self.entries.get(entry) else {
                return Err(InvariantViolation::DanglingSlot { index });
            };
            if e.position != index {
                return Err(InvariantViolation::Position {
                    index,
                    recorded: e.position,
                });
            }
            if index > 0 {
                let parent = &self.entries[self.slots[(index - 1) / 2]];
                if self.cmp.precedes(&e.key, &parent.key) {
                    return Err(InvariantViolation::HeapOrder { index });
                }
            }
        }
        Ok(())
    }
}
