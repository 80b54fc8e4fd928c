//! Identifier allocation
//!
//! One strategy for every list: a counter seeded past the largest loaded
//! identifier. Deleted identifiers are never handed out again.

use crate::record::RecordId;

/// Monotonically increasing identifier source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from existing identifiers: next is `max + 1`, or 1 when empty
    pub fn seeded<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = RecordId>,
    {
        let mut alloc = Self::new();
        for id in ids {
            alloc.observe(id);
        }
        alloc
    }

    /// Make sure `id` is never allocated later
    pub fn observe(&mut self, id: RecordId) {
        if id.0 >= self.next {
            self.next = id.0 + 1;
        }
    }

    /// Hand out the next identifier
    pub fn allocate(&mut self) -> RecordId {
        let id = RecordId(self.next);
        self.next += 1;
        id
    }

    /// Identifier the next `allocate` call returns
    pub fn peek(&self) -> RecordId {
        RecordId(self.next)
    }
}
