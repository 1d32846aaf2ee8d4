//! Issue Queue (IQ).
//!
//! A capacity-bounded bag of dispatched instructions awaiting operand
//! readiness. The queue imposes no intrinsic order; issue priority comes
//! from the age counter assigned at insertion, so instructions dispatched
//! earlier (and, within one bundle, earlier in the bundle) issue first.

use crate::pipeline::instruction::InstRecord;
use crate::pipeline::rob::RobTag;

#[derive(Debug)]
struct IqEntry {
    age: u64,
    inst: InstRecord,
}

/// Bounded issue queue with age-ordered ready selection.
#[derive(Debug)]
pub struct IssueQueue {
    entries: Vec<IqEntry>,
    capacity: usize,
    next_age: u64,
}

impl IssueQueue {
    /// Creates an issue queue with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            next_age: 0,
        }
    }

    /// Number of waiting instructions.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no instruction is waiting.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of free entries.
    #[inline]
    pub fn free_slots(&self) -> usize {
        self.capacity - self.entries.len()
    }

    /// Inserts a dispatched instruction, assigning its issue age.
    ///
    /// # Panics
    ///
    /// Panics on overflow; dispatch checks `free_slots` for its whole
    /// bundle first.
    pub fn insert(&mut self, inst: InstRecord) {
        assert!(self.entries.len() < self.capacity, "issue queue overflow");
        let age = self.next_age;
        self.next_age += 1;
        self.entries.push(IqEntry { age, inst });
    }

    /// Wake-up broadcast: marks sources awaiting producer `tag` ready.
    pub fn wake(&mut self, tag: RobTag) {
        for entry in &mut self.entries {
            entry.inst.wake(tag);
        }
    }

    /// Removes and returns up to `limit` ready instructions, oldest first.
    ///
    /// An unready older instruction does not block a younger ready one.
    pub fn take_ready(&mut self, limit: usize) -> Vec<InstRecord> {
        let mut picks: Vec<(u64, usize)> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.inst.sources_ready())
            .map(|(idx, e)| (e.age, idx))
            .collect();
        picks.sort_unstable();
        picks.truncate(limit);

        // Remove highest index first so earlier picks stay valid.
        picks.sort_unstable_by(|a, b| b.1.cmp(&a.1));
        let mut taken: Vec<IqEntry> = picks
            .into_iter()
            .map(|(_, idx)| self.entries.swap_remove(idx))
            .collect();
        taken.sort_unstable_by_key(|e| e.age);
        taken.into_iter().map(|e| e.inst).collect()
    }
}
