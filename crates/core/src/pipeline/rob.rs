//! Reorder Buffer (ROB) for in-order retirement.
//!
//! The ROB is a circular buffer that tracks in-flight instructions from
//! rename through retirement. It provides:
//! 1. **Allocation:** Assigns a slot (the rename tag) to each instruction
//!    entering the backend; the slot index doubles as the renamed
//!    destination, so there is no separate physical register file.
//! 2. **Completion:** Writeback parks the finished record in its slot and
//!    marks it ready.
//! 3. **In-order retirement:** Slots leave from the head in program order,
//!    head-ready only.
//!
//! Head and tail both start at slot 3 rather than 0, so nothing may assume a
//! zero-aligned wrap. Occupancy is tracked with an explicit count; `head ==
//! tail` is therefore never ambiguous between empty and full.

use crate::common::ArchReg;
use crate::pipeline::instruction::InstRecord;

/// Rename tag: the index of the ROB slot allocated to an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RobTag(usize);

impl RobTag {
    /// Wraps a slot index.
    #[inline]
    pub fn new(slot: usize) -> Self {
        Self(slot)
    }

    /// The slot index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single ROB slot.
#[derive(Debug, Default)]
struct RobSlot {
    pc: u64,
    dest: Option<ArchReg>,
    ready: bool,
    /// The in-flight record, parked here by writeback until retirement.
    record: Option<InstRecord>,
}

/// Circular reorder buffer.
#[derive(Debug)]
pub struct ReorderBuffer {
    slots: Vec<RobSlot>,
    head: usize,
    tail: usize,
    count: usize,
}

/// Both pointers start here (modulo capacity) on reset.
const RESET_SLOT: usize = 3;

impl ReorderBuffer {
    /// Creates a ROB with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; `SimConfig::validate` rejects that
    /// before a pipeline is built.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "reorder buffer capacity must be positive");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, RobSlot::default);
        Self {
            slots,
            head: RESET_SLOT % capacity,
            tail: RESET_SLOT % capacity,
            count: 0,
        }
    }

    /// Returns the ROB capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if no instruction is in flight.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of free slots.
    #[inline]
    pub fn free_slots(&self) -> usize {
        self.slots.len() - self.count
    }

    /// Allocates the slot at the tail for an instruction.
    ///
    /// Rename checks `free_slots` for its whole bundle first, so allocation
    /// never observes a full buffer.
    ///
    /// # Panics
    ///
    /// Panics on overflow; that is a stage-precondition violation.
    pub fn allocate(&mut self, pc: u64, dest: Option<ArchReg>) -> RobTag {
        assert!(self.count < self.slots.len(), "reorder buffer overflow");
        let tag = RobTag(self.tail);
        self.slots[self.tail] = RobSlot {
            pc,
            dest,
            ready: false,
            record: None,
        };
        self.tail = (self.tail + 1) % self.slots.len();
        self.count += 1;
        tag
    }

    /// True if the slot's result is available.
    ///
    /// A freed slot reads as not ready, so a stale tag held by an operand
    /// that missed the retirement bypass can never appear ready.
    #[inline]
    pub fn is_ready(&self, tag: RobTag) -> bool {
        self.slots[tag.index()].ready
    }

    /// Writeback: parks the finished record in its slot and marks it ready.
    pub fn complete(&mut self, tag: RobTag, record: InstRecord) {
        let slot = &mut self.slots[tag.index()];
        debug_assert!(!slot.ready, "slot completed twice");
        slot.ready = true;
        slot.record = Some(record);
    }

    /// Returns the head slot's tag if it is occupied and ready to retire.
    pub fn head_if_ready(&self) -> Option<RobTag> {
        if self.count > 0 && self.slots[self.head].ready {
            Some(RobTag(self.head))
        } else {
            None
        }
    }

    /// Retires the head slot: clears it, advances the head pointer, and
    /// returns the destination register and the parked record.
    ///
    /// # Panics
    ///
    /// Panics if the head is empty or not ready; callers gate on
    /// [`ReorderBuffer::head_if_ready`].
    pub fn retire_head(&mut self) -> (Option<ArchReg>, InstRecord) {
        assert!(
            self.count > 0 && self.slots[self.head].ready,
            "retire of an unready reorder buffer head"
        );
        let slot = std::mem::take(&mut self.slots[self.head]);
        self.head = (self.head + 1) % self.slots.len();
        self.count -= 1;
        match slot.record {
            Some(record) => (slot.dest, record),
            None => unreachable!("ready slot without a writeback record"),
        }
    }
}
