//! Rename Map Table (RMT).
//!
//! Maps each architectural register to the ROB tag of its latest in-flight
//! producer, or `None` when the architecturally committed value is the most
//! recent one. At most one entry points at any given tag, and only while
//! that tag's slot holds an instruction whose destination is the mapped
//! register.

use crate::common::{ARCH_REG_COUNT, ArchReg};
use crate::pipeline::rob::RobTag;

/// Architectural-register to in-flight-producer map.
#[derive(Debug)]
pub struct RenameMapTable {
    map: [Option<RobTag>; ARCH_REG_COUNT],
}

impl Default for RenameMapTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RenameMapTable {
    /// Creates a map with every register architecturally up to date.
    pub fn new() -> Self {
        Self {
            map: [None; ARCH_REG_COUNT],
        }
    }

    /// The in-flight producer of `reg`, or `None` if the committed value
    /// is current.
    #[inline]
    pub fn get(&self, reg: ArchReg) -> Option<RobTag> {
        self.map[reg.index()]
    }

    /// Points `reg` at a new in-flight producer.
    #[inline]
    pub fn set(&mut self, reg: ArchReg, tag: RobTag) {
        self.map[reg.index()] = Some(tag);
    }

    /// Clears `reg` only if it still points at `tag`.
    ///
    /// A retiring instruction must not clear a mapping that a younger
    /// rename of the same register has already overwritten.
    pub fn clear_if_match(&mut self, reg: ArchReg, tag: RobTag) {
        let entry = &mut self.map[reg.index()];
        if *entry == Some(tag) {
            *entry = None;
        }
    }
}
