//! Writeback stage: results become visible in the ROB.

use crate::pipeline::instruction::{InstRecord, Stage};
use crate::pipeline::rob::ReorderBuffer;

/// Executes the writeback stage.
///
/// Each finished instruction is parked in its ROB slot, ready to retire;
/// dependents passing register read from this cycle on observe the slot as
/// ready.
pub fn writeback_stage(cycle: u64, writeback_latch: &mut Vec<InstRecord>, rob: &mut ReorderBuffer) {
    for mut rec in writeback_latch.drain(..) {
        rec.timing.advance_to(Stage::Retire, cycle + 1);
        let tag = rec.tag();
        rob.complete(tag, rec);
    }
}
