//! Execute stage: latency countdown and wake-up broadcast.

use crate::pipeline::instruction::{InstRecord, Stage};
use crate::pipeline::iq::IssueQueue;

/// An instruction in the execute set, counting down its latency.
///
/// The execute set is unbounded: no functional-unit contention is modeled
/// beyond the per-class latency itself.
#[derive(Debug)]
pub struct Executing {
    /// The in-flight record.
    pub inst: InstRecord,
    /// Cycles left in execute, including the current one.
    pub remaining: u64,
}

/// Executes the execute stage.
///
/// Every in-flight instruction ages by one cycle; those that finish move to
/// the writeback latch and broadcast their tag to dependents still sitting
/// in the issue queue, the dispatch latch, or the register read latch, so a
/// dependent can issue the cycle after its producer finishes.
pub fn execute_stage(
    cycle: u64,
    execute_set: &mut Vec<Executing>,
    writeback_latch: &mut Vec<InstRecord>,
    iq: &mut IssueQueue,
    dispatch_latch: &mut Vec<InstRecord>,
    reg_read_latch: &mut Vec<InstRecord>,
) {
    for slot in execute_set.iter_mut() {
        slot.remaining -= 1;
    }
    let mut i = 0;
    while i < execute_set.len() {
        if execute_set[i].remaining > 0 {
            i += 1;
            continue;
        }
        let mut slot = execute_set.swap_remove(i);
        slot.inst.timing.advance_to(Stage::Writeback, cycle + 1);

        let tag = slot.inst.tag();
        iq.wake(tag);
        for rec in dispatch_latch.iter_mut() {
            rec.wake(tag);
        }
        for rec in reg_read_latch.iter_mut() {
            rec.wake(tag);
        }

        writeback_latch.push(slot.inst);
    }
}
