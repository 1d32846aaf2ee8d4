//! Retire stage: in-order removal from the ROB head.

use tracing::trace;

use crate::pipeline::instruction::InstRecord;
use crate::pipeline::rmt::RenameMapTable;
use crate::pipeline::rob::ReorderBuffer;
use crate::stats::SimStats;

/// Executes the retire stage.
///
/// Retires up to `width` consecutive ready instructions from the ROB head.
/// For each one:
/// 1. Bypass to register read: sources still awaiting this tag are marked
///    ready, since the slot is about to be freed and the tag goes stale.
/// 2. The RMT mapping is cleared, unless a younger rename of the same
///    register has already overwritten it.
/// 3. The record leaves the pipeline with its retirement timing closed out.
pub fn retire_stage(
    cycle: u64,
    width: usize,
    rob: &mut ReorderBuffer,
    rmt: &mut RenameMapTable,
    reg_read_latch: &mut Vec<InstRecord>,
    retired: &mut Vec<InstRecord>,
    stats: &mut SimStats,
) {
    for _ in 0..width {
        let Some(tag) = rob.head_if_ready() else {
            break;
        };

        for rec in reg_read_latch.iter_mut() {
            rec.wake(tag);
        }

        let (dest, mut rec) = rob.retire_head();
        if let Some(reg) = dest {
            rmt.clear_if_match(reg, tag);
        }
        rec.timing.finish(cycle + 1);
        trace!(cycle, pc = rec.pc, slot = tag.index(), "retire");
        stats.instructions_retired += 1;
        retired.push(rec);
    }
}
