//! Rename stage: ROB allocation and map-table rewrite.
//!
//! Source operands are looked up in the RMT before the destination mapping
//! is updated, so an instruction reading its own destination register sees
//! the previous producer's tag, not its own. Within one bundle the lookup
//! runs in bundle order, so intra-bundle dependences rename correctly.

use tracing::trace;

use crate::pipeline::instruction::{InstRecord, Stage};
use crate::pipeline::rmt::RenameMapTable;
use crate::pipeline::rob::ReorderBuffer;
use crate::stats::SimStats;

/// Executes the rename stage.
///
/// Allocation is all-or-nothing: the bundle stalls in place unless the ROB
/// has room for every instruction in it.
pub fn rename_stage(
    cycle: u64,
    rename_latch: &mut Vec<InstRecord>,
    reg_read_latch: &mut Vec<InstRecord>,
    rob: &mut ReorderBuffer,
    rmt: &mut RenameMapTable,
    stats: &mut SimStats,
) {
    if rename_latch.is_empty() || !reg_read_latch.is_empty() {
        return;
    }
    if rob.free_slots() < rename_latch.len() {
        stats.rob_stall_cycles += 1;
        trace!(cycle, bundle = rename_latch.len(), "rename stalled: reorder buffer full");
        return;
    }

    for rec in rename_latch.iter_mut() {
        let tag = rob.allocate(rec.pc, rec.dst_arch);
        for src in [&mut rec.src1, &mut rec.src2] {
            if let Some(reg) = src.arch {
                src.pending = rmt.get(reg);
            }
        }
        if let Some(reg) = rec.dst_arch {
            rmt.set(reg, tag);
        }
        rec.rob_tag = Some(tag);
        rec.timing.advance_to(Stage::RegRead, cycle + 1);
    }
    *reg_read_latch = std::mem::take(rename_latch);
}
