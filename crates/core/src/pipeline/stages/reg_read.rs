//! Register read stage: source readiness from the ROB.

use crate::pipeline::instruction::{InstRecord, Stage};
use crate::pipeline::rob::ReorderBuffer;

/// Executes the register read stage.
///
/// A source that kept its architectural id has no in-flight producer and is
/// ready now; a renamed source is ready iff its producer's slot is. The
/// flag is only ever raised here — a wake-up that already marked a source
/// ready must survive, because the producer's slot may since have been
/// freed by retirement.
pub fn reg_read_stage(
    cycle: u64,
    reg_read_latch: &mut Vec<InstRecord>,
    dispatch_latch: &mut Vec<InstRecord>,
    rob: &ReorderBuffer,
) {
    if reg_read_latch.is_empty() || !dispatch_latch.is_empty() {
        return;
    }
    for rec in reg_read_latch.iter_mut() {
        for src in [&mut rec.src1, &mut rec.src2] {
            if !src.ready {
                src.ready = match src.pending {
                    None => true,
                    Some(tag) => rob.is_ready(tag),
                };
            }
        }
        rec.timing.advance_to(Stage::Dispatch, cycle + 1);
    }
    *dispatch_latch = std::mem::take(reg_read_latch);
}
