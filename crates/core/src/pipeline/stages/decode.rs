//! Decode stage: one-cycle pass-through to the rename latch.

use crate::pipeline::instruction::{InstRecord, Stage};

/// Executes the decode stage.
///
/// Moves the whole bundle to the rename latch if rename has drained it.
pub fn decode_stage(
    cycle: u64,
    decode_latch: &mut Vec<InstRecord>,
    rename_latch: &mut Vec<InstRecord>,
) {
    if decode_latch.is_empty() || !rename_latch.is_empty() {
        return;
    }
    for rec in decode_latch.iter_mut() {
        rec.timing.advance_to(Stage::Rename, cycle + 1);
    }
    *rename_latch = std::mem::take(decode_latch);
}
