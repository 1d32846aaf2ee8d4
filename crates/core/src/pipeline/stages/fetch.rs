//! Fetch stage: trace read into the decode latch.

use crate::pipeline::instruction::{InstRecord, Stage};
use crate::stats::SimStats;
use crate::trace::TraceOp;

/// Executes the fetch stage.
///
/// Reads up to `width` operations from the trace into the decode latch.
/// A no-op if the decode latch still holds the previous bundle or the
/// trace has ended; a trace that runs dry mid-bundle sets `trace_done`
/// and leaves a short bundle.
pub fn fetch_stage<S: Iterator<Item = TraceOp>>(
    source: &mut S,
    width: usize,
    cycle: u64,
    decode_latch: &mut Vec<InstRecord>,
    trace_done: &mut bool,
    stats: &mut SimStats,
) {
    if *trace_done || !decode_latch.is_empty() {
        return;
    }
    for _ in 0..width {
        let Some(op) = source.next() else {
            *trace_done = true;
            break;
        };
        stats.instructions += 1;
        let mut rec = InstRecord::new(op, cycle);
        rec.timing.advance_to(Stage::Decode, cycle + 1);
        decode_latch.push(rec);
    }
}
