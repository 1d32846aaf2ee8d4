//! Dispatch stage: bundle insertion into the issue queue.

use tracing::trace;

use crate::pipeline::instruction::{InstRecord, Stage};
use crate::pipeline::iq::IssueQueue;
use crate::stats::SimStats;

/// Executes the dispatch stage.
///
/// Insertion is all-or-nothing: the bundle stalls in place unless the
/// issue queue has room for every instruction in it.
pub fn dispatch_stage(
    cycle: u64,
    dispatch_latch: &mut Vec<InstRecord>,
    iq: &mut IssueQueue,
    stats: &mut SimStats,
) {
    if dispatch_latch.is_empty() {
        return;
    }
    if iq.free_slots() < dispatch_latch.len() {
        stats.iq_stall_cycles += 1;
        trace!(cycle, bundle = dispatch_latch.len(), "dispatch stalled: issue queue full");
        return;
    }
    for mut rec in dispatch_latch.drain(..) {
        rec.timing.advance_to(Stage::Issue, cycle + 1);
        iq.insert(rec);
    }
}
