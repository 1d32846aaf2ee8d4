//! Issue stage: age-ordered selection into the execute set.

use crate::pipeline::instruction::Stage;
use crate::pipeline::iq::IssueQueue;
use crate::pipeline::stages::execute::Executing;

/// Executes the issue stage.
///
/// Selects up to `width` ready instructions from the issue queue in
/// ascending age order and starts their latency countdown.
pub fn issue_stage(cycle: u64, width: usize, iq: &mut IssueQueue, execute_set: &mut Vec<Executing>) {
    for mut rec in iq.take_ready(width) {
        rec.timing.advance_to(Stage::Execute, cycle + 1);
        let remaining = rec.op.latency();
        execute_set.push(Executing {
            inst: rec,
            remaining,
        });
    }
}
