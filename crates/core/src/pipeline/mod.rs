//! Pipeline engine: latches, scheduling structures, and the cycle loop.
//!
//! This module composes the nine-stage pipeline. It provides:
//! 1. **Structures:** The inter-stage latches, the reorder buffer, the
//!    rename map table, and the issue queue.
//! 2. **Controller:** [`Pipeline`], which evaluates the stages in reverse
//!    program order every cycle and owns the cycle counter.
//! 3. **Stage logic:** One function per stage under [`stages`].
//!
//! The reverse evaluation order (retire first, fetch last) is what makes
//! the simulated stages behave as if they acted simultaneously: a bundle
//! can move from stage S to stage S+1 only if S+1 was drained earlier in
//! the same cycle, so nothing ever crosses two latches in one cycle.

/// In-flight instruction records and per-stage timing.
pub mod instruction;
/// Issue queue.
pub mod iq;
/// Rename map table.
pub mod rmt;
/// Reorder buffer.
pub mod rob;
/// Per-stage logic functions.
pub mod stages;

use crate::config::SimConfig;
use crate::pipeline::instruction::InstRecord;
use crate::pipeline::iq::IssueQueue;
use crate::pipeline::rmt::RenameMapTable;
use crate::pipeline::rob::ReorderBuffer;
use crate::pipeline::stages::execute::Executing;
use crate::stats::SimStats;
use crate::trace::TraceOp;

/// The nine-stage pipeline and everything in flight inside it.
///
/// Generic over the trace source so tests can drive it from an in-memory
/// vector while the CLI streams from a file.
#[derive(Debug)]
pub struct Pipeline<S> {
    source: S,
    width: usize,

    /// Fetch -> Decode latch.
    decode_latch: Vec<InstRecord>,
    /// Decode -> Rename latch.
    rename_latch: Vec<InstRecord>,
    /// Rename -> RegRead latch.
    reg_read_latch: Vec<InstRecord>,
    /// RegRead -> Dispatch latch.
    dispatch_latch: Vec<InstRecord>,
    /// Execute set (unbounded, latency countdown).
    execute_set: Vec<Executing>,
    /// Execute -> Writeback latch.
    writeback_latch: Vec<InstRecord>,

    iq: IssueQueue,
    rob: ReorderBuffer,
    rmt: RenameMapTable,

    cycle: u64,
    trace_done: bool,
    retired: Vec<InstRecord>,
    stats: SimStats,
}

impl<S: Iterator<Item = TraceOp>> Pipeline<S> {
    /// Creates an empty pipeline over a trace source.
    pub fn new(config: &SimConfig, source: S) -> Self {
        Self {
            source,
            width: config.width,
            decode_latch: Vec::with_capacity(config.width),
            rename_latch: Vec::with_capacity(config.width),
            reg_read_latch: Vec::with_capacity(config.width),
            dispatch_latch: Vec::with_capacity(config.width),
            execute_set: Vec::with_capacity(config.iq_size),
            writeback_latch: Vec::with_capacity(config.iq_size),
            iq: IssueQueue::new(config.iq_size),
            rob: ReorderBuffer::new(config.rob_size),
            rmt: RenameMapTable::new(),
            cycle: 0,
            trace_done: false,
            retired: Vec::new(),
            stats: SimStats::default(),
        }
    }

    /// Runs one cycle: all stages in reverse program order, then the cycle
    /// counter advances.
    ///
    /// Returns `false` once the trace has ended and the pipeline has fully
    /// drained; the cycle just run still counts.
    pub fn advance(&mut self) -> bool {
        stages::retire::retire_stage(
            self.cycle,
            self.width,
            &mut self.rob,
            &mut self.rmt,
            &mut self.reg_read_latch,
            &mut self.retired,
            &mut self.stats,
        );
        stages::writeback::writeback_stage(self.cycle, &mut self.writeback_latch, &mut self.rob);
        stages::execute::execute_stage(
            self.cycle,
            &mut self.execute_set,
            &mut self.writeback_latch,
            &mut self.iq,
            &mut self.dispatch_latch,
            &mut self.reg_read_latch,
        );
        stages::issue::issue_stage(self.cycle, self.width, &mut self.iq, &mut self.execute_set);
        stages::dispatch::dispatch_stage(
            self.cycle,
            &mut self.dispatch_latch,
            &mut self.iq,
            &mut self.stats,
        );
        stages::reg_read::reg_read_stage(
            self.cycle,
            &mut self.reg_read_latch,
            &mut self.dispatch_latch,
            &self.rob,
        );
        stages::rename::rename_stage(
            self.cycle,
            &mut self.rename_latch,
            &mut self.reg_read_latch,
            &mut self.rob,
            &mut self.rmt,
            &mut self.stats,
        );
        stages::decode::decode_stage(self.cycle, &mut self.decode_latch, &mut self.rename_latch);
        stages::fetch::fetch_stage(
            &mut self.source,
            self.width,
            self.cycle,
            &mut self.decode_latch,
            &mut self.trace_done,
            &mut self.stats,
        );

        let drained = self.is_drained();
        self.cycle += 1;
        self.stats.cycles = self.cycle;
        !(self.trace_done && drained)
    }

    /// Takes the instructions retired so far, in retirement order.
    pub fn drain_retired(&mut self) -> Vec<InstRecord> {
        std::mem::take(&mut self.retired)
    }

    /// Aggregate counters for the run so far.
    #[inline]
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Cycles run so far.
    #[inline]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Current issue queue occupancy.
    #[inline]
    pub fn iq_occupancy(&self) -> usize {
        self.iq.len()
    }

    /// Current reorder buffer occupancy.
    #[inline]
    pub fn rob_occupancy(&self) -> usize {
        self.rob.len()
    }

    /// True when no instruction remains anywhere in the pipeline.
    fn is_drained(&self) -> bool {
        self.decode_latch.is_empty()
            && self.rename_latch.is_empty()
            && self.reg_read_latch.is_empty()
            && self.dispatch_latch.is_empty()
            && self.iq.is_empty()
            && self.execute_set.is_empty()
            && self.writeback_latch.is_empty()
            && self.rob.is_empty()
    }
}
