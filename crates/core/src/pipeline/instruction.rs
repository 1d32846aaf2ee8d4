//! In-flight instruction records and per-stage timing.
//!
//! One `InstRecord` is created per trace operation at fetch and carries
//! everything the retirement report needs: the architectural operands as
//! they appeared in the trace, the renamed operand state, readiness flags,
//! and the begin-cycle/duration of every stage it passes through.

use crate::common::ArchReg;
use crate::pipeline::rob::RobTag;
use crate::trace::{OpType, TraceOp};

/// The nine pipeline stages, in program order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Fetch: trace read.
    Fetch,
    /// Decode: one-cycle pass-through.
    Decode,
    /// Rename: ROB allocation and map-table lookup.
    Rename,
    /// Register read: source readiness from the ROB.
    RegRead,
    /// Dispatch: insertion into the issue queue.
    Dispatch,
    /// Issue: age-ordered selection of ready instructions.
    Issue,
    /// Execute: latency countdown and wake-up broadcast.
    Execute,
    /// Writeback: result marked ready in the ROB.
    Writeback,
    /// Retire: in-order removal from the ROB head.
    Retire,
}

impl Stage {
    /// All stages in program order.
    pub const ALL: [Self; 9] = [
        Self::Fetch,
        Self::Decode,
        Self::Rename,
        Self::RegRead,
        Self::Dispatch,
        Self::Issue,
        Self::Execute,
        Self::Writeback,
        Self::Retire,
    ];

    /// Two-letter stage mnemonic used in the timing report.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Fetch => "FE",
            Self::Decode => "DE",
            Self::Rename => "RN",
            Self::RegRead => "RR",
            Self::Dispatch => "DI",
            Self::Issue => "IS",
            Self::Execute => "EX",
            Self::Writeback => "WB",
            Self::Retire => "RT",
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Begin cycle and occupancy of every stage for one instruction.
///
/// Durations are derived: entering stage S+1 at cycle c fixes the time spent
/// in stage S as `c - begin(S)`. Retire occupancy is fixed by `finish`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageTimings {
    begin: [u64; 9],
    spent: [u64; 9],
}

impl StageTimings {
    /// Starts the record in Fetch at `cycle`.
    pub fn new(cycle: u64) -> Self {
        let mut timings = Self::default();
        timings.begin[Stage::Fetch.index()] = cycle;
        timings
    }

    /// Enters `stage` at `cycle`, closing out the preceding stage.
    pub fn advance_to(&mut self, stage: Stage, cycle: u64) {
        let idx = stage.index();
        debug_assert!(idx > 0, "cannot re-enter fetch");
        self.begin[idx] = cycle;
        self.spent[idx - 1] = cycle - self.begin[idx - 1];
    }

    /// Leaves Retire at `cycle`, closing out the final stage.
    pub fn finish(&mut self, cycle: u64) {
        let idx = Stage::Retire.index();
        self.spent[idx] = cycle - self.begin[idx];
    }

    /// Cycle on which the instruction entered `stage`.
    #[inline]
    pub fn begin(&self, stage: Stage) -> u64 {
        self.begin[stage.index()]
    }

    /// Cycles the instruction spent in `stage`.
    #[inline]
    pub fn spent(&self, stage: Stage) -> u64 {
        self.spent[stage.index()]
    }
}

/// One source operand: the architectural id from the trace, the rename
/// result, and the readiness flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Source {
    /// Architectural register as traced, preserved for the report.
    pub arch: Option<ArchReg>,
    /// In-flight producer this operand was renamed to, if any.
    pub pending: Option<RobTag>,
    /// True once the operand value is known to be available at issue time.
    pub ready: bool,
}

impl Source {
    fn new(arch: Option<ArchReg>) -> Self {
        Self {
            arch,
            pending: None,
            ready: false,
        }
    }

    /// Wake-up: marks the operand ready if it awaits producer `tag`.
    #[inline]
    pub fn wake(&mut self, tag: RobTag) {
        if self.pending == Some(tag) {
            self.ready = true;
        }
    }
}

/// An in-flight instruction, from fetch to retirement.
#[derive(Clone, Debug)]
pub struct InstRecord {
    /// Program counter, preserved verbatim from the trace.
    pub pc: u64,
    /// Execution latency class.
    pub op: OpType,
    /// Architectural destination, preserved for the report.
    pub dst_arch: Option<ArchReg>,
    /// ROB slot this instruction renames its destination to; set at rename.
    pub rob_tag: Option<RobTag>,
    /// First source operand.
    pub src1: Source,
    /// Second source operand.
    pub src2: Source,
    /// Per-stage timing, filled in as the record moves.
    pub timing: StageTimings,
}

impl InstRecord {
    /// Creates a record for a trace operation fetched at `cycle`.
    pub fn new(op: TraceOp, cycle: u64) -> Self {
        Self {
            pc: op.pc,
            op: op.op,
            dst_arch: op.dst,
            rob_tag: None,
            src1: Source::new(op.src1),
            src2: Source::new(op.src2),
            timing: StageTimings::new(cycle),
        }
    }

    /// ROB tag assigned at rename.
    ///
    /// # Panics
    ///
    /// Panics if the record has not passed rename; stage preconditions
    /// guarantee it has by the time anything asks.
    #[inline]
    pub fn tag(&self) -> RobTag {
        match self.rob_tag {
            Some(tag) => tag,
            None => unreachable!("instruction reached the backend without a rename tag"),
        }
    }

    /// Wake-up: marks any source awaiting producer `tag` as ready.
    #[inline]
    pub fn wake(&mut self, tag: RobTag) {
        self.src1.wake(tag);
        self.src2.wake(tag);
    }

    /// True when both sources are ready and the instruction may issue.
    #[inline]
    pub fn sources_ready(&self) -> bool {
        self.src1.ready && self.src2.ready
    }
}
