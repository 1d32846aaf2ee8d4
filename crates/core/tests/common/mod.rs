//! Shared test infrastructure: trace construction and pipeline driving.

use dynsched_core::SimConfig;
use dynsched_core::common::ArchReg;
use dynsched_core::pipeline::Pipeline;
use dynsched_core::pipeline::instruction::InstRecord;
use dynsched_core::stats::SimStats;
use dynsched_core::trace::{OpType, TraceOp};

/// Builds a trace operation from raw trace-file style fields.
pub fn op(pc: u64, class: i64, dst: i64, src1: i64, src2: i64) -> TraceOp {
    let reg = |v: i64| {
        if v < 0 {
            None
        } else {
            ArchReg::new(v as usize)
        }
    };
    TraceOp {
        pc,
        op: OpType::from_code(class).unwrap(),
        dst: reg(dst),
        src1: reg(src1),
        src2: reg(src2),
    }
}

/// Everything a finished run leaves behind.
pub struct RunResult {
    /// Retired instructions, in retirement (= program) order.
    pub retired: Vec<InstRecord>,
    /// Final counters.
    pub stats: SimStats,
}

/// Runs a trace to completion through a fresh pipeline.
pub fn run(config: &SimConfig, ops: Vec<TraceOp>) -> RunResult {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut pipeline = Pipeline::new(config, ops.into_iter());
    let mut retired = Vec::new();
    loop {
        let more = pipeline.advance();
        retired.extend(pipeline.drain_retired());
        if !more {
            break;
        }
    }
    RunResult {
        retired,
        stats: pipeline.stats().clone(),
    }
}
