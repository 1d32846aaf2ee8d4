//! Report formatting.
//!
//! One line per retired instruction, in program order, carrying the
//! architectural operands from the trace and the begin-cycle/duration of
//! every stage, followed by a summary block after the last retirement.

use std::fmt;
use std::io::{self, Write};

use crate::common::ArchReg;
use crate::config::SimConfig;
use crate::pipeline::instruction::{InstRecord, Stage};
use crate::stats::SimStats;

/// Formats a register operand the way the trace spells it: the id, or -1.
fn operand(reg: Option<ArchReg>) -> i64 {
    reg.map_or(-1, |r| r.index() as i64)
}

/// One per-instruction timing report line.
///
/// `seq` is the retirement sequence number, starting at 0.
#[derive(Debug)]
pub struct TimingLine<'a> {
    /// Retirement sequence number.
    pub seq: u64,
    /// The retired instruction.
    pub inst: &'a InstRecord,
}

impl fmt::Display for TimingLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} fu{{{}}} src{{{},{}}} dst{{{}}}",
            self.seq,
            self.inst.op.code(),
            operand(self.inst.src1.arch),
            operand(self.inst.src2.arch),
            operand(self.inst.dst_arch),
        )?;
        for stage in Stage::ALL {
            write!(
                f,
                " {}{{{},{}}}",
                stage.mnemonic(),
                self.inst.timing.begin(stage),
                self.inst.timing.spent(stage),
            )?;
        }
        Ok(())
    }
}

/// Writes the end-of-run summary block.
///
/// `trace_path` is echoed verbatim into the reconstructed command line.
///
/// # Errors
///
/// Propagates any write error from `out`.
pub fn write_summary<W: Write>(
    out: &mut W,
    config: &SimConfig,
    trace_path: &str,
    stats: &SimStats,
) -> io::Result<()> {
    writeln!(out, "# === Simulator Command =========")?;
    writeln!(
        out,
        "# ./sim {} {} {} {}",
        config.rob_size, config.iq_size, config.width, trace_path
    )?;
    writeln!(out, "# === Processor Configuration ===")?;
    writeln!(out, "# ROB_SIZE = {}", config.rob_size)?;
    writeln!(out, "# IQ_SIZE  = {}", config.iq_size)?;
    writeln!(out, "# WIDTH    = {}", config.width)?;
    writeln!(out, "# === Simulation Results ========")?;
    writeln!(out, "# Dynamic Instruction Count    = {}", stats.instructions)?;
    writeln!(out, "# Cycles                       = {}", stats.cycles)?;
    writeln!(out, "# Instructions Per Cycle (IPC) = {:.2}", stats.ipc())?;
    Ok(())
}
