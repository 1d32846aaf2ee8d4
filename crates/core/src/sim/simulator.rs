//! Simulator: owns the pipeline and the trace source, drives the run loop.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

use tracing::debug;

use crate::common::SimError;
use crate::config::SimConfig;
use crate::pipeline::Pipeline;
use crate::sim::report::TimingLine;
use crate::stats::SimStats;
use crate::trace::{TraceOp, TraceReader};

/// Top-level simulator: pipeline plus the retirement sequence counter.
#[derive(Debug)]
pub struct Simulator<S> {
    pipeline: Pipeline<S>,
    seq: u64,
}

impl Simulator<TraceReader<BufReader<File>>> {
    /// Builds a simulator streaming from a trace file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] for out-of-range parameters or
    /// [`SimError::TraceOpen`] if the file cannot be opened.
    pub fn from_trace_file(config: &SimConfig, path: &Path) -> Result<Self, SimError> {
        config.validate()?;
        let reader = TraceReader::open(path)?;
        Ok(Self::new(config, reader))
    }
}

impl<S: Iterator<Item = TraceOp>> Simulator<S> {
    /// Builds a simulator over any trace source.
    pub fn new(config: &SimConfig, source: S) -> Self {
        Self {
            pipeline: Pipeline::new(config, source),
            seq: 0,
        }
    }

    /// Runs the simulation to completion, writing one timing line per
    /// retired instruction to `out` in program order.
    ///
    /// # Errors
    ///
    /// Propagates any write error from `out`.
    pub fn run<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        loop {
            let more = self.pipeline.advance();
            for rec in self.pipeline.drain_retired() {
                let line = TimingLine {
                    seq: self.seq,
                    inst: &rec,
                };
                writeln!(out, "{line}")?;
                self.seq += 1;
            }
            if !more {
                break;
            }
        }
        let stats = self.pipeline.stats();
        debug!(
            cycles = stats.cycles,
            instructions = stats.instructions,
            rob_stall_cycles = stats.rob_stall_cycles,
            iq_stall_cycles = stats.iq_stall_cycles,
            "simulation complete"
        );
        Ok(())
    }

    /// Aggregate counters for the run.
    #[inline]
    pub fn stats(&self) -> &SimStats {
        self.pipeline.stats()
    }
}
