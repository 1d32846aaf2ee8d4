//! Instruction trace parsing.
//!
//! A trace is a text file with one operation per line:
//!
//! ```text
//! <pc in hex> <op_type> <dest> <src1> <src2>
//! ```
//!
//! `op_type` selects the execution latency class; the register fields are
//! decimal ids in `[0, 66]` or `-1` for "none". Parsing is deliberately
//! forgiving only about blank lines: the first malformed line (including an
//! out-of-range register id) is reported and treated as end-of-trace, so no
//! partial record ever enters the pipeline.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use crate::common::{ArchReg, SimError};

/// Execution latency class of a traced operation.
///
/// The class fixes how many cycles the operation spends in Execute; no other
/// functional-unit structure is modeled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpType {
    /// Single-cycle operation (trace code 0).
    Short,
    /// Two-cycle operation (trace code 1).
    Medium,
    /// Five-cycle operation (trace code 2).
    Long,
}

impl OpType {
    /// Decodes a trace op-type code, or `None` for an unknown code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Short),
            1 => Some(Self::Medium),
            2 => Some(Self::Long),
            _ => None,
        }
    }

    /// The op-type code as it appears in the trace and the report.
    #[inline]
    pub fn code(self) -> u32 {
        match self {
            Self::Short => 0,
            Self::Medium => 1,
            Self::Long => 2,
        }
    }

    /// Execute-stage occupancy in cycles.
    #[inline]
    pub fn latency(self) -> u64 {
        match self {
            Self::Short => 1,
            Self::Medium => 2,
            Self::Long => 5,
        }
    }
}

/// One operation read from the trace, before it enters the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceOp {
    /// Program counter, preserved verbatim for the report.
    pub pc: u64,
    /// Execution latency class.
    pub op: OpType,
    /// Architectural destination register, if any.
    pub dst: Option<ArchReg>,
    /// First architectural source register, if any.
    pub src1: Option<ArchReg>,
    /// Second architectural source register, if any.
    pub src2: Option<ArchReg>,
}

/// Streaming trace reader over any buffered byte source.
///
/// Yields operations until end of file or the first malformed line; either
/// way the iterator is fused afterwards.
#[derive(Debug)]
pub struct TraceReader<R> {
    input: R,
    line_no: u64,
    done: bool,
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file for reading.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::TraceOpen`] if the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self, SimError> {
        let file = File::open(path).map_err(|source| SimError::TraceOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps an already-buffered source.
    pub fn new(input: R) -> Self {
        Self {
            input,
            line_no: 0,
            done: false,
        }
    }
}

/// Parses a register operand field: a decimal id in `[0, 66]` or `-1`.
fn parse_operand(field: &str) -> Option<Option<ArchReg>> {
    let value: i64 = field.parse().ok()?;
    if value == -1 {
        return Some(None);
    }
    let index = usize::try_from(value).ok()?;
    ArchReg::new(index).map(Some)
}

/// Parses one non-blank trace line.
fn parse_line(line: &str) -> Option<TraceOp> {
    let mut fields = line.split_whitespace();
    let pc = u64::from_str_radix(fields.next()?.trim_start_matches("0x"), 16).ok()?;
    let op = OpType::from_code(fields.next()?.parse().ok()?)?;
    let dst = parse_operand(fields.next()?)?;
    let src1 = parse_operand(fields.next()?)?;
    let src2 = parse_operand(fields.next()?)?;
    if fields.next().is_some() {
        return None;
    }
    Some(TraceOp {
        pc,
        op,
        dst,
        src1,
        src2,
    })
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = TraceOp;

    fn next(&mut self) -> Option<TraceOp> {
        if self.done {
            return None;
        }
        let mut line = String::new();
        loop {
            line.clear();
            self.line_no += 1;
            match self.input.read_line(&mut line) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(line = self.line_no, error = %e, "trace read failed; ending trace");
                    self.done = true;
                    return None;
                }
            }
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(&line) {
                Some(op) => return Some(op),
                None => {
                    warn!(line = self.line_no, "malformed trace line; ending trace");
                    self.done = true;
                    return None;
                }
            }
        }
    }
}
