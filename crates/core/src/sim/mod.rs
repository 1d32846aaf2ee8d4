//! Simulation driver and retirement report.

/// Report formatting: per-instruction timing lines and the summary block.
pub mod report;
/// Top-level `Simulator` run loop.
pub mod simulator;

pub use report::{TimingLine, write_summary};
pub use simulator::Simulator;
