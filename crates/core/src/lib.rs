//! Superscalar out-of-order pipeline timing simulator library.
//!
//! This crate implements a cycle-accurate timing model of a dynamically
//! scheduled processor with the following:
//! 1. **Pipeline:** Nine stages (Fetch, Decode, Rename, RegRead, Dispatch,
//!    Issue, Execute, Writeback, Retire) evaluated in reverse program order
//!    each cycle.
//! 2. **Dynamic scheduling:** Register renaming through a reorder buffer,
//!    an age-ordered issue queue, and wake-up/bypass forwarding.
//! 3. **Trace input:** A deterministic instruction trace drives the model;
//!    no data values are computed, only timing.
//! 4. **Simulation:** `Simulator` (owns the pipeline and the trace source),
//!    per-retirement timing report, configuration, and statistics.

/// Common types (architectural registers, errors).
pub mod common;
/// Simulator configuration (machine parameters and validation).
pub mod config;
/// Pipeline engine (latches, ROB, RMT, issue queue, stage logic).
pub mod pipeline;
/// Simulation driver: `Simulator` and the retirement report format.
pub mod sim;
/// Simulation statistics collection.
pub mod stats;
/// Instruction trace parsing.
pub mod trace;

/// Machine parameters; construct with `SimConfig::new` or deserialize.
pub use crate::config::SimConfig;
/// Top-level simulator; owns the pipeline and the trace source.
pub use crate::sim::simulator::Simulator;
