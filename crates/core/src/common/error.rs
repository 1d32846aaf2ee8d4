//! Error types for simulator setup and input handling.
//!
//! Runtime pipeline behavior never surfaces errors: a malformed or truncated
//! trace is treated as end-of-trace, and internal invariant violations abort.
//! Only setup (configuration, trace file access) is fallible.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while setting up a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// The trace file could not be opened.
    #[error("unable to open trace file {}: {source}", path.display())]
    TraceOpen {
        /// Path that was passed on the command line.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A machine parameter is outside its valid range.
    #[error("invalid configuration: {0}")]
    Config(String),
}
