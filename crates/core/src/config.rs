//! Configuration for the pipeline timing model.
//!
//! Three machine parameters govern the model: reorder buffer capacity,
//! issue queue capacity, and superscalar width. All other timing behavior
//! (stage count, per-class execution latencies) is fixed by the model.

use serde::Deserialize;

use crate::common::SimError;

/// Machine parameters for one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimConfig {
    /// Reorder buffer capacity in entries.
    pub rob_size: usize,
    /// Issue queue capacity in entries.
    pub iq_size: usize,
    /// Superscalar width: the per-cycle bundle limit for fetch through
    /// dispatch, the issue bandwidth, and the retire bandwidth.
    pub width: usize,
}

impl SimConfig {
    /// Creates a configuration from raw parameters.
    ///
    /// Call [`SimConfig::validate`] before building a pipeline with it.
    pub fn new(rob_size: usize, iq_size: usize, width: usize) -> Self {
        Self {
            rob_size,
            iq_size,
            width,
        }
    }

    /// Checks that every parameter is in its valid range.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if any capacity or the width is zero.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.rob_size == 0 {
            return Err(SimError::Config("ROB size must be positive".into()));
        }
        if self.iq_size == 0 {
            return Err(SimError::Config("IQ size must be positive".into()));
        }
        if self.width == 0 {
            return Err(SimError::Config("width must be positive".into()));
        }
        Ok(())
    }
}
