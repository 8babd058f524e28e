//! Logging failure handler
//!
//! Logs each failure for monitoring and debugging and aggregates per-reason
//! counts. Does not persist anything.

use std::collections::HashMap;

use tracing::{info, warn};

use super::FailureHandler;
use crate::Result;
use crate::app::models::{FailureReason, FailureRecord};

/// Failure handler that logs failures through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LoggingFailureHandler {
    counts: HashMap<FailureReason, u64>,
}

impl LoggingFailureHandler {
    /// Create a handler with empty statistics
    pub fn new() -> Self {
        Self::default()
    }
}

impl FailureHandler for LoggingFailureHandler {
    fn report(&mut self, failure: &FailureRecord) -> Result<()> {
        warn!(
            line = failure.line_number,
            reason = %failure.reason,
            nmi = failure.nmi.as_deref().unwrap_or("-"),
            interval = ?failure.interval_index,
            timestamp = ?failure.timestamp,
            raw = %failure.raw_value,
            "Parsing failure"
        );

        *self.counts.entry(failure.reason).or_insert(0) += 1;
        Ok(())
    }

    fn statistics(&self) -> HashMap<FailureReason, u64> {
        self.counts.clone()
    }

    fn close(&mut self) -> Result<()> {
        let total: u64 = self.counts.values().sum();
        if total > 0 {
            info!("Logging handler closed, {total} failures recorded");
        }
        Ok(())
    }
}
