//! Composite failure handler
//!
//! Fans one failure stream out to multiple handlers, combining strategies
//! such as SQL persistence and logging. A fault in one delegate must not
//! suppress the record from the others, nor abort the scan.

use std::collections::HashMap;

use tracing::error;

use super::FailureHandler;
use crate::Result;
use crate::app::models::{FailureReason, FailureRecord};

/// Failure handler that delegates to a list of handlers
pub struct CompositeFailureHandler {
    handlers: Vec<Box<dyn FailureHandler>>,
}

impl CompositeFailureHandler {
    /// Create a composite over the given handlers
    pub fn new(handlers: Vec<Box<dyn FailureHandler>>) -> Self {
        Self { handlers }
    }
}

impl FailureHandler for CompositeFailureHandler {
    fn report(&mut self, failure: &FailureRecord) -> Result<()> {
        for handler in &mut self.handlers {
            if let Err(e) = handler.report(failure) {
                // Keep delivering to the remaining handlers
                error!("Failure handler error: {e}");
            }
        }
        Ok(())
    }

    fn statistics(&self) -> HashMap<FailureReason, u64> {
        let mut aggregated = HashMap::new();
        for handler in &self.handlers {
            for (reason, count) in handler.statistics() {
                *aggregated.entry(reason).or_insert(0) += count;
            }
        }
        aggregated
    }

    fn close(&mut self) -> Result<()> {
        for handler in &mut self.handlers {
            if let Err(e) = handler.close() {
                error!("Error closing failure handler: {e}");
            }
        }
        Ok(())
    }
}
