//! In-memory failure aggregation
//!
//! The default aggregator: retains every reported record and folds the
//! stream into per-reason counts. Suitable for library callers that want to
//! inspect failures after a scan without any persistence.

use std::collections::HashMap;

use super::FailureHandler;
use crate::Result;
use crate::app::models::{FailureReason, FailureRecord};

/// Failure handler that keeps all reported failures in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryFailureHandler {
    records: Vec<FailureRecord>,
    counts: HashMap<FailureReason, u64>,
}

impl InMemoryFailureHandler {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// All failures reported so far, in report order
    pub fn records(&self) -> &[FailureRecord] {
        &self.records
    }

    /// Total number of reported failures
    pub fn total_failures(&self) -> u64 {
        self.counts.values().sum()
    }
}

impl FailureHandler for InMemoryFailureHandler {
    fn report(&mut self, failure: &FailureRecord) -> Result<()> {
        *self.counts.entry(failure.reason).or_insert(0) += 1;
        self.records.push(failure.clone());
        Ok(())
    }

    fn statistics(&self) -> HashMap<FailureReason, u64> {
        self.counts.clone()
    }
}
