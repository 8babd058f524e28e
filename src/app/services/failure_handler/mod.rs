//! Failure handling for NEM12 parsing
//!
//! Recoverable per-value failures never abort a scan; they are reported to a
//! [`FailureHandler`] which decides how to process them. Statistics by
//! reason are a fold over the stream of reported records, decoupled from any
//! particular sink: handlers that persist or log may or may not aggregate,
//! and a composite can fan one stream out to several handlers.
//!
//! ## Architecture
//!
//! - [`logging`] - logs failures through `tracing` and aggregates counts
//! - [`memory`] - in-memory aggregator retaining records and counts
//! - [`sql`] - persists failures as batched `failed_readings` inserts
//! - [`composite`] - fans out to multiple handlers with fault isolation

pub mod composite;
pub mod logging;
pub mod memory;
pub mod sql;


// Re-export main types for easy access
pub use composite::CompositeFailureHandler;
pub use logging::LoggingFailureHandler;
pub use memory::InMemoryFailureHandler;
pub use sql::SqlFailureHandler;

use std::collections::HashMap;

use crate::Result;
use crate::app::models::{FailureReason, FailureRecord};

/// Capability consumed by the parser and decoder to report classified
/// failures without halting the scan
///
/// Implementations must not let an internal error propagate back into
/// decoding; callers log a failed `report` and continue.
pub trait FailureHandler {
    /// Handle a single failure record
    fn report(&mut self, failure: &FailureRecord) -> Result<()>;

    /// Per-reason counts observed by this handler
    ///
    /// Handlers that only persist or forward return an empty map so that a
    /// composite never counts the same failure twice.
    fn statistics(&self) -> HashMap<FailureReason, u64> {
        HashMap::new()
    }

    /// Release any resources and flush buffered output
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
