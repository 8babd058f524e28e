//! Parsing statistics for NEM12 file scans

use serde::{Deserialize, Serialize};

/// Statistics for one NEM12 file scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Total number of lines consumed, including blank lines
    pub lines_processed: usize,

    /// Number of NMI blocks opened (200 records)
    pub nmi_blocks: usize,

    /// Number of 300 records decoded
    pub interval_records: usize,

    /// Number of readings accepted and forwarded to the reading sink
    pub readings_accepted: usize,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "{} lines, {} NMI blocks, {} interval records, {} readings accepted",
            self.lines_processed, self.nmi_blocks, self.interval_records, self.readings_accepted
        )
    }
}
