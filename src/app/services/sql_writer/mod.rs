//! SQL output generation for accepted meter readings
//!
//! Accepted readings flow into a [`ReadingSink`], which owns batching and
//! flushing policy. Two generation strategies are provided:
//!
//! - [`batch_insert`] - buffered multi-row INSERT statements, the portable
//!   default
//! - [`copy`] - PostgreSQL `COPY ... FROM STDIN` input, the fastest bulk
//!   load path for PostgreSQL
//!
//! The parser calls `add_reading` once per accepted reading and `close`
//! exactly once after a successful scan.

pub mod batch_insert;
pub mod copy;


// Re-export main types for easy access
pub use batch_insert::BatchInsertWriter;
pub use copy::CopyWriter;

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::app::models::MeterReading;

/// Sink for accepted meter readings
///
/// Batching and transaction policy belong to the implementation; callers
/// just hand over one reading at a time.
pub trait ReadingSink {
    /// Add a meter reading to be written as SQL
    fn add_reading(&mut self, reading: &MeterReading) -> Result<()>;

    /// Flush any buffered data to output
    fn flush(&mut self) -> Result<()>;

    /// Write any trailing output and flush; called once after the scan
    fn close(&mut self) -> Result<()>;
}

/// SQL generation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SqlFormat {
    /// Multi-row INSERT statements
    BatchInsert,
    /// PostgreSQL COPY command input
    Copy,
}

impl std::fmt::Display for SqlFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BatchInsert => f.write_str("batch-insert"),
            Self::Copy => f.write_str("copy"),
        }
    }
}

/// Create a reading sink for the requested SQL format
pub fn create_writer(
    format: SqlFormat,
    output_path: &Path,
    batch_size: usize,
) -> Result<Box<dyn ReadingSink>> {
    match format {
        SqlFormat::BatchInsert => Ok(Box::new(BatchInsertWriter::create(
            output_path,
            batch_size,
        )?)),
        SqlFormat::Copy => Ok(Box::new(CopyWriter::create(output_path)?)),
    }
}

/// Escape a string for inclusion in a single-quoted SQL literal
pub(crate) fn escape_string(value: &str) -> String {
    value.replace('\'', "''")
}
