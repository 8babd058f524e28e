//! SQL-persisting failure handler
//!
//! Writes classified failures as batched multi-row INSERT statements into
//! the `failed_readings` table, alongside the readings output. Statistics
//! are left to the aggregating handlers so a composite never double counts.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use super::FailureHandler;
use crate::app::models::FailureRecord;
use crate::app::services::sql_writer::escape_string;
use crate::constants::{FAILED_READINGS_TABLE, SQL_TIMESTAMP_FORMAT};
use crate::{Error, Result};

/// Failure handler that persists failures as SQL INSERT statements
#[derive(Debug)]
pub struct SqlFailureHandler {
    writer: BufWriter<File>,
    buffer: Vec<FailureRecord>,
    batch_size: usize,
}

impl SqlFailureHandler {
    /// Create a handler writing to `output_path`, flushing every
    /// `batch_size` failures
    pub fn create(output_path: &Path, batch_size: usize) -> Result<Self> {
        let file = File::create(output_path).map_err(|e| {
            Error::sql_output(
                format!("Failed to create failure output {}", output_path.display()),
                e,
            )
        })?;

        Ok(Self {
            writer: BufWriter::new(file),
            buffer: Vec::with_capacity(batch_size),
            batch_size,
        })
    }

    fn flush_buffer(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let mut sql = String::new();
        let _ = writeln!(
            sql,
            "INSERT INTO {FAILED_READINGS_TABLE} \
             (line_number, nmi, interval_index, raw_value, reason, reading_timestamp) VALUES"
        );

        for (index, failure) in self.buffer.iter().enumerate() {
            let nmi = match &failure.nmi {
                Some(nmi) => format!("'{}'", escape_string(nmi)),
                None => "NULL".to_string(),
            };
            let interval_index = match failure.interval_index {
                Some(i) => i.to_string(),
                None => "NULL".to_string(),
            };
            let timestamp = match failure.timestamp {
                Some(ts) => format!("'{}'", ts.format(SQL_TIMESTAMP_FORMAT)),
                None => "NULL".to_string(),
            };

            let _ = write!(
                sql,
                "({}, {}, {}, '{}', '{}', {})",
                failure.line_number,
                nmi,
                interval_index,
                escape_string(&failure.raw_value),
                failure.reason,
                timestamp
            );
            sql.push_str(if index < self.buffer.len() - 1 {
                ",\n"
            } else {
                ";\n\n"
            });
        }

        self.writer
            .write_all(sql.as_bytes())
            .map_err(|e| Error::sql_output("Failed to write failure batch", e))?;

        debug!("Flushed {} failures to SQL", self.buffer.len());
        self.buffer.clear();
        Ok(())
    }
}

impl FailureHandler for SqlFailureHandler {
    fn report(&mut self, failure: &FailureRecord) -> Result<()> {
        self.buffer.push(failure.clone());

        if self.buffer.len() >= self.batch_size {
            self.flush_buffer()?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.flush_buffer()?;
        self.writer
            .flush()
            .map_err(|e| Error::sql_output("Failed to flush failure output", e))?;
        info!("SQL failure handler closed");
        Ok(())
    }
}
