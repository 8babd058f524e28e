//! Batch INSERT statement generation
//!
//! Standard SQL output for compatibility across databases. Readings are
//! buffered and written as one multi-row INSERT per batch.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use super::{ReadingSink, escape_string};
use crate::app::models::MeterReading;
use crate::constants::{METER_READINGS_TABLE, SQL_TIMESTAMP_FORMAT};
use crate::{Error, Result};

/// Reading sink producing batched multi-row INSERT statements
#[derive(Debug)]
pub struct BatchInsertWriter {
    writer: BufWriter<File>,
    buffer: Vec<MeterReading>,
    batch_size: usize,
}

impl BatchInsertWriter {
    /// Create a writer targeting `output_path`, flushing every
    /// `batch_size` readings
    pub fn create(output_path: &Path, batch_size: usize) -> Result<Self> {
        let file = File::create(output_path).map_err(|e| {
            Error::sql_output(
                format!("Failed to create output file {}", output_path.display()),
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
            "INSERT INTO {METER_READINGS_TABLE} (nmi, timestamp, consumption) VALUES"
        );

        for (index, reading) in self.buffer.iter().enumerate() {
            let _ = write!(
                sql,
                "('{}', '{}', {})",
                escape_string(&reading.nmi),
                reading.timestamp.format(SQL_TIMESTAMP_FORMAT),
                reading.consumption
            );
            sql.push_str(if index < self.buffer.len() - 1 {
                ",\n"
            } else {
                ";\n\n"
            });
        }

        self.writer
            .write_all(sql.as_bytes())
            .map_err(|e| Error::sql_output("Failed to write reading batch", e))?;

        debug!("Flushed {} readings to SQL", self.buffer.len());
        self.buffer.clear();
        Ok(())
    }
}

impl ReadingSink for BatchInsertWriter {
    fn add_reading(&mut self, reading: &MeterReading) -> Result<()> {
        self.buffer.push(reading.clone());

        if self.buffer.len() >= self.batch_size {
            self.flush_buffer()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flush_buffer()?;
        self.writer
            .flush()
            .map_err(|e| Error::sql_output("Failed to flush output file", e))
    }

    fn close(&mut self) -> Result<()> {
        self.flush()?;
        info!("BatchInsertWriter closed");
        Ok(())
    }
}
