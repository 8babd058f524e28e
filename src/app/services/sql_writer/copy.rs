//! PostgreSQL COPY command generation
//!
//! Emits a `COPY ... FROM STDIN WITH (FORMAT CSV)` header followed by CSV
//! rows and the `\.` terminator. Fastest bulk load path for PostgreSQL.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use super::ReadingSink;
use crate::app::models::MeterReading;
use crate::constants::{METER_READINGS_TABLE, SQL_TIMESTAMP_FORMAT};
use crate::{Error, Result};

/// Reading sink producing PostgreSQL COPY input
#[derive(Debug)]
pub struct CopyWriter {
    writer: BufWriter<File>,
    header_written: bool,
}

impl CopyWriter {
    /// Create a writer targeting `output_path`
    pub fn create(output_path: &Path) -> Result<Self> {
        let file = File::create(output_path).map_err(|e| {
            Error::sql_output(
                format!("Failed to create output file {}", output_path.display()),
                e,
            )
        })?;

        Ok(Self {
            writer: BufWriter::new(file),
            header_written: false,
        })
    }

    fn write_header(&mut self) -> Result<()> {
        writeln!(
            self.writer,
            "COPY {METER_READINGS_TABLE} (nmi, timestamp, consumption) FROM STDIN WITH (FORMAT CSV);"
        )
        .map_err(|e| Error::sql_output("Failed to write COPY header", e))
    }
}

impl ReadingSink for CopyWriter {
    fn add_reading(&mut self, reading: &MeterReading) -> Result<()> {
        if !self.header_written {
            self.write_header()?;
            self.header_written = true;
        }

        writeln!(
            self.writer,
            "{},{},{}",
            reading.nmi,
            reading.timestamp.format(SQL_TIMESTAMP_FORMAT),
            reading.consumption
        )
        .map_err(|e| Error::sql_output("Failed to write COPY row", e))
    }

    fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| Error::sql_output("Failed to flush output file", e))
    }

    fn close(&mut self) -> Result<()> {
        if self.header_written {
            writeln!(self.writer, "\\.")
                .map_err(|e| Error::sql_output("Failed to write COPY terminator", e))?;
        }
        self.flush()?;
        info!("CopyWriter closed");
        Ok(())
    }
}
