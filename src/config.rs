//! Configuration management and validation
//!
//! Provides configuration structures for the parse workflow: input/output
//! locations, SQL generation strategy, and batching policy. Defaults mirror
//! the CLI defaults; `validate` runs before any file is touched.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::app::services::sql_writer::SqlFormat;
use crate::constants::DEFAULT_BATCH_SIZE;
use crate::{Error, Result};

/// Complete configuration for one processing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input handling settings
    pub processing: ProcessingConfig,

    /// SQL output settings
    pub output: OutputConfig,
}

/// Input handling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// NEM12 input file to scan
    pub input_path: PathBuf,
}

/// SQL output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Destination for generated reading SQL
    pub output_path: PathBuf,

    /// SQL generation strategy
    pub format: SqlFormat,

    /// Readings buffered before a batch is flushed
    pub batch_size: usize,

    /// Destination for persisted failure SQL; `None` disables persistence
    pub failure_output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            processing: ProcessingConfig {
                input_path: PathBuf::from("meterdata.csv"),
            },
            output: OutputConfig {
                output_path: PathBuf::from("output.sql"),
                format: SqlFormat::BatchInsert,
                batch_size: DEFAULT_BATCH_SIZE,
                failure_output: None,
            },
        }
    }
}

impl Config {
    /// Validate the configuration before processing starts
    pub fn validate(&self) -> Result<()> {
        if self.output.batch_size == 0 {
            return Err(Error::configuration("Batch size must be positive"));
        }

        if !self.processing.input_path.exists() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.processing.input_path.display()
            )));
        }

        Ok(())
    }

    /// Default failure output path next to the readings output
    ///
    /// `output.sql` becomes `output_failures.sql`.
    pub fn derived_failure_output(output_path: &Path) -> PathBuf {
        let stem = output_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        output_path.with_file_name(format!("{stem}_failures.sql"))
    }
}
