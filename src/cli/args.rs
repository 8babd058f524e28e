//! Command-line argument definitions for NEM12 processor
//!
//! This module defines the CLI interface using the clap derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::app::services::sql_writer::SqlFormat;
use crate::constants::DEFAULT_BATCH_SIZE;
use crate::{Error, Result};

/// CLI arguments for the NEM12 processor
///
/// Converts NEM12-format electricity interval-meter data into SQL batch
/// load scripts, classifying malformed values instead of aborting the file.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "nem12-processor",
    version,
    about = "Convert NEM12 interval-meter files into SQL batch load scripts",
    long_about = "Parses NEM12-format electricity interval-meter files, expands interval data \
                  records into timestamped meter readings, and writes them as SQL batch load \
                  scripts. Malformed values are classified and counted per reason instead of \
                  failing the whole file; structural format violations abort with the offending \
                  line number."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the NEM12 processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse a NEM12 file and generate SQL output (main command)
    Parse(ParseArgs),
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// NEM12 input file to parse
    #[arg(value_name = "INPUT", help = "NEM12 input file to parse")]
    pub input_path: PathBuf,

    /// Output path for the generated reading SQL
    #[arg(value_name = "OUTPUT", help = "Output path for generated SQL")]
    pub output_path: PathBuf,

    /// SQL generation strategy
    ///
    /// `batch-insert` writes portable multi-row INSERT statements;
    /// `copy` writes PostgreSQL COPY input for the fastest bulk load.
    #[arg(
        short = 'f',
        long = "format",
        value_name = "FORMAT",
        default_value = "batch-insert",
        help = "SQL generation strategy"
    )]
    pub format: SqlFormat,

    /// Number of readings buffered before a SQL batch is flushed
    #[arg(
        long = "batch-size",
        value_name = "N",
        default_value_t = DEFAULT_BATCH_SIZE,
        help = "Readings per SQL batch"
    )]
    pub batch_size: usize,

    /// Destination for persisted failure SQL
    ///
    /// Defaults to the readings output path with a `_failures` suffix.
    /// Failures are always logged and counted regardless of this setting.
    #[arg(
        long = "fail-output",
        value_name = "PATH",
        help = "Output path for failed readings SQL"
    )]
    pub fail_output: Option<PathBuf>,

    /// Skip failure persistence entirely
    #[arg(long = "no-fail-output", help = "Do not persist failed readings")]
    pub no_fail_output: bool,

    /// Report format for the final summary
    #[arg(
        long = "report",
        value_name = "FORMAT",
        default_value = "human",
        help = "Report format for the final summary"
    )]
    pub report: ReportFormat,

    /// Suppress informational logging
    #[arg(short = 'q', long = "quiet", help = "Suppress informational output")]
    pub quiet: bool,

    /// Enable verbose (debug) logging
    #[arg(short = 'v', long = "verbose", help = "Enable verbose logging")]
    pub verbose: bool,
}

/// Final report output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary
    Human,
    /// Machine-readable JSON
    Json,
}

impl ParseArgs {
    /// Validate argument combinations before any work starts
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::configuration("Batch size must be positive"));
        }

        if self.quiet && self.verbose {
            return Err(Error::configuration(
                "--quiet and --verbose are mutually exclusive",
            ));
        }

        if self.no_fail_output && self.fail_output.is_some() {
            return Err(Error::configuration(
                "--no-fail-output and --fail-output are mutually exclusive",
            ));
        }

        Ok(())
    }

    /// Effective tracing level for this invocation
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }
}
