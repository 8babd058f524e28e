//! NEM12 Processor Library
//!
//! A Rust library for converting NEM12-format electricity interval-meter
//! files into SQL batch load scripts.
//!
//! This library provides tools for:
//! - Parsing NEM12 files with a block-structure state machine (100/200/300/400/500/900 records)
//! - Expanding interval data records into timestamped meter readings
//! - Classifying and counting malformed values instead of aborting the whole file
//! - Writing readings as batch INSERT statements or PostgreSQL COPY input
//! - Persisting and aggregating per-reason failure statistics

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod failure_handler;
        pub mod nem12_parser;
        pub mod sql_writer;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{FailureReason, FailureRecord, MeterReading, RecordType};
pub use config::Config;

/// Result type alias for the NEM12 processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for NEM12 processing operations
///
/// Fatal parse errors carry the 1-based line number of the offending record;
/// recoverable per-value failures never surface here; they travel through
/// the failure handler as [`FailureRecord`](app::models::FailureRecord)s.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Fatal NEM12 format violation that invalidates the whole file
    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// SQL output generation error
    #[error("SQL output error: {message}")]
    SqlOutput {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Report serialization error
    #[error("Report serialization error: {message}")]
    Report {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a fatal parse error at a given 1-based line number
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a SQL output error with context
    pub fn sql_output(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::SqlOutput {
            message: message.into(),
            source,
        }
    }

    /// Create a report serialization error
    pub fn report(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Report {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
