//! NEM12 parser for electricity interval-meter data files
//!
//! This module implements the core of the processor: a block-structure
//! state machine over NEM12 record lines and a failure-tolerant decoder
//! that expands interval data records into timestamped readings.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`parser`] - the record state machine driving a single file scan
//! - [`record_decoder`] - expansion of 300 records into meter readings
//! - [`timestamp`] - end-boundary interval timestamp calculation
//! - [`field_parsers`] - pure field validators and parsers
//! - [`stats`] - scan statistics
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nem12_processor::app::services::failure_handler::InMemoryFailureHandler;
//! use nem12_processor::app::services::nem12_parser::Nem12Parser;
//! use nem12_processor::app::services::sql_writer::{SqlFormat, create_writer};
//!
//! # fn example() -> nem12_processor::Result<()> {
//! let mut sink = create_writer(SqlFormat::BatchInsert, "readings.sql".as_ref(), 1000)?;
//! let mut failures = InMemoryFailureHandler::new();
//!
//! let mut parser = Nem12Parser::new(sink.as_mut(), &mut failures);
//! let stats = parser.parse_file("meterdata.csv".as_ref())?;
//! sink.close()?;
//!
//! println!("Accepted {} readings", stats.readings_accepted);
//! # Ok(())
//! # }
//! ```

pub mod field_parsers;
pub mod parser;
pub mod record_decoder;
pub mod stats;
pub mod timestamp;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use parser::Nem12Parser;
pub use record_decoder::IntervalRecordDecoder;
pub use stats::ParseStats;
pub use timestamp::interval_timestamp;
