//! Data models for NEM12 processing
//!
//! This module contains the core data structures for representing NEM12
//! records, parser scan state, accepted meter readings, and classified
//! parsing failures, following the AEMO NEM12 specification.

use crate::{Error, Result};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Record Types
// =============================================================================

/// NEM12 record type, derived from the numeric record indicator that opens
/// every line
///
/// The enumeration is closed: any other indicator invalidates the whole
/// file, unlike per-value failures which are recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    /// 100 - file header
    Header,
    /// 200 - NMI data details, opens an NMI block
    NmiData,
    /// 300 - interval data
    IntervalData,
    /// 400 - interval event
    IntervalEvent,
    /// 500 - B2B details, closes an NMI block
    B2bDetail,
    /// 900 - end of data
    FileEnd,
}

impl RecordType {
    /// Look up a record type by its numeric indicator code
    pub fn from_code(code: u16) -> Option<Self> {
        use crate::constants::record_codes;

        match code {
            record_codes::HEADER => Some(Self::Header),
            record_codes::NMI_DATA => Some(Self::NmiData),
            record_codes::INTERVAL_DATA => Some(Self::IntervalData),
            record_codes::INTERVAL_EVENT => Some(Self::IntervalEvent),
            record_codes::B2B_DETAIL => Some(Self::B2bDetail),
            record_codes::FILE_END => Some(Self::FileEnd),
            _ => None,
        }
    }

    /// Derive the record type from the first three characters of a line
    ///
    /// Record indicators are Numeric(3), so the line must start with three
    /// digits naming a known record type. Anything else is a fatal error
    /// carrying `line_number`.
    pub fn from_line(line: &str, line_number: usize) -> Result<Self> {
        let indicator: String = line.chars().take(3).collect();
        if indicator.len() < 3 {
            return Err(Error::parse(
                line_number,
                format!("Invalid line format: '{line}'"),
            ));
        }

        let code = indicator.parse::<u16>().map_err(|_| {
            Error::parse(
                line_number,
                format!("Invalid record indicator: '{indicator}'"),
            )
        })?;

        Self::from_code(code)
            .ok_or_else(|| Error::parse(line_number, format!("Unknown record type: {code}")))
    }

    /// Numeric indicator code of this record type
    pub fn code(&self) -> u16 {
        use crate::constants::record_codes;

        match self {
            Self::Header => record_codes::HEADER,
            Self::NmiData => record_codes::NMI_DATA,
            Self::IntervalData => record_codes::INTERVAL_DATA,
            Self::IntervalEvent => record_codes::INTERVAL_EVENT,
            Self::B2bDetail => record_codes::B2B_DETAIL,
            Self::FileEnd => record_codes::FILE_END,
        }
    }
}

// =============================================================================
// Parser Scan State
// =============================================================================

/// Mutable cursor over a single NEM12 file scan
///
/// One `ParserState` is created per file and owned exclusively by that scan;
/// it must never be reused across files. Whether the scan is inside an NMI
/// block is derived from `current_nmi`, so the block invariant cannot drift
/// out of sync with the captured NMI.
#[derive(Debug, Clone, Default)]
pub struct ParserState {
    /// NMI of the currently open block, if any
    current_nmi: Option<String>,

    /// Interval length in minutes declared by the open block's 200 record
    interval_minutes: u32,

    /// 1-based number of the line being processed
    line_number: usize,

    /// Whether a valid 100 header has been consumed
    header_seen: bool,

    /// Whether a 900 end-of-data record has been consumed
    file_ended: bool,
}

impl ParserState {
    /// Create the state for a fresh scan
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next line
    pub fn increment_line_number(&mut self) {
        self.line_number += 1;
    }

    /// Open an NMI block, capturing its NMI and interval length
    pub fn start_nmi_block(&mut self, nmi: String, interval_minutes: u32) {
        self.current_nmi = Some(nmi);
        self.interval_minutes = interval_minutes;
    }

    /// Close the open NMI block
    pub fn end_nmi_block(&mut self) {
        self.current_nmi = None;
        self.interval_minutes = 0;
    }

    /// Mark the 100 header as consumed
    pub fn mark_header_seen(&mut self) {
        self.header_seen = true;
    }

    /// Mark the 900 end-of-data record as consumed
    pub fn mark_file_ended(&mut self) {
        self.file_ended = true;
    }

    /// Whether the scan is currently inside an NMI block
    pub fn inside_nmi_block(&self) -> bool {
        self.current_nmi.is_some()
    }

    /// NMI of the currently open block
    pub fn current_nmi(&self) -> Option<&str> {
        self.current_nmi.as_deref()
    }

    /// Interval length of the currently open block in minutes
    pub fn interval_minutes(&self) -> u32 {
        self.interval_minutes
    }

    /// 1-based number of the line being processed
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Whether a valid 100 header has been consumed
    pub fn header_seen(&self) -> bool {
        self.header_seen
    }

    /// Whether a 900 end-of-data record has been consumed
    pub fn file_ended(&self) -> bool {
        self.file_ended
    }
}

// =============================================================================
// Meter Readings
// =============================================================================

/// A single accepted interval meter reading
///
/// Corresponds to one row of the `meter_readings` table in the generated
/// SQL. Produced only by the interval record decoder and never mutated
/// after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterReading {
    /// National Metering Identifier the reading belongs to
    pub nmi: String,

    /// End boundary of the metering interval, minute resolution
    pub timestamp: NaiveDateTime,

    /// Consumption for the interval, exact decimal
    pub consumption: Decimal,
}

impl MeterReading {
    /// Create a new meter reading
    pub fn new(nmi: impl Into<String>, timestamp: NaiveDateTime, consumption: Decimal) -> Self {
        Self {
            nmi: nmi.into(),
            timestamp,
            consumption,
        }
    }
}

// =============================================================================
// Failure Classification
// =============================================================================

/// Classification of a recoverable parsing failure
///
/// The taxonomy is append-only: new failure causes must map onto an existing
/// or new explicit reason, never a generic catch-all beyond [`Unknown`].
///
/// [`Unknown`]: FailureReason::Unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureReason {
    /// Empty or blank value where a valid value is expected
    EmptyValue,

    /// Value is not numeric when a number is expected
    NonNumericValue,

    /// Negative consumption value, not allowed in NEM12
    NegativeValue,

    /// Consumption violates the 15.4 format rule (max 15 integer digits,
    /// max 4 decimal digits)
    InvalidConsumptionFormat,

    /// Interval date does not match the expected YYYYMMDD format
    InvalidDateFormat,

    /// Number of interval values does not match the declared interval length
    IntervalCountMismatch,

    /// Record is missing mandatory fields
    InvalidFields,

    /// Unknown or unclassified error
    Unknown,
}

impl FailureReason {
    /// Every reason in reporting order
    pub const ALL: [FailureReason; 8] = [
        Self::EmptyValue,
        Self::NonNumericValue,
        Self::NegativeValue,
        Self::InvalidConsumptionFormat,
        Self::InvalidDateFormat,
        Self::IntervalCountMismatch,
        Self::InvalidFields,
        Self::Unknown,
    ];

    /// Wire name used in statistics output and persisted failure rows
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyValue => "EMPTY_VALUE",
            Self::NonNumericValue => "NON_NUMERIC_VALUE",
            Self::NegativeValue => "NEGATIVE_VALUE",
            Self::InvalidConsumptionFormat => "INVALID_CONSUMPTION_FORMAT",
            Self::InvalidDateFormat => "INVALID_DATE_FORMAT",
            Self::IntervalCountMismatch => "INTERVAL_COUNT_MISMATCH",
            Self::InvalidFields => "INVALID_FIELDS",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of a single recoverable parsing failure
///
/// Failures are never retried or corrected automatically; they are counted
/// by reason and handed to the configured failure handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// 1-based line number where the failure occurred
    pub line_number: usize,

    /// NMI of the enclosing block, if one was established
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nmi: Option<String>,

    /// 0-based slot index within the 300 record's value list, when the
    /// failure is tied to a single slot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_index: Option<usize>,

    /// The raw offending string
    pub raw_value: String,

    /// Classification of the failure
    pub reason: FailureReason,

    /// Timestamp of the affected slot; absent when the failure occurred
    /// before a timestamp could be computed (e.g. a bad interval date)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,
}
