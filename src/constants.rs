//! Application constants for NEM12 processor
//!
//! This module contains the NEM12 grammar constants, numeric format limits,
//! and default values used throughout the NEM12 processor application.

// =============================================================================
// NEM12 Record Grammar
// =============================================================================

/// Record indicator codes as defined in the NEM12 specification
pub mod record_codes {
    /// File header record
    pub const HEADER: u16 = 100;

    /// NMI data details record (opens an NMI block)
    pub const NMI_DATA: u16 = 200;

    /// Interval data record
    pub const INTERVAL_DATA: u16 = 300;

    /// Interval event record
    pub const INTERVAL_EVENT: u16 = 400;

    /// B2B details record (closes an NMI block)
    pub const B2B_DETAIL: u16 = 500;

    /// End of data record
    pub const FILE_END: u16 = 900;
}

/// Version header literal expected in the 100 record
pub const NEM12_VERSION_HEADER: &str = "NEM12";

/// Exact field count of a 100 header record
pub const HEADER_FIELD_COUNT: usize = 5;

/// Minimum field count of a 200 NMI data record
pub const NMI_DATA_MIN_FIELDS: usize = 9;

/// Position of the NMI within a 200 record
pub const NMI_FIELD_INDEX: usize = 1;

/// Position of the interval length within a 200 record
pub const INTERVAL_LENGTH_FIELD_INDEX: usize = 8;

/// Fixed (non-value) fields of a 300 record: record indicator, interval
/// date, and the five trailing quality/metadata fields
pub const INTERVAL_FIXED_FIELD_COUNT: usize = 7;

/// Minimum field count of a 300 record: record indicator, interval date,
/// at least one interval value, quality method
pub const INTERVAL_MIN_FIELDS: usize = 4;

/// Maximum length of the from/to participant identifiers
pub const MAX_PARTICIPANT_LEN: usize = 10;

/// Maximum length of an NMI
pub const MAX_NMI_LEN: usize = 10;

// =============================================================================
// Time and Date Formats
// =============================================================================

/// Minutes in a calendar day; every interval length must divide this evenly
pub const MINUTES_PER_DAY: u32 = 1440;

/// Interval date format used in 300 records (YYYYMMDD)
pub const INTERVAL_DATE_FORMAT: &str = "%Y%m%d";

/// Header date/time format used in 100 records (YYYYMMDDHHmm)
pub const HEADER_DATETIME_FORMAT: &str = "%Y%m%d%H%M";

/// Timestamp format used in generated SQL output
pub const SQL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Consumption Format (NEM12 "15.4" rule)
// =============================================================================

/// Maximum digits before the decimal point of a consumption value
pub const MAX_INTEGER_DIGITS: u32 = 15;

/// Maximum digits after the decimal point of a consumption value
pub const MAX_FRACTIONAL_DIGITS: u32 = 4;

// =============================================================================
// Output Defaults
// =============================================================================

/// Default number of readings buffered before a SQL batch is flushed
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Table receiving accepted readings in generated SQL
pub const METER_READINGS_TABLE: &str = "meter_readings";

/// Table receiving classified failures in generated SQL
pub const FAILED_READINGS_TABLE: &str = "failed_readings";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_interval_lengths_divide_a_day() {
        for interval in [1u32, 5, 15, 30, 60] {
            assert_eq!(MINUTES_PER_DAY % interval, 0);
        }
    }

    #[test]
    fn test_record_codes_are_distinct() {
        let codes = [
            record_codes::HEADER,
            record_codes::NMI_DATA,
            record_codes::INTERVAL_DATA,
            record_codes::INTERVAL_EVENT,
            record_codes::B2B_DETAIL,
            record_codes::FILE_END,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in codes.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
