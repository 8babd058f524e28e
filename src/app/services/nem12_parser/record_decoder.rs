//! Interval data record decoding
//!
//! Expands one 300 record into timestamped readings. Individual bad values
//! are classified, reported, and skipped; the record is never rejected
//! wholesale because of one bad slot. Only structural problems (wrong slot
//! count, unparseable date) abort the record, because slot alignment cannot
//! be trusted once the field layout is wrong.

use tracing::warn;

use super::field_parsers::{parse_consumption, parse_interval_date};
use super::timestamp::interval_timestamp;
use crate::app::models::{FailureReason, FailureRecord, MeterReading};
use crate::app::services::failure_handler::FailureHandler;
use crate::constants::{INTERVAL_FIXED_FIELD_COUNT, INTERVAL_MIN_FIELDS, MINUTES_PER_DAY};

/// Decoder for 300 (interval data) records
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalRecordDecoder;

impl IntervalRecordDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self
    }

    /// Decode one 300 record into meter readings
    ///
    /// Every per-value problem is reported to `failures` as a side effect
    /// rather than returned as an error. Record-level structural failures
    /// (an interval length that does not divide a day, missing mandatory
    /// fields, slot count mismatch, bad interval date) abort the record and
    /// yield no readings, without partial emission.
    pub fn decode(
        &self,
        line: &str,
        nmi: &str,
        interval_minutes: u32,
        line_number: usize,
        failures: &mut dyn FailureHandler,
    ) -> Vec<MeterReading> {
        // The block-opening 200 record validates the interval length, but
        // decode is also callable directly; a length that does not divide a
        // day makes slot expansion undefined
        if interval_minutes == 0 || MINUTES_PER_DAY % interval_minutes != 0 {
            self.report_record_failure(failures, line_number, nmi, line, FailureReason::Unknown);
            return Vec::new();
        }

        let fields: Vec<&str> = line.split(',').collect();

        // Mandatory fields: record indicator, interval date, at least one
        // interval value, quality method
        if fields.len() < INTERVAL_MIN_FIELDS {
            self.report_record_failure(
                failures,
                line_number,
                nmi,
                line,
                FailureReason::InvalidFields,
            );
            return Vec::new();
        }

        let expected_slots = (MINUTES_PER_DAY / interval_minutes) as usize;
        if fields.len() != expected_slots + INTERVAL_FIXED_FIELD_COUNT {
            self.report_record_failure(
                failures,
                line_number,
                nmi,
                line,
                FailureReason::IntervalCountMismatch,
            );
            return Vec::new();
        }

        // No timestamp can be computed for any slot without a valid date
        let Some(date) = parse_interval_date(fields[1]) else {
            self.report_record_failure(
                failures,
                line_number,
                nmi,
                fields[1],
                FailureReason::InvalidDateFormat,
            );
            return Vec::new();
        };

        let mut readings = Vec::with_capacity(expected_slots);
        for index in 0..expected_slots {
            let raw = fields[index + 2];
            // The slot timestamp derives only from date and index, so it is
            // known even for rejected values
            let timestamp = interval_timestamp(date, interval_minutes, index);

            match parse_consumption(raw) {
                Ok(consumption) => {
                    readings.push(MeterReading::new(nmi, timestamp, consumption));
                }
                Err(reason) => {
                    self.report(
                        failures,
                        FailureRecord {
                            line_number,
                            nmi: Some(nmi.to_string()),
                            interval_index: Some(index),
                            raw_value: raw.to_string(),
                            reason,
                            timestamp: Some(timestamp),
                        },
                    );
                }
            }
        }

        readings
    }

    fn report_record_failure(
        &self,
        failures: &mut dyn FailureHandler,
        line_number: usize,
        nmi: &str,
        raw_value: &str,
        reason: FailureReason,
    ) {
        self.report(
            failures,
            FailureRecord {
                line_number,
                nmi: Some(nmi.to_string()),
                interval_index: None,
                raw_value: raw_value.to_string(),
                reason,
                timestamp: None,
            },
        );
    }

    fn report(&self, failures: &mut dyn FailureHandler, failure: FailureRecord) {
        // Reporting must never abort decoding of the remaining slots
        if let Err(e) = failures.report(&failure) {
            warn!("Failure handler error: {e}");
        }
    }
}
