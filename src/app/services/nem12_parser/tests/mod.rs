//! Test utilities and mock infrastructure for NEM12 parser testing
//!
//! This module provides common test utilities, mock sinks, and line
//! builders used across the parser test modules.

use crate::app::models::{FailureReason, FailureRecord, MeterReading};
use crate::app::services::failure_handler::FailureHandler;
use crate::app::services::sql_writer::ReadingSink;
use crate::{Error, Result};
use std::collections::HashMap;

mod field_parser_tests;

/// Reading sink that records everything it receives
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub readings: Vec<MeterReading>,
    pub flushes: usize,
    pub closed: bool,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReadingSink for CollectingSink {
    fn add_reading(&mut self, reading: &MeterReading) -> Result<()> {
        self.readings.push(reading.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.flush()?;
        self.closed = true;
        Ok(())
    }
}

/// Failure handler whose `report` always fails, for fault isolation tests
#[derive(Debug, Default)]
pub struct FailingHandler {
    pub attempts: usize,
}

impl FailureHandler for FailingHandler {
    fn report(&mut self, _failure: &FailureRecord) -> Result<()> {
        self.attempts += 1;
        Err(Error::configuration("handler is broken"))
    }

    fn statistics(&self) -> HashMap<FailureReason, u64> {
        HashMap::new()
    }
}

/// Build a 300 record line with the given interval date and values
///
/// Appends the five trailing quality/metadata fields so that a record with
/// `1440 / interval_minutes` values has the exact expected field count.
pub fn interval_line(date: &str, values: &[&str]) -> String {
    format!("300,{},{},A,,,20050310121004,", date, values.join(","))
}

/// A fully populated 30-minute interval day (48 identical values)
pub fn full_interval_line(date: &str, value: &str) -> String {
    let values = vec![value; 48];
    interval_line(date, &values)
}

/// A valid 100 header line
pub fn header_line() -> &'static str {
    "100,NEM12,200506081149,UNITEDDP,NEMMCO"
}

/// A valid 200 line opening a block for `nmi` with the given interval length
pub fn nmi_line(nmi: &str, interval_minutes: u32) -> String {
    format!("200,{nmi},E1E2,1,E1,N1,01009,kWh,{interval_minutes},20050610")
}
