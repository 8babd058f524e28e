//! NEM12 file parser state machine
//!
//! Drives a single forward pass over a file's lines, maintaining the scan
//! state, dispatching each line by record type, and enforcing the block
//! nesting rules: a 100 header first, 200 records opening NMI blocks, 300
//! records decoded only inside a block, 500 records closing the block, and
//! a 900 record ending the file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use super::record_decoder::IntervalRecordDecoder;
use super::field_parsers::{is_valid_header_datetime, is_valid_participant, parse_interval_length};
use super::stats::ParseStats;
use crate::app::models::{ParserState, RecordType};
use crate::app::services::failure_handler::FailureHandler;
use crate::app::services::sql_writer::ReadingSink;
use crate::constants::{
    HEADER_FIELD_COUNT, INTERVAL_LENGTH_FIELD_INDEX, MAX_NMI_LEN, NEM12_VERSION_HEADER,
    NMI_DATA_MIN_FIELDS, NMI_FIELD_INDEX,
};
use crate::{Error, Result};

/// NEM12 file parser
///
/// Accepted readings are forwarded to the reading sink; classified
/// recoverable failures go to the failure handler. A fatal format violation
/// aborts the scan with an error naming the offending line.
pub struct Nem12Parser<'a> {
    reading_sink: &'a mut dyn ReadingSink,
    failure_handler: &'a mut dyn FailureHandler,
    decoder: IntervalRecordDecoder,
}

impl<'a> Nem12Parser<'a> {
    /// Create a parser over the given sinks
    pub fn new(
        reading_sink: &'a mut dyn ReadingSink,
        failure_handler: &'a mut dyn FailureHandler,
    ) -> Self {
        Self {
            reading_sink,
            failure_handler,
            decoder: IntervalRecordDecoder::new(),
        }
    }

    /// Parse a NEM12 file from disk
    pub fn parse_file(&mut self, path: &Path) -> Result<ParseStats> {
        info!("Parsing NEM12 file: {}", path.display());

        let file = File::open(path)
            .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;
        self.parse_reader(BufReader::new(file))
    }

    /// Parse NEM12 content from any buffered reader
    ///
    /// One scan owns one fresh [`ParserState`]; the state is never reused
    /// across files.
    pub fn parse_reader<R: BufRead>(&mut self, reader: R) -> Result<ParseStats> {
        let mut state = ParserState::new();
        let mut stats = ParseStats::new();

        for line in reader.lines() {
            let line = line.map_err(|e| Error::io("Failed to read input line", e))?;
            state.increment_line_number();
            self.process_line(line.trim(), &mut state, &mut stats)?;
        }

        self.finalize(&state)?;
        self.reading_sink.flush()?;

        stats.lines_processed = state.line_number();
        info!("Successfully parsed {}", stats.summary());
        Ok(stats)
    }

    /// Process one trimmed line, mutating the scan state
    ///
    /// Blank lines are skipped, not an error.
    pub fn process_line(
        &mut self,
        line: &str,
        state: &mut ParserState,
        stats: &mut ParseStats,
    ) -> Result<()> {
        if line.is_empty() {
            return Ok(());
        }

        // Trailing blank lines after 900 are tolerated, records are not
        if state.file_ended() {
            return Err(Error::parse(
                state.line_number(),
                "Record found after end of data (900)",
            ));
        }

        let record_type = RecordType::from_line(line, state.line_number())?;

        if !state.header_seen() && record_type != RecordType::Header {
            return Err(Error::parse(
                state.line_number(),
                format!(
                    "First record must be a 100 header, found {}",
                    record_type.code()
                ),
            ));
        }

        match record_type {
            RecordType::Header => self.handle_header(line, state),
            RecordType::NmiData => self.handle_nmi_data(line, state, stats),
            RecordType::IntervalData => self.handle_interval_data(line, state, stats),
            RecordType::IntervalEvent => self.handle_interval_event(state),
            RecordType::B2bDetail => self.handle_nmi_end(state),
            RecordType::FileEnd => self.handle_file_end(state),
        }
    }

    /// Validate the end-of-scan state
    ///
    /// Called once after the last line; fails if an NMI block is still open.
    pub fn finalize(&self, state: &ParserState) -> Result<()> {
        if state.inside_nmi_block() {
            return Err(Error::parse(
                state.line_number(),
                "File ended without closing NMI block (missing 500 record)",
            ));
        }
        Ok(())
    }

    /// Validate and process a 100 (header) record
    ///
    /// Format: `100,NEM12,YYYYMMDDHHmm,FromParticipant,ToParticipant`
    ///
    /// All five fields are mandatory and the record must be the first line
    /// of the file; any violation is fatal.
    fn handle_header(&mut self, line: &str, state: &mut ParserState) -> Result<()> {
        if state.line_number() != 1 {
            return Err(Error::parse(
                state.line_number(),
                "Header (100) must be the first line",
            ));
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != HEADER_FIELD_COUNT {
            return Err(Error::parse(
                state.line_number(),
                format!(
                    "Header must have exactly {HEADER_FIELD_COUNT} fields, found {}",
                    fields.len()
                ),
            ));
        }

        let [record_indicator, version_header, date_time, from_participant, to_participant] =
            [fields[0], fields[1], fields[2], fields[3], fields[4]];

        if record_indicator != "100" {
            return Err(Error::parse(
                state.line_number(),
                format!("RecordIndicator must be '100', found '{record_indicator}'"),
            ));
        }

        if version_header != NEM12_VERSION_HEADER {
            return Err(Error::parse(
                state.line_number(),
                format!("VersionHeader must be '{NEM12_VERSION_HEADER}', found '{version_header}'"),
            ));
        }

        if !is_valid_header_datetime(date_time) {
            return Err(Error::parse(
                state.line_number(),
                format!("DateTime must be 12 characters in YYYYMMDDHHmm format, found '{date_time}'"),
            ));
        }

        if !is_valid_participant(from_participant) {
            return Err(Error::parse(
                state.line_number(),
                format!("FromParticipant must be 1-10 characters, found '{from_participant}'"),
            ));
        }

        if !is_valid_participant(to_participant) {
            return Err(Error::parse(
                state.line_number(),
                format!("ToParticipant must be 1-10 characters, found '{to_participant}'"),
            ));
        }

        state.mark_header_seen();
        info!(
            "Valid header: version={version_header}, dateTime={date_time}, \
             from={from_participant}, to={to_participant}"
        );
        Ok(())
    }

    /// Validate and process a 200 (NMI data) record, opening an NMI block
    ///
    /// Block metadata is structural, not a data point: insufficient fields,
    /// a blank NMI, or an interval length that does not divide a day evenly
    /// invalidate the whole file.
    fn handle_nmi_data(
        &mut self,
        line: &str,
        state: &mut ParserState,
        stats: &mut ParseStats,
    ) -> Result<()> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < NMI_DATA_MIN_FIELDS {
            return Err(Error::parse(
                state.line_number(),
                "Invalid 200 record: insufficient fields",
            ));
        }

        let nmi = fields[NMI_FIELD_INDEX];
        if nmi.trim().is_empty() || nmi.len() > MAX_NMI_LEN {
            return Err(Error::parse(
                state.line_number(),
                format!("NMI must be 1-{MAX_NMI_LEN} characters, found '{nmi}'"),
            ));
        }

        let raw_interval = fields[INTERVAL_LENGTH_FIELD_INDEX];
        let interval_minutes = parse_interval_length(raw_interval).ok_or_else(|| {
            Error::parse(
                state.line_number(),
                format!(
                    "Interval length must be a positive divisor of 1440 minutes, found '{raw_interval}'"
                ),
            )
        })?;

        state.start_nmi_block(nmi.to_string(), interval_minutes);
        stats.nmi_blocks += 1;
        info!("Started NMI block: {nmi} with interval {interval_minutes} minutes");
        Ok(())
    }

    /// Process a 300 (interval data) record inside the open NMI block
    fn handle_interval_data(
        &mut self,
        line: &str,
        state: &mut ParserState,
        stats: &mut ParseStats,
    ) -> Result<()> {
        let nmi = state
            .current_nmi()
            .ok_or_else(|| Error::parse(state.line_number(), "300 record found outside NMI block"))?
            .to_string();

        let readings = self.decoder.decode(
            line,
            &nmi,
            state.interval_minutes(),
            state.line_number(),
            self.failure_handler,
        );

        stats.interval_records += 1;
        stats.readings_accepted += readings.len();

        for reading in &readings {
            self.reading_sink.add_reading(reading)?;
        }

        debug!("Generated {} readings from interval data", readings.len());
        Ok(())
    }

    /// Process a 400 (interval event) record
    ///
    /// Event records carry quality metadata for slots already decoded; they
    /// produce no readings.
    fn handle_interval_event(&mut self, state: &ParserState) -> Result<()> {
        if !state.inside_nmi_block() {
            return Err(Error::parse(
                state.line_number(),
                "400 record found outside NMI block",
            ));
        }

        debug!("Skipping interval event record at line {}", state.line_number());
        Ok(())
    }

    /// Process a 500 (B2B detail) record, closing the open NMI block
    fn handle_nmi_end(&mut self, state: &mut ParserState) -> Result<()> {
        if !state.inside_nmi_block() {
            return Err(Error::parse(
                state.line_number(),
                "500 record found outside NMI block",
            ));
        }

        debug!("Ending NMI block at line {}", state.line_number());
        state.end_nmi_block();
        Ok(())
    }

    /// Process a 900 (end of data) record
    fn handle_file_end(&mut self, state: &mut ParserState) -> Result<()> {
        info!("Reached end of data at line {}", state.line_number());
        state.mark_file_ended();
        Ok(())
    }
}
