//! Integration tests for end-to-end NEM12 processing
//!
//! These tests drive the full pipeline from a NEM12 file on disk through the
//! parse command to the generated SQL output, verifying parsing, failure
//! classification, and both SQL generation strategies.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use nem12_processor::app::services::failure_handler::{FailureHandler, InMemoryFailureHandler};
use nem12_processor::app::services::nem12_parser::Nem12Parser;
use nem12_processor::app::services::sql_writer::{SqlFormat, create_writer};
use nem12_processor::cli::args::{ParseArgs, ReportFormat};
use nem12_processor::cli::commands::parse::run_parse;
use nem12_processor::{Error, FailureReason};

/// A small but complete NEM12 file: one header, two NMI blocks with
/// 30-minute data, a handful of malformed values, and a 900 terminator
fn sample_nem12() -> String {
    let mut good = vec!["1.111"; 48];
    good[0] = "0";

    let mut flawed = vec!["2.0"; 48];
    flawed[3] = "";
    flawed[9] = "abc";
    flawed[21] = "-1.5";

    format!(
        "100,NEM12,200506081149,UNITEDDP,NEMMCO\n\
         200,NEM1201009,E1E2,1,E1,N1,01009,kWh,30,20050610\n\
         300,20050301,{},A,,,20050310121004,\n\
         300,20050302,{},A,,,20050310121004,\n\
         500,O,7001234567,20050310121004,\n\
         200,NEM1201010,E1E2,2,E2,,01010,kWh,30,20050610\n\
         300,20050301,{},A,,,20050310121004,\n\
         500,O,7001234567,20050310121004,\n\
         900\n",
        good.join(","),
        good.join(","),
        flawed.join(","),
    )
}

fn write_input(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("input.csv");
    fs::write(&path, content).unwrap();
    path
}

fn parse_args(input: &Path, output: &Path) -> ParseArgs {
    ParseArgs {
        input_path: input.to_path_buf(),
        output_path: output.to_path_buf(),
        format: SqlFormat::BatchInsert,
        batch_size: 1000,
        fail_output: None,
        no_fail_output: false,
        report: ReportFormat::Human,
        quiet: true,
        verbose: false,
    }
}

#[test]
fn test_parse_command_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, &sample_nem12());
    let output = temp_dir.path().join("readings.sql");

    let stats = run_parse(parse_args(&input, &output)).unwrap();

    assert_eq!(stats.lines_processed, 9);
    assert_eq!(stats.nmi_blocks, 2);
    assert_eq!(stats.interval_records, 3);
    // 144 slots total, 3 malformed
    assert_eq!(stats.readings_accepted, 141);

    let sql = fs::read_to_string(&output).unwrap();
    assert!(sql.starts_with("INSERT INTO meter_readings"));
    assert_eq!(sql.matches("'NEM1201009'").count(), 96);
    assert_eq!(sql.matches("'NEM1201010'").count(), 45);
    // End-boundary timestamps: first slot of the day and the rollover slot
    assert!(sql.contains("'2005-03-01 00:30:00'"));
    assert!(sql.contains("'2005-03-02 00:00:00'"));

    // Failures were persisted to the derived path next to the readings
    let failures = fs::read_to_string(temp_dir.path().join("readings_failures.sql")).unwrap();
    assert!(failures.contains("INSERT INTO failed_readings"));
    assert!(failures.contains("'EMPTY_VALUE'"));
    assert!(failures.contains("'NON_NUMERIC_VALUE'"));
    assert!(failures.contains("'NEGATIVE_VALUE'"));
    assert!(failures.contains("'NEM1201010'"));
}

#[test]
fn test_parse_command_copy_format() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, &sample_nem12());
    let output = temp_dir.path().join("readings.sql");

    let mut args = parse_args(&input, &output);
    args.format = SqlFormat::Copy;
    let stats = run_parse(args).unwrap();
    assert_eq!(stats.readings_accepted, 141);

    let sql = fs::read_to_string(&output).unwrap();
    assert!(sql.starts_with(
        "COPY meter_readings (nmi, timestamp, consumption) FROM STDIN WITH (FORMAT CSV);"
    ));
    assert!(sql.trim_end().ends_with("\\."));
    assert_eq!(sql.matches("NEM1201009,").count(), 96);
}

#[test]
fn test_parse_command_without_failure_persistence() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, &sample_nem12());
    let output = temp_dir.path().join("readings.sql");

    let mut args = parse_args(&input, &output);
    args.no_fail_output = true;
    run_parse(args).unwrap();

    assert!(output.exists());
    assert!(!temp_dir.path().join("readings_failures.sql").exists());
}

#[test]
fn test_parse_command_explicit_failure_path() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, &sample_nem12());
    let output = temp_dir.path().join("readings.sql");
    let fail_output = temp_dir.path().join("rejects.sql");

    let mut args = parse_args(&input, &output);
    args.fail_output = Some(fail_output.clone());
    run_parse(args).unwrap();

    assert!(fs::read_to_string(&fail_output)
        .unwrap()
        .contains("INSERT INTO failed_readings"));
}

#[test]
fn test_parse_command_small_batch_size() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, &sample_nem12());
    let output = temp_dir.path().join("readings.sql");

    let mut args = parse_args(&input, &output);
    args.batch_size = 10;
    let stats = run_parse(args).unwrap();
    assert_eq!(stats.readings_accepted, 141);

    let sql = fs::read_to_string(&output).unwrap();
    // 141 readings in batches of 10: 14 full plus the remainder
    assert_eq!(sql.matches("INSERT INTO meter_readings").count(), 15);
}

#[test]
fn test_parse_command_rejects_missing_input() {
    let temp_dir = TempDir::new().unwrap();
    let args = parse_args(
        &temp_dir.path().join("missing.csv"),
        &temp_dir.path().join("readings.sql"),
    );

    assert!(matches!(
        run_parse(args),
        Err(Error::Configuration { .. })
    ));
}

#[test]
fn test_fatal_format_violation_names_the_line() {
    let temp_dir = TempDir::new().unwrap();
    let content = "100,NEM12,200506081149,UNITEDDP,NEMMCO\n\
                   300,20050301,1.0,A\n\
                   900\n";
    let input = write_input(&temp_dir, content);
    let output = temp_dir.path().join("readings.sql");

    let error = run_parse(parse_args(&input, &output)).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Line 2: 300 record found outside NMI block"
    );
}

#[test]
fn test_count_mismatch_record_does_not_abort_the_scan() {
    let temp_dir = TempDir::new().unwrap();
    let short_day = vec!["1.0"; 47].join(",");
    let good_day = vec!["2.0"; 48].join(",");
    let content = format!(
        "100,NEM12,200506081149,UNITEDDP,NEMMCO\n\
         200,NEM1201009,E1E2,1,E1,N1,01009,kWh,30,20050610\n\
         300,20050301,{short_day},A,,,20050310121004,\n\
         300,20050302,{good_day},A,,,20050310121004,\n\
         500,O,7001234567,20050310121004,\n\
         900\n"
    );
    let input = write_input(&temp_dir, &content);
    let output = temp_dir.path().join("readings.sql");

    let mut sink = create_writer(SqlFormat::BatchInsert, &output, 1000).unwrap();
    let mut failures = InMemoryFailureHandler::new();

    let stats = {
        let mut parser = Nem12Parser::new(sink.as_mut(), &mut failures);
        parser.parse_file(&input).unwrap()
    };
    sink.close().unwrap();

    // The 47-slot day still counts as an interval record but contributes
    // no readings; the scan carries on and accepts the following day
    assert_eq!(stats.interval_records, 2);
    assert_eq!(stats.readings_accepted, 48);
    assert_eq!(
        failures
            .statistics()
            .get(&FailureReason::IntervalCountMismatch),
        Some(&1)
    );

    let sql = fs::read_to_string(&output).unwrap();
    assert!(!sql.contains("2005-03-01"));
    assert!(sql.contains("'2005-03-02 00:30:00'"));
    assert!(sql.contains("'2005-03-03 00:00:00'"));
}

#[test]
fn test_library_pipeline_with_in_memory_handler() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, &sample_nem12());
    let output = temp_dir.path().join("readings.sql");

    let mut sink = create_writer(SqlFormat::BatchInsert, &output, 1000).unwrap();
    let mut failures = InMemoryFailureHandler::new();

    let stats = {
        let mut parser = Nem12Parser::new(sink.as_mut(), &mut failures);
        parser.parse_file(&input).unwrap()
    };
    sink.close().unwrap();

    assert_eq!(stats.readings_accepted, 141);
    assert_eq!(failures.total_failures(), 3);

    let stats_by_reason = failures.statistics();
    assert_eq!(stats_by_reason.get(&FailureReason::EmptyValue), Some(&1));
    assert_eq!(
        stats_by_reason.get(&FailureReason::NonNumericValue),
        Some(&1)
    );
    assert_eq!(stats_by_reason.get(&FailureReason::NegativeValue), Some(&1));

    // Every failure record keeps its provenance
    let flawed_line = 7;
    for record in failures.records() {
        assert_eq!(record.line_number, flawed_line);
        assert_eq!(record.nmi.as_deref(), Some("NEM1201010"));
        assert!(record.interval_index.is_some());
        assert!(record.timestamp.is_some());
    }
}
