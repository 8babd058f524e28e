//! Parse command implementation for NEM12 processor CLI
//!
//! Wires the configured reading sink and failure handlers to the parser,
//! runs one file scan, and renders the final report.

use std::time::Instant;

use tracing::{debug, info};

use super::shared::{
    RunReport, load_configuration, print_human_report, print_json_report, setup_logging,
};
use crate::app::services::failure_handler::{
    CompositeFailureHandler, FailureHandler, LoggingFailureHandler, SqlFailureHandler,
};
use crate::app::services::nem12_parser::{Nem12Parser, ParseStats};
use crate::app::services::sql_writer::create_writer;
use crate::cli::args::{ParseArgs, ReportFormat};
use crate::Result;

/// Parse command runner
///
/// Workflow:
/// 1. Set up logging and validate arguments
/// 2. Assemble configuration and output sinks
/// 3. Run the file scan
/// 4. Close sinks and render the report
pub fn run_parse(args: ParseArgs) -> Result<ParseStats> {
    let start_time = Instant::now();

    setup_logging(&args)?;

    info!("Starting NEM12 processor");
    debug!("Command line arguments: {args:?}");

    args.validate()?;
    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {config:?}");

    let mut reading_sink = create_writer(
        config.output.format,
        &config.output.output_path,
        config.output.batch_size,
    )?;

    // The logging handler aggregates counts; the SQL handler only persists,
    // so the composite counts each failure once
    let mut handlers: Vec<Box<dyn FailureHandler>> = Vec::new();
    if let Some(fail_output) = &config.output.failure_output {
        handlers.push(Box::new(SqlFailureHandler::create(
            fail_output,
            config.output.batch_size,
        )?));
    }
    handlers.push(Box::new(LoggingFailureHandler::new()));
    let mut failure_handler = CompositeFailureHandler::new(handlers);

    let stats = {
        let mut parser = Nem12Parser::new(reading_sink.as_mut(), &mut failure_handler);
        parser.parse_file(&config.processing.input_path)?
    };

    reading_sink.close()?;
    let failures = failure_handler.statistics();
    failure_handler.close()?;

    info!("Parsing completed successfully");

    let report = RunReport {
        stats: stats.clone(),
        failures,
        processing_time: start_time.elapsed(),
    };

    match args.report {
        ReportFormat::Human => print_human_report(&config, &report),
        ReportFormat::Json => print_json_report(&config, &report)?,
    }

    Ok(stats)
}
