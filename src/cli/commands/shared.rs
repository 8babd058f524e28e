//! Shared components for CLI commands
//!
//! Common logging setup, configuration assembly, and report rendering used
//! by the command implementations.

use std::collections::HashMap;
use std::time::Duration;

use indicatif::HumanDuration;
use tracing::debug;

use crate::app::models::FailureReason;
use crate::app::services::nem12_parser::ParseStats;
use crate::cli::args::ParseArgs;
use crate::config::Config;
use crate::{Error, Result};

/// Final statistics for one processing run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Scan statistics from the parser
    pub stats: ParseStats,

    /// Recoverable failure counts by reason
    pub failures: HashMap<FailureReason, u64>,

    /// Wall-clock processing time
    pub processing_time: Duration,
}

impl RunReport {
    /// Total number of recoverable failures
    pub fn total_failures(&self) -> u64 {
        self.failures.values().sum()
    }
}

/// Set up structured logging for the parse command
pub fn setup_logging(args: &ParseArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nem12_processor={log_level}")));

    // try_init so repeated invocations in one process keep the first
    // subscriber instead of panicking
    if args.quiet {
        // Minimal logging for quiet mode
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init();
    } else {
        // Standard logging with uptime timestamps
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init();
    }

    debug!("Logging initialized at level: {log_level}");
    Ok(())
}

/// Assemble the run configuration from CLI arguments
pub fn load_configuration(args: &ParseArgs) -> Result<Config> {
    let mut config = Config::default();
    config.processing.input_path = args.input_path.clone();
    config.output.output_path = args.output_path.clone();
    config.output.format = args.format;
    config.output.batch_size = args.batch_size;
    config.output.failure_output = if args.no_fail_output {
        None
    } else {
        Some(match &args.fail_output {
            Some(path) => path.clone(),
            None => Config::derived_failure_output(&args.output_path),
        })
    };

    config.validate()?;
    Ok(config)
}

/// Render a human-readable final report
pub fn print_human_report(config: &Config, report: &RunReport) {
    let duration = HumanDuration(report.processing_time);

    println!("\nNEM12 Processing Complete");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Processing Summary:");
    println!("   • Lines processed: {}", report.stats.lines_processed);
    println!("   • NMI blocks: {}", report.stats.nmi_blocks);
    println!("   • Interval records: {}", report.stats.interval_records);
    println!("   • Readings accepted: {}", report.stats.readings_accepted);
    println!("   • Processing time: {duration}");
    println!(
        "\nSQL output: {}",
        config.output.output_path.display()
    );

    if report.total_failures() > 0 {
        println!("\nFailed records:");
        for reason in FailureReason::ALL {
            if let Some(count) = report.failures.get(&reason) {
                println!("   • {reason}: {count}");
            }
        }
        if let Some(fail_output) = &config.output.failure_output {
            println!("Failed records SQL: {}", fail_output.display());
        }
    }

    println!();
}

/// Render a machine-readable JSON report to stdout
pub fn print_json_report(config: &Config, report: &RunReport) -> Result<()> {
    let failures: HashMap<&str, u64> = report
        .failures
        .iter()
        .map(|(reason, count)| (reason.as_str(), *count))
        .collect();

    let json = serde_json::json!({
        "lines_processed": report.stats.lines_processed,
        "nmi_blocks": report.stats.nmi_blocks,
        "interval_records": report.stats.interval_records,
        "readings_accepted": report.stats.readings_accepted,
        "failures": failures,
        "total_failures": report.total_failures(),
        "processing_time_seconds": report.processing_time.as_secs_f64(),
        "output_path": config.output.output_path,
        "failure_output_path": config.output.failure_output,
    });

    let rendered = serde_json::to_string_pretty(&json)
        .map_err(|e| Error::report("Failed to serialize run report", e))?;
    println!("{rendered}");
    Ok(())
}
