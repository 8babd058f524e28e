//! Command implementations for NEM12 processor CLI
//!
//! This module contains the command execution logic and error handling for
//! the CLI interface. Each command is implemented in its own module.

pub mod parse;
pub mod shared;

// Re-export the main types for convenient access
pub use shared::RunReport;

use crate::Result;
use crate::app::services::nem12_parser::ParseStats;
use crate::cli::args::{Args, Commands};

/// Main command runner for the NEM12 processor
///
/// Dispatches to the appropriate subcommand handler based on CLI args.
pub fn run(args: Args) -> Result<ParseStats> {
    match args.command {
        Some(Commands::Parse(parse_args)) => parse::run_parse(parse_args),
        None => {
            // main() shows help before dispatching when no subcommand is given
            Ok(ParseStats::new())
        }
    }
}
