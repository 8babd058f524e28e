use clap::Parser;
use nem12_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(_stats) => {
            // Success - the report has already been printed by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {error:#}");
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("NEM12 Processor - Interval Meter Data Converter");
    println!("===============================================");
    println!();
    println!("Convert NEM12-format electricity interval-meter files into SQL batch");
    println!("load scripts, classifying malformed values instead of aborting the file.");
    println!();
    println!("USAGE:");
    println!("    nem12-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    parse       Parse a NEM12 file and generate SQL output (main command)");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Parse a NEM12 file into batched INSERT statements:");
    println!("    nem12-processor parse meterdata.csv readings.sql");
    println!();
    println!("    # Generate PostgreSQL COPY input with a custom batch size:");
    println!("    nem12-processor parse meterdata.csv readings.sql --format copy \\");
    println!("                          --batch-size 5000");
    println!();
    println!("    # Machine-readable run report:");
    println!("    nem12-processor parse meterdata.csv readings.sql --report json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    nem12-processor <COMMAND> --help");
}
