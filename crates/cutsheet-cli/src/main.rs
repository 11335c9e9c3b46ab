mod commands;
mod output;
mod scanner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Per-document deadline for pdftotext.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Parser)]
#[command(
    name = "cutsheet",
    version,
    about = "Extract and summarize part tables from CNC nesting cut-sheet PDFs"
)]
struct Cli {
    /// Log every table and document processed
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a batch of cut sheets (PDF or pre-scanned JSON) into a summary spreadsheet
    Extract {
        /// Paths to PDF or pre-scanned JSON files
        #[arg(required = true)]
        input_files: Vec<PathBuf>,

        /// Summary variant: parts (default), cycle-time, offal
        #[arg(long, default_value = "parts")]
        variant: String,

        /// Spreadsheet to write
        #[arg(
            short = 'O',
            long = "out",
            value_name = "FILE",
            default_value = "extracted_summary.xlsx"
        )]
        out: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Give up on a PDF after this many seconds
        #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout: u64,

        /// Date stamped on cycle-time records (MM/DD/YYYY, default today)
        #[arg(long, value_name = "DATE")]
        date: Option<String>,
    },
    /// Scan one PDF and dump its pages and tables as JSON
    Scan {
        /// Path to PDF file
        input_file: PathBuf,

        /// Write the scan to a JSON file instead of stdout
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Give up after this many seconds
        #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout: u64,
    },
    /// Read an exported summary spreadsheet back and print it
    Inspect {
        /// Path to xlsx file
        input_file: PathBuf,

        /// Variant the spreadsheet was exported with
        #[arg(long, default_value = "parts")]
        variant: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Extract {
            input_files,
            variant,
            out,
            output,
            timeout,
            date,
        } => commands::extract::run(input_files, &variant, out, &output, timeout, date.as_deref()),
        Commands::Scan {
            input_file,
            out,
            timeout,
        } => commands::scan::run(input_file, out, timeout),
        Commands::Inspect {
            input_file,
            variant,
            output,
        } => commands::inspect::run(input_file, &variant, &output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_has_default_timeout() {
        let cli = Cli::try_parse_from(["cutsheet", "extract", "PROG123.pdf"]).unwrap();
        match cli.command {
            Commands::Extract { timeout, out, .. } => {
                assert_eq!(timeout, DEFAULT_TIMEOUT_SECS);
                assert_eq!(out, PathBuf::from("extracted_summary.xlsx"));
            }
            _ => panic!("expected extract"),
        }
    }

    #[test]
    fn test_scan_timeout_override() {
        let cli =
            Cli::try_parse_from(["cutsheet", "scan", "PROG123.pdf", "--timeout", "5"]).unwrap();
        match cli.command {
            Commands::Scan { timeout, .. } => assert_eq!(timeout, 5),
            _ => panic!("expected scan"),
        }
    }
}
