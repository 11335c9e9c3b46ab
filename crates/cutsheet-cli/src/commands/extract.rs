use cutsheet_core::aggregate::cycle_time::parse_report_date;
use cutsheet_core::error::CutsheetError;
use cutsheet_core::export::write_report;
use cutsheet_core::model::Variant;
use cutsheet_core::{DocumentInput, PipelineOptions};
use std::path::PathBuf;
use tracing::warn;

use crate::output;
use crate::scanner::AutoScanner;

pub fn run(
    input_files: Vec<PathBuf>,
    variant: &str,
    out: PathBuf,
    output_format: &str,
    timeout: u64,
    date: Option<&str>,
) -> Result<(), CutsheetError> {
    let variant: Variant = variant.parse()?;
    let report_date = match date {
        Some(d) => parse_report_date(d)?,
        None => chrono::Local::now().date_naive(),
    };
    let options = PipelineOptions {
        variant,
        report_date,
    };

    // Unreadable files are skipped like documents the scanner rejects.
    let mut loaded: Vec<(String, Vec<u8>)> = Vec::new();
    for path in &input_files {
        match std::fs::read(path) {
            Ok(bytes) => {
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                loaded.push((filename, bytes));
            }
            Err(e) => warn!(path = %path.display(), "skipping unreadable file: {e}"),
        }
    }

    let inputs: Vec<DocumentInput<'_>> = loaded
        .iter()
        .map(|(filename, bytes)| DocumentInput { filename, bytes })
        .collect();

    let scanner = AutoScanner::new(timeout);
    let outcome = cutsheet_core::run_batch(&inputs, &scanner, &options)?;

    match output_format {
        "json" => output::json::print(&outcome)?,
        _ => {
            output::table::print_report(&outcome.report);
            output::table::print_diagnostics(&outcome.diagnostics);
        }
    }

    let xlsx = write_report(&outcome.report)?;
    std::fs::write(&out, xlsx)?;
    eprintln!(
        "Summarized {} document(s), {} record(s) written to {}",
        outcome.documents,
        outcome.report.rows.len(),
        out.display()
    );

    Ok(())
}
