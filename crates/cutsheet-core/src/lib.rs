pub mod aggregate;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod report;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use diagnostics::Diagnostic;
use error::CutsheetError;
use extraction::PdfScanner;
use model::Variant;
use parsing::filter::retain_named_parts;
use parsing::metadata::program_name;
use parsing::ParsedDocument;
use report::Report;

/// One uploaded document: the filename it was uploaded under and its bytes.
#[derive(Debug, Clone, Copy)]
pub struct DocumentInput<'a> {
    pub filename: &'a str,
    pub bytes: &'a [u8],
}

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub variant: Variant,
    /// Stamped on cycle-time records.
    pub report_date: NaiveDate,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            report_date: chrono::Local::now().date_naive(),
        }
    }
}

/// Result of a batch: the assembled report plus everything noticed on the way.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub report: Report,
    pub diagnostics: Vec<Diagnostic>,
    /// Documents that were scanned successfully.
    pub documents: usize,
    /// Normalized rows before the named-part filter.
    pub rows_extracted: usize,
}

/// Scan one document and turn its tables into normalized rows.
///
/// Fails only when the scanner fails; unusable tables are reported in the
/// returned diagnostics instead.
pub fn extract_document(
    bytes: &[u8],
    filename: &str,
    scanner: &dyn PdfScanner,
) -> Result<ParsedDocument, CutsheetError> {
    let doc = scanner.scan(bytes)?;
    let parsed = parsing::parse_document(filename, &doc);
    info!(
        document = %parsed.metadata.program,
        backend = scanner.backend_name(),
        pages = doc.page_count(),
        tables = doc.table_count(),
        rows = parsed.rows.len(),
        "extracted document"
    );
    Ok(parsed)
}

/// Main API entry point: extract every document and reduce the combined rows
/// into one report for the requested variant.
///
/// A document whose scan fails is skipped with an error diagnostic. Returns
/// [`CutsheetError::NoValidData`] when no named part survives for the variant.
pub fn run_batch(
    inputs: &[DocumentInput<'_>],
    scanner: &dyn PdfScanner,
    options: &PipelineOptions,
) -> Result<BatchOutcome, CutsheetError> {
    let mut diagnostics = Vec::new();
    let mut rows = Vec::new();
    let mut documents = 0;

    for input in inputs {
        match extract_document(input.bytes, input.filename, scanner) {
            Ok(parsed) => {
                documents += 1;
                diagnostics.extend(parsed.diagnostics);
                rows.extend(parsed.rows);
            }
            Err(e) => {
                let program = program_name(input.filename);
                warn!(document = %program, "skipping document: {e}");
                diagnostics.push(Diagnostic::error(&program, e.to_string()));
            }
        }
    }

    let rows_extracted = rows.len();
    let rows = retain_named_parts(rows);
    let aggregation = aggregate::aggregate(&rows, options.variant, options.report_date);
    if aggregation.is_empty() {
        return Err(CutsheetError::NoValidData);
    }

    let report = report::assemble(&aggregation);
    info!(
        variant = %options.variant,
        documents,
        rows_extracted,
        records = report.rows.len(),
        "batch complete"
    );

    Ok(BatchOutcome {
        report,
        diagnostics,
        documents,
        rows_extracted,
    })
}
