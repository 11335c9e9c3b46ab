pub mod filter;
pub mod metadata;
pub mod normalize;
pub mod values;

use serde::Serialize;
use tracing::{debug, warn};

use crate::diagnostics::Diagnostic;
use crate::extraction::ScannedDocument;
use crate::model::{DocumentMetadata, NormalizedRow, RowSource};
use filter::drop_yield_rows;
use metadata::{extract_metadata, find_all_sheet_kit};
use normalize::normalize;

/// Everything one document contributes to a batch.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedDocument {
    pub metadata: DocumentMetadata,
    pub rows: Vec<NormalizedRow>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Turn one scanned document into normalized rows.
///
/// Tables are visited page by page in detection order. A table that cannot
/// be normalized is skipped with a warning; its siblings still contribute.
pub fn parse_document(filename: &str, doc: &ScannedDocument) -> ParsedDocument {
    let metadata = extract_metadata(filename, doc);
    let program = metadata.program.clone();
    let mut diagnostics = conflicting_ratio_notes(&program, doc);
    let mut rows = Vec::new();

    if doc.table_count() == 0 {
        diagnostics.push(Diagnostic::info(&program, "no tables detected"));
    }

    for page in &doc.pages {
        for (table_index, table) in page.tables.iter().enumerate() {
            if table.is_degenerate() {
                debug!(document = %program, page = page.page_number, table = table_index, "skipping table without data rows");
                continue;
            }

            let data_rows = drop_yield_rows(table.data_rows());
            if data_rows.is_empty() {
                continue;
            }

            match normalize(&data_rows) {
                Ok(normalized) => {
                    debug!(
                        document = %program,
                        page = page.page_number,
                        table = table_index,
                        shape = ?normalized.shape,
                        rows = normalized.rows.len(),
                        "normalized table"
                    );
                    let source = RowSource {
                        page_number: page.page_number,
                        table_index,
                    };
                    rows.extend(
                        normalized
                            .rows
                            .into_iter()
                            .map(|r| NormalizedRow::from_table_row(r, &metadata, source)),
                    );
                }
                Err(e) => {
                    warn!(document = %program, page = page.page_number, table = table_index, "skipping table: {e}");
                    diagnostics.push(
                        Diagnostic::warning(&program, e.to_string())
                            .at_table(page.page_number, table_index),
                    );
                }
            }
        }
    }

    ParsedDocument {
        metadata,
        rows,
        diagnostics,
    }
}

/// The first sheet/kit statement is authoritative; later ones that disagree
/// are reported, not used.
fn conflicting_ratio_notes(program: &str, doc: &ScannedDocument) -> Vec<Diagnostic> {
    let matches = find_all_sheet_kit(&doc.full_text());
    let Some(first) = matches.first() else {
        return Vec::new();
    };

    matches
        .iter()
        .skip(1)
        .filter(|m| m.value != first.value)
        .map(|m| {
            Diagnostic::info(
                program,
                format!(
                    "ignoring later ratio {} Sheet(s) = {} Kit(s) at offset {}; using {} = {}",
                    m.value.0, m.value.1, m.span.start, first.value.0, first.value.1
                ),
            )
        })
        .collect()
}
