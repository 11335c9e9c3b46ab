pub mod json;
pub mod pdftotext;
pub mod table;

use serde::{Deserialize, Serialize};

use crate::error::CutsheetError;

/// A single table cell. `None` means the detector found no content at all.
pub type Cell = Option<String>;

/// A table as detected on a page: rows of cells, header row first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        RawTable { rows }
    }

    /// Tables need a header plus at least one data row.
    pub fn is_degenerate(&self) -> bool {
        self.rows.len() < 2
    }

    /// Rows after the header.
    pub fn data_rows(&self) -> &[Vec<Cell>] {
        self.rows.get(1..).unwrap_or(&[])
    }
}

/// Content scanned from a single page of a PDF.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScannedPage {
    pub page_number: usize,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tables: Vec<RawTable>,
}

/// Every page of one document, in page order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScannedDocument {
    pub pages: Vec<ScannedPage>,
}

impl ScannedDocument {
    /// Text of all pages joined with newlines. Pages without text contribute "".
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn table_count(&self) -> usize {
        self.pages.iter().map(|p| p.tables.len()).sum()
    }
}

/// Trait for PDF page/table scanning backends.
pub trait PdfScanner: Send + Sync {
    /// Scan PDF bytes into pages, each with its text and detected tables.
    fn scan(&self, pdf_bytes: &[u8]) -> Result<ScannedDocument, CutsheetError>;

    /// Name of this scanning backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: usize, text: &str) -> ScannedPage {
        ScannedPage {
            page_number: number,
            text: text.into(),
            tables: vec![],
        }
    }

    #[test]
    fn test_full_text_joins_pages_with_newlines() {
        let doc = ScannedDocument {
            pages: vec![page(1, "first"), page(2, ""), page(3, "third")],
        };
        assert_eq!(doc.full_text(), "first\n\nthird");
        assert_eq!(doc.page_count(), 3);
    }

    #[test]
    fn test_degenerate_table() {
        let header_only = RawTable::new(vec![vec![Some("Part ID".into())]]);
        assert!(header_only.is_degenerate());
        assert!(header_only.data_rows().is_empty());

        let empty = RawTable::default();
        assert!(empty.is_degenerate());
        assert!(empty.data_rows().is_empty());
    }
}
