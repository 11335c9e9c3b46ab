use cutsheet_core::error::CutsheetError;
use cutsheet_core::extraction::json::JsonScanner;
use cutsheet_core::extraction::pdftotext::PdftotextScanner;
use cutsheet_core::extraction::{PdfScanner, ScannedDocument};
use std::time::Duration;

/// Routes each document to a backend by its content: pre-scanned JSON
/// documents start with `{`, everything else goes to pdftotext.
pub struct AutoScanner {
    pdf: PdftotextScanner,
    json: JsonScanner,
}

impl AutoScanner {
    pub fn new(timeout_secs: u64) -> Self {
        AutoScanner {
            pdf: pdf_scanner(timeout_secs),
            json: JsonScanner::new(),
        }
    }

    fn backend_for(&self, bytes: &[u8]) -> &dyn PdfScanner {
        if is_json(bytes) {
            &self.json
        } else {
            &self.pdf
        }
    }
}

impl PdfScanner for AutoScanner {
    fn scan(&self, bytes: &[u8]) -> Result<ScannedDocument, CutsheetError> {
        self.backend_for(bytes).scan(bytes)
    }

    fn backend_name(&self) -> &str {
        "auto"
    }
}

/// pdftotext always runs under a deadline from the CLI.
pub fn pdf_scanner(timeout_secs: u64) -> PdftotextScanner {
    PdftotextScanner::with_timeout(Duration::from_secs(timeout_secs))
}

fn is_json(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| *b == b'{')
}
