use crate::error::CutsheetError;
use crate::extraction::{PdfScanner, ScannedDocument};

/// Backend for documents that were scanned ahead of time.
///
/// The byte stream is a JSON-serialized [`ScannedDocument`], as written by
/// `cutsheet scan` or by any external table detector that can emit pages of
/// text and raw tables.
pub struct JsonScanner;

impl JsonScanner {
    pub fn new() -> Self {
        JsonScanner
    }
}

impl Default for JsonScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfScanner for JsonScanner {
    fn scan(&self, bytes: &[u8]) -> Result<ScannedDocument, CutsheetError> {
        let doc: ScannedDocument = serde_json::from_slice(bytes)?;
        Ok(doc)
    }

    fn backend_name(&self) -> &str {
        "json"
    }
}
