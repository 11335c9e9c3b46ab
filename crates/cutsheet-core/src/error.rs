#[derive(Debug, thiserror::Error)]
pub enum CutsheetError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("extraction did not finish within {seconds}s")]
    Timeout { seconds: u64 },

    #[error("table has {columns} columns after pruning, expected 7 or 8")]
    SchemaMismatch { columns: usize },

    #[error("no valid data found in the uploaded documents")]
    NoValidData,

    #[error("unknown variant '{0}'. Available: parts, cycle-time, offal")]
    UnknownVariant(String),

    #[error("invalid report date {0}. Expected MM/DD/YYYY")]
    InvalidDate(String),

    #[error("failed to write spreadsheet: {0}")]
    Export(String),

    #[error("failed to read spreadsheet: {0}")]
    ReadBack(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
