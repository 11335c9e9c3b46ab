use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// A whole document was skipped.
    Error,
    /// Part of a document (a table) was skipped.
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A recoverable problem found while processing a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Program of the document the problem belongs to.
    pub document: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_index: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, document: &str, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            document: document.to_string(),
            page: None,
            table_index: None,
            message: message.into(),
        }
    }

    pub fn error(document: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, document, message)
    }

    pub fn warning(document: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, document, message)
    }

    pub fn info(document: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, document, message)
    }

    /// Pin the diagnostic to one table of one page.
    pub fn at_table(mut self, page: usize, table_index: usize) -> Self {
        self.page = Some(page);
        self.table_index = Some(table_index);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.document)?;
        if let Some(page) = self.page {
            write!(f, " page {page}")?;
        }
        if let Some(table) = self.table_index {
            write!(f, " table {table}")?;
        }
        write!(f, ": {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let d = Diagnostic::warning("PROG1", "table has 6 columns").at_table(2, 1);
        assert_eq!(d.to_string(), "warning: PROG1 page 2 table 1: table has 6 columns");
        assert_eq!(
            Diagnostic::info("PROG1", "no tables detected").to_string(),
            "info: PROG1: no tables detected"
        );
    }

    #[test]
    fn test_serialize_skips_missing_location() {
        let json = serde_json::to_value(Diagnostic::error("P", "timeout")).unwrap();
        assert_eq!(json["severity"], "error");
        assert!(json.get("page").is_none());
    }
}
