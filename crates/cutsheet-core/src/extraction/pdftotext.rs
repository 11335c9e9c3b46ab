use crate::error::CutsheetError;
use crate::extraction::table::detect_tables;
use crate::extraction::{PdfScanner, ScannedDocument, ScannedPage};
use std::ffi::OsString;
use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// PDF scanning backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout` to preserve whitespace alignment of tables, then
/// rebuilds the tables from the aligned text.
pub struct PdftotextScanner {
    program: OsString,
    timeout: Option<Duration>,
}

impl PdftotextScanner {
    pub fn new() -> Self {
        PdftotextScanner {
            program: OsString::from("pdftotext"),
            timeout: None,
        }
    }

    /// Kill pdftotext and fail with `Timeout` when a document takes longer.
    pub fn with_timeout(timeout: Duration) -> Self {
        PdftotextScanner {
            timeout: Some(timeout),
            ..Self::new()
        }
    }

    /// Run a different pdftotext binary instead of the one on PATH.
    pub fn program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn run_pdftotext(&self, pdf_bytes: &[u8]) -> Result<String, CutsheetError> {
        let mut input =
            tempfile::NamedTempFile::new().map_err(|e| CutsheetError::Extraction(e.to_string()))?;
        input
            .write_all(pdf_bytes)
            .map_err(|e| CutsheetError::Extraction(e.to_string()))?;
        let output =
            tempfile::NamedTempFile::new().map_err(|e| CutsheetError::Extraction(e.to_string()))?;
        let stderr =
            tempfile::NamedTempFile::new().map_err(|e| CutsheetError::Extraction(e.to_string()))?;
        let stderr_handle = stderr
            .reopen()
            .map_err(|e| CutsheetError::Extraction(e.to_string()))?;

        // Nothing is piped back: a child blocked on a full pipe would never
        // exit while we poll for the deadline.
        let mut child = Command::new(&self.program)
            .arg("-layout")
            .arg(input.path())
            .arg(output.path())
            .stdout(Stdio::null())
            .stderr(Stdio::from(stderr_handle))
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CutsheetError::PdftotextNotFound
                } else {
                    CutsheetError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        let started = Instant::now();
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if let Some(timeout) = self.timeout {
                if started.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(CutsheetError::Timeout {
                        seconds: timeout.as_secs(),
                    });
                }
            }
            thread::sleep(POLL_INTERVAL);
        };

        if !status.success() {
            let code = status.code().unwrap_or(-1);
            let stderr = std::fs::read(stderr.path())
                .map(|b| String::from_utf8_lossy(&b).trim().to_string())
                .unwrap_or_default();
            return Err(CutsheetError::PdftotextFailed { code, stderr });
        }

        let bytes = std::fs::read(output.path())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Default for PdftotextScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfScanner for PdftotextScanner {
    fn scan(&self, pdf_bytes: &[u8]) -> Result<ScannedDocument, CutsheetError> {
        let text = self.run_pdftotext(pdf_bytes)?;
        Ok(pages_from_layout_text(&text))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Split pdftotext output into pages and detect the tables on each.
///
/// pdftotext terminates every page with a form feed, so the trailing empty
/// chunk is not a page.
fn pages_from_layout_text(text: &str) -> ScannedDocument {
    let mut chunks: Vec<&str> = text.split('\x0c').collect();
    if chunks.len() > 1 && chunks.last().is_some_and(|c| c.trim().is_empty()) {
        chunks.pop();
    }

    let pages = chunks
        .into_iter()
        .enumerate()
        .map(|(i, page_text)| ScannedPage {
            page_number: i + 1,
            text: page_text.to_string(),
            tables: detect_tables(page_text),
        })
        .collect();

    ScannedDocument { pages }
}
