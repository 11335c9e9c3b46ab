use cutsheet_core::error::CutsheetError;
use cutsheet_core::extraction::PdfScanner;
use std::path::PathBuf;

use crate::scanner::pdf_scanner;

pub fn run(
    pdf_file: PathBuf,
    output_file: Option<PathBuf>,
    timeout: u64,
) -> Result<(), CutsheetError> {
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let doc = pdf_scanner(timeout).scan(&pdf_bytes)?;
    let json = serde_json::to_string_pretty(&doc)?;

    match output_file {
        Some(path) => {
            std::fs::write(&path, json)?;
            eprintln!(
                "Scanned {} page(s), {} table(s), written to {}",
                doc.page_count(),
                doc.table_count(),
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}
