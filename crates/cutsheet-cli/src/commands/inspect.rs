use cutsheet_core::error::CutsheetError;
use cutsheet_core::export::read_report;
use cutsheet_core::model::Variant;
use std::path::PathBuf;

use crate::output;

pub fn run(xlsx_file: PathBuf, variant: &str, output_format: &str) -> Result<(), CutsheetError> {
    let variant: Variant = variant.parse()?;
    let bytes = std::fs::read(&xlsx_file)?;
    let report = read_report(&bytes, variant)?;

    match output_format {
        "json" => output::json::print(&report)?,
        _ => output::table::print_report(&report),
    }

    Ok(())
}
