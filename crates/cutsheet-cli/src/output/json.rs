use cutsheet_core::error::CutsheetError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), CutsheetError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
