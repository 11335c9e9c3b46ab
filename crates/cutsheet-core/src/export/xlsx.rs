use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::error::CutsheetError;
use crate::model::Variant;
use crate::report::{columns_for, CellValue, ColumnKind, Report};

/// Render a report as a single-sheet xlsx workbook. Row 0 holds the bold
/// column headers and empty cells are left unwritten.
pub fn write_report(report: &Report) -> Result<Vec<u8>, CutsheetError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    fill_worksheet(worksheet, report).map_err(export_error)?;
    workbook.save_to_buffer().map_err(export_error)
}

fn fill_worksheet(worksheet: &mut Worksheet, report: &Report) -> Result<(), XlsxError> {
    worksheet.set_name(&report.sheet_name)?;

    let header = Format::new().set_bold();
    for (col, column) in report.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, &column.name, &header)?;
    }

    for (idx, cells) in report.rows.iter().enumerate() {
        let row = idx as u32 + 1;
        for (col, cell) in cells.iter().enumerate() {
            let col = col as u16;
            match cell {
                CellValue::Empty => {}
                CellValue::Text(s) => {
                    worksheet.write_string(row, col, s)?;
                }
                CellValue::Number(v) => {
                    worksheet.write_number(row, col, *v)?;
                }
                CellValue::Integer(v) => {
                    worksheet.write_number(row, col, *v as f64)?;
                }
            }
        }
    }

    worksheet.autofit();
    Ok(())
}

fn export_error(e: XlsxError) -> CutsheetError {
    CutsheetError::Export(e.to_string())
}

/// Read a workbook written by [`write_report`] back into a [`Report`].
///
/// The header row must match the column set of `variant` exactly; cells are
/// coerced back to the column's kind.
pub fn read_report(bytes: &[u8], variant: Variant) -> Result<Report, CutsheetError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| CutsheetError::ReadBack(format!("failed to open xlsx: {e}")))?;

    let sheet_name = variant.sheet_name();
    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| CutsheetError::ReadBack(format!("sheet '{sheet_name}' not found: {e}")))?;

    let columns = columns_for(variant);
    let mut sheet_rows = range.rows();

    let header: Vec<String> = sheet_rows
        .next()
        .map(|cells| cells.iter().map(|c| cell_as_string(c).unwrap_or_default()).collect())
        .unwrap_or_default();
    let expected: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    if header != expected {
        return Err(CutsheetError::ReadBack(format!(
            "unexpected header row {header:?}, expected {expected:?}"
        )));
    }

    let mut rows = Vec::new();
    for cells in sheet_rows {
        let row: Vec<CellValue> = columns
            .iter()
            .enumerate()
            .map(|(col, column)| coerce_cell(cells.get(col), column.kind))
            .collect::<Result<_, _>>()?;
        rows.push(row);
    }

    Ok(Report {
        sheet_name: sheet_name.to_string(),
        columns,
        rows,
    })
}

fn coerce_cell(cell: Option<&Data>, kind: ColumnKind) -> Result<CellValue, CutsheetError> {
    let Some(cell) = cell else {
        return Ok(CellValue::Empty);
    };
    if matches!(cell, Data::Empty) {
        return Ok(CellValue::Empty);
    }

    match kind {
        ColumnKind::Text => Ok(CellValue::text(cell_as_string(cell).as_deref())),
        ColumnKind::Number => cell_as_f64(cell)
            .map(CellValue::Number)
            .ok_or_else(|| CutsheetError::ReadBack(format!("expected a number, found '{cell}'"))),
        ColumnKind::Integer => cell_as_f64(cell)
            .map(|f| CellValue::Integer(f as i64))
            .ok_or_else(|| CutsheetError::ReadBack(format!("expected an integer, found '{cell}'"))),
    }
}

fn cell_as_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Empty => None,
        _ => Some(format!("{cell}")),
    }
}

fn cell_as_f64(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportColumn;

    fn offal_report() -> Report {
        Report {
            sheet_name: "OFFAL Parts".into(),
            columns: columns_for(Variant::Offal),
            rows: vec![vec![
                CellValue::Text("PROG1".into()),
                CellValue::Text("OFFAL".into()),
                CellValue::Number(3.0),
                CellValue::Number(18.0),
                CellValue::Text("280045WNK".into()),
                CellValue::Text("12.5%".into()),
                CellValue::Empty,
            ]],
        }
    }

    #[test]
    fn test_write_then_read_back() {
        let report = offal_report();
        let bytes = write_report(&report).unwrap();
        assert!(bytes.starts_with(b"PK"));

        let read = read_report(&bytes, Variant::Offal).unwrap();
        assert_eq!(read, report);
    }

    #[test]
    fn test_read_wrong_variant_fails() {
        let bytes = write_report(&offal_report()).unwrap();
        // "Summary" sheet does not exist in an OFFAL workbook.
        assert!(matches!(
            read_report(&bytes, Variant::Parts),
            Err(CutsheetError::ReadBack(_))
        ));
    }

    #[test]
    fn test_read_header_mismatch() {
        let report = Report {
            sheet_name: "Summary".into(),
            columns: vec![ReportColumn {
                name: "Program".into(),
                kind: ColumnKind::Text,
            }],
            rows: vec![vec![CellValue::Text("P".into())]],
        };
        let bytes = write_report(&report).unwrap();
        assert!(matches!(
            read_report(&bytes, Variant::CycleTime),
            Err(CutsheetError::ReadBack(_))
        ));
    }

    #[test]
    fn test_read_garbage_fails() {
        assert!(matches!(
            read_report(b"not a workbook", Variant::Parts),
            Err(CutsheetError::ReadBack(_))
        ));
    }
}
