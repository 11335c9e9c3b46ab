use crate::error::CutsheetError;
use crate::extraction::Cell;
use crate::model::{TableRow, TableShape, CART_LOADING_INDEX};
use crate::parsing::values::parse_number;

/// A raw table mapped onto the canonical 8-field schema.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    /// Shape the table had after column pruning.
    pub shape: TableShape,
    pub rows: Vec<TableRow>,
}

/// Normalize the data rows of a raw table (header already removed).
///
/// Steps:
/// 1. Pad ragged rows with empty cells to the widest row
/// 2. Drop rows with no content at all
/// 3. Drop placeholder columns (entirely empty, or entirely zero)
/// 4. Map the remaining 8 or 7 columns onto the canonical schema
pub fn normalize(rows: &[Vec<Cell>]) -> Result<NormalizedTable, CutsheetError> {
    let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);

    let rows: Vec<Vec<Cell>> = rows
        .iter()
        .filter(|r| r.iter().any(|c| c.is_some()))
        .map(|r| {
            let mut padded = r.clone();
            padded.resize(width, None);
            padded
        })
        .collect();

    let kept: Vec<usize> = (0..width)
        .filter(|&col| !is_placeholder_column(&rows, col))
        .collect();

    let shape = TableShape::from_column_count(kept.len())
        .ok_or(CutsheetError::SchemaMismatch { columns: kept.len() })?;

    let rows = rows
        .iter()
        .map(|r| {
            let mut cells: Vec<Cell> = kept.iter().map(|&col| r[col].clone()).collect();
            if !shape.has_cart_loading() {
                cells.insert(CART_LOADING_INDEX, None);
            }
            table_row(cells)
        })
        .collect();

    Ok(NormalizedTable { shape, rows })
}

/// A column is padding when every cell is empty, or when every cell reads as
/// zero (empty cells count as zero). A single non-numeric cell keeps it.
fn is_placeholder_column(rows: &[Vec<Cell>], col: usize) -> bool {
    let all_empty = rows.iter().all(|r| r[col].is_none());
    let all_zero = rows.iter().all(|r| match &r[col] {
        None => true,
        Some(s) => parse_number(s) == Some(0.0),
    });
    all_empty || all_zero
}

fn table_row(cells: Vec<Cell>) -> TableRow {
    let mut it = cells.into_iter();
    TableRow {
        part_id: it.next().flatten(),
        part_name: it.next().flatten(),
        cart_loading: it.next().flatten(),
        qty_req: it.next().flatten(),
        qty_nested: it.next().flatten(),
        part_description: it.next().flatten(),
        production_instructions: it.next().flatten(),
        material: it.next().flatten(),
    }
}
