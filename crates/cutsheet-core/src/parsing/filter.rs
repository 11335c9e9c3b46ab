use crate::extraction::Cell;
use crate::model::NormalizedRow;

/// Marker of the yield footer lines that sit inside a table's row span.
const YIELD_MARKER: &str = "yield:";

/// True if any cell of the row contains "Yield:" (any case).
pub fn is_yield_row(row: &[Cell]) -> bool {
    row.iter()
        .flatten()
        .any(|cell| cell.to_lowercase().contains(YIELD_MARKER))
}

/// Remove the yield footer rows from a table's data rows.
pub fn drop_yield_rows(rows: &[Vec<Cell>]) -> Vec<Vec<Cell>> {
    rows.iter().filter(|r| !is_yield_row(r)).cloned().collect()
}

/// Keep only rows that carry a part name.
pub fn retain_named_parts(rows: Vec<NormalizedRow>) -> Vec<NormalizedRow> {
    rows.into_iter().filter(|r| r.part_name.is_some()).collect()
}

/// OFFAL parts are identified by their name, in any case.
pub fn is_offal(part_name: Option<&str>) -> bool {
    part_name.is_some_and(|n| n.to_lowercase().contains("offal"))
}

/// RELIEF cuts are not physical parts; they are marked in the description.
pub fn is_relief(part_description: Option<&str>) -> bool {
    part_description.is_some_and(|d| d.contains("RELIEF"))
}

/// The first OFFAL row of every program, in first-seen program order.
pub fn first_offal_per_program(rows: &[NormalizedRow]) -> Vec<&NormalizedRow> {
    let mut seen: Vec<&str> = Vec::new();
    let mut out = Vec::new();
    for row in rows {
        if !is_offal(row.part_name.as_deref()) || seen.contains(&row.program.as_str()) {
            continue;
        }
        seen.push(&row.program);
        out.push(row);
    }
    out
}
