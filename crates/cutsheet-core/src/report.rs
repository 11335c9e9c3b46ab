use serde::Serialize;
use std::fmt;

use crate::aggregate::{Aggregation, CycleTimeSummary, OffalSummary, PartSummary};
use crate::model::Variant;
use crate::parsing::values::coerce_part_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Number,
    Integer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportColumn {
    pub name: String,
    pub kind: ColumnKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Integer(i64),
}

impl CellValue {
    /// Blank text is exported as an empty cell.
    pub fn text(value: Option<&str>) -> CellValue {
        match value {
            Some(s) if !s.is_empty() => CellValue::Text(s.to_string()),
            _ => CellValue::Empty,
        }
    }

    pub fn number(value: Option<f64>) -> CellValue {
        value.map_or(CellValue::Empty, CellValue::Number)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Integer(v) => write!(f, "{v}"),
        }
    }
}

/// A named, ordered, typed record set ready for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub sheet_name: String,
    pub columns: Vec<ReportColumn>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Report {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Cell of `row` in the named column.
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.rows.get(row)?.get(self.column_index(column)?)
    }
}

const PART_COLUMNS: [(&str, ColumnKind); 14] = [
    ("Program", ColumnKind::Text),
    ("Part Name", ColumnKind::Text),
    ("Sheet", ColumnKind::Number),
    ("Kit", ColumnKind::Number),
    ("Part ID", ColumnKind::Integer),
    ("Cart Loading", ColumnKind::Text),
    ("Qty Req", ColumnKind::Number),
    ("Qty Nested", ColumnKind::Number),
    ("Part Description", ColumnKind::Text),
    ("Production Instructions", ColumnKind::Text),
    ("Material", ColumnKind::Text),
    ("Usage Wood Gross", ColumnKind::Number),
    ("Usage Wood Net", ColumnKind::Number),
    ("Usage CNC Part", ColumnKind::Number),
];

const CYCLE_TIME_COLUMNS: [(&str, ColumnKind); 6] = [
    ("Program", ColumnKind::Text),
    ("Date", ColumnKind::Text),
    ("Frames/kit", ColumnKind::Number),
    ("Number of Tables", ColumnKind::Integer),
    ("Different Parts", ColumnKind::Integer),
    ("Total # of parts", ColumnKind::Number),
];

const OFFAL_COLUMNS: [(&str, ColumnKind); 7] = [
    ("Program", ColumnKind::Text),
    ("Part Name", ColumnKind::Text),
    ("Block Offal", ColumnKind::Number),
    ("Thickness", ColumnKind::Number),
    ("Material", ColumnKind::Text),
    ("Scrap Sheet1", ColumnKind::Text),
    ("Scrap Sheet2", ColumnKind::Text),
];

/// Output columns of a variant, in export order.
pub fn columns_for(variant: Variant) -> Vec<ReportColumn> {
    let columns: &[(&str, ColumnKind)] = match variant {
        Variant::Parts => &PART_COLUMNS,
        Variant::CycleTime => &CYCLE_TIME_COLUMNS,
        Variant::Offal => &OFFAL_COLUMNS,
    };
    columns
        .iter()
        .map(|(name, kind)| ReportColumn {
            name: name.to_string(),
            kind: *kind,
        })
        .collect()
}

fn part_cells(s: &PartSummary) -> Vec<CellValue> {
    vec![
        CellValue::text(Some(s.program.as_str())),
        CellValue::text(Some(s.part_name.as_str())),
        CellValue::number(s.sheet),
        CellValue::number(s.kit),
        CellValue::Integer(coerce_part_id(s.part_id.as_deref())),
        CellValue::text(s.cart_loading.as_deref()),
        CellValue::Number(s.qty_req),
        CellValue::Number(s.qty_nested),
        CellValue::text(s.part_description.as_deref()),
        CellValue::text(s.production_instructions.as_deref()),
        CellValue::text(s.material.as_deref()),
        CellValue::number(s.usage_wood_gross),
        CellValue::number(s.usage_wood_net),
        CellValue::number(s.usage_cnc_part),
    ]
}

fn cycle_time_cells(s: &CycleTimeSummary) -> Vec<CellValue> {
    vec![
        CellValue::text(Some(s.program.as_str())),
        CellValue::text(Some(s.date.as_str())),
        CellValue::number(s.frames_per_kit),
        CellValue::Integer(s.number_of_tables as i64),
        CellValue::Integer(s.different_parts as i64),
        CellValue::Number(s.total_parts),
    ]
}

fn offal_cells(s: &OffalSummary) -> Vec<CellValue> {
    vec![
        CellValue::text(Some(s.program.as_str())),
        CellValue::text(Some(s.part_name.as_str())),
        CellValue::Number(s.block_offal),
        CellValue::number(s.thickness),
        CellValue::text(Some(s.material.as_str())),
        CellValue::text(s.scrap_sheet1.as_deref()),
        CellValue::text(s.scrap_sheet2.as_deref()),
    ]
}

/// Lay out aggregated records as the exported record set: Program first,
/// Part ID as an integer (unknown ids become 0), blanks as empty cells.
pub fn assemble(aggregation: &Aggregation) -> Report {
    let variant = aggregation.variant();
    let rows = match aggregation {
        Aggregation::Parts(records) => records.iter().map(part_cells).collect(),
        Aggregation::CycleTime(records) => records.iter().map(cycle_time_cells).collect(),
        Aggregation::Offal(records) => records.iter().map(offal_cells).collect(),
    };

    Report {
        sheet_name: variant.sheet_name().to_string(),
        columns: columns_for(variant),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(part_id: Option<&str>) -> PartSummary {
        PartSummary {
            program: "PROG123".into(),
            part_name: "Bracket".into(),
            sheet: Some(2.0),
            kit: Some(1.0),
            part_id: part_id.map(|s| s.to_string()),
            cart_loading: None,
            qty_req: 5.0,
            qty_nested: 5.0,
            part_description: Some(String::new()),
            production_instructions: None,
            material: Some("Birch".into()),
            usage_wood_gross: Some(65.92),
            usage_wood_net: Some(64.0),
            usage_cnc_part: Some(5.0),
        }
    }

    #[test]
    fn test_column_sets_start_with_program() {
        for variant in Variant::ALL {
            let columns = columns_for(variant);
            assert_eq!(columns[0].name, "Program");
        }
        assert_eq!(columns_for(Variant::Parts).len(), 14);
    }

    #[test]
    fn test_assemble_parts() {
        let report = assemble(&Aggregation::Parts(vec![part(Some("42")), part(Some("X9"))]));
        assert_eq!(report.sheet_name, "Summary");
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.value(0, "Part ID"), Some(&CellValue::Integer(42)));
        assert_eq!(report.value(1, "Part ID"), Some(&CellValue::Integer(0)));
        assert_eq!(report.value(0, "Cart Loading"), Some(&CellValue::Empty));
        assert_eq!(report.value(0, "Part Description"), Some(&CellValue::Empty));
        assert_eq!(
            report.value(0, "Usage Wood Gross"),
            Some(&CellValue::Number(65.92))
        );
        assert!(report.rows.iter().all(|r| r.len() == report.columns.len()));
    }

    #[test]
    fn test_assemble_offal_sheet_name() {
        let report = assemble(&Aggregation::Offal(vec![OffalSummary {
            program: "P".into(),
            part_name: "OFFAL".into(),
            block_offal: 3.0,
            thickness: Some(9.0),
            material: "280062".into(),
            scrap_sheet1: Some("12%".into()),
            scrap_sheet2: None,
        }]));
        assert_eq!(report.sheet_name, "OFFAL Parts");
        assert_eq!(report.value(0, "Material"), Some(&CellValue::Text("280062".into())));
        assert_eq!(report.value(0, "Scrap Sheet2"), Some(&CellValue::Empty));
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::Number(5.0).to_string(), "5");
        assert_eq!(CellValue::Number(65.92).to_string(), "65.92");
        assert_eq!(CellValue::Empty.to_string(), "");
    }
}
