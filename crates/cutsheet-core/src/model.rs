use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CutsheetError;
use crate::parsing::values::coerce_number;

/// Canonical column names of a normalized cut-sheet table, in order.
pub const CANONICAL_COLUMNS: [&str; 8] = [
    "Part ID",
    "Part Name",
    "Cart Loading",
    "Qty Req",
    "Qty Nested",
    "Part Description",
    "Production Instructions",
    "Material",
];

/// Position of "Cart Loading" in [`CANONICAL_COLUMNS`].
pub const CART_LOADING_INDEX: usize = 2;

/// Aggregation policy applied to the normalized rows of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// One record per (Program, Part Name) with usage metrics.
    #[default]
    Parts,
    /// One record per Program with part counts for cycle-time planning.
    CycleTime,
    /// The first OFFAL part of every Program.
    Offal,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Parts, Variant::CycleTime, Variant::Offal];

    pub fn name(&self) -> &'static str {
        match self {
            Variant::Parts => "parts",
            Variant::CycleTime => "cycle-time",
            Variant::Offal => "offal",
        }
    }

    /// Name of the worksheet the report is exported to.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            Variant::Parts | Variant::CycleTime => "Summary",
            Variant::Offal => "OFFAL Parts",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = CutsheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Variant::ALL
            .into_iter()
            .find(|v| v.name() == lower)
            .ok_or_else(|| CutsheetError::UnknownVariant(s.to_string()))
    }
}

/// Raw table shapes the normalizer recognizes after column pruning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableShape {
    /// All eight canonical columns.
    EightColumn,
    /// Everything except "Cart Loading".
    SevenColumn,
}

impl TableShape {
    pub fn from_column_count(n: usize) -> Option<TableShape> {
        match n {
            8 => Some(TableShape::EightColumn),
            7 => Some(TableShape::SevenColumn),
            _ => None,
        }
    }

    pub fn has_cart_loading(&self) -> bool {
        matches!(self, TableShape::EightColumn)
    }
}

/// One table row mapped onto the canonical schema, before metadata is attached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub part_id: Option<String>,
    pub part_name: Option<String>,
    pub cart_loading: Option<String>,
    pub qty_req: Option<String>,
    pub qty_nested: Option<String>,
    pub part_description: Option<String>,
    pub production_instructions: Option<String>,
    pub material: Option<String>,
}

/// Scalars parsed once per document and copied into each of its rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub program: String,
    pub sheet: Option<f64>,
    pub kit: Option<f64>,
    pub page_count: usize,
    pub thickness: Option<f64>,
    pub scrap_sheet1: Option<String>,
    pub scrap_sheet2: Option<String>,
}

/// Where a normalized row came from inside its document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSource {
    pub page_number: usize,
    /// Index of the table on its page, in detection order.
    pub table_index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub program: String,
    pub part_id: Option<String>,
    pub part_name: Option<String>,
    pub cart_loading: Option<String>,
    pub qty_req: f64,
    pub qty_nested: f64,
    pub part_description: Option<String>,
    pub production_instructions: Option<String>,
    pub material: Option<String>,
    pub sheet: Option<f64>,
    pub kit: Option<f64>,
    pub page_count: usize,
    pub thickness: Option<f64>,
    pub scrap_sheet1: Option<String>,
    pub scrap_sheet2: Option<String>,
    pub source: RowSource,
}

impl NormalizedRow {
    /// Attach document metadata to a table row. Quantities are coerced to
    /// numbers here; anything non-numeric counts as zero.
    pub fn from_table_row(row: TableRow, meta: &DocumentMetadata, source: RowSource) -> Self {
        NormalizedRow {
            program: meta.program.clone(),
            qty_req: coerce_number(row.qty_req.as_deref()),
            qty_nested: coerce_number(row.qty_nested.as_deref()),
            part_id: row.part_id,
            part_name: row.part_name,
            cart_loading: row.cart_loading,
            part_description: row.part_description,
            production_instructions: row.production_instructions,
            material: row.material,
            sheet: meta.sheet,
            kit: meta.kit,
            page_count: meta.page_count,
            thickness: meta.thickness,
            scrap_sheet1: meta.scrap_sheet1.clone(),
            scrap_sheet2: meta.scrap_sheet2.clone(),
            source,
        }
    }
}
