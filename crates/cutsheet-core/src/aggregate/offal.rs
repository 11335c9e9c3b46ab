use serde::{Deserialize, Serialize};

use crate::model::NormalizedRow;
use crate::parsing::filter::first_offal_per_program;
use crate::parsing::metadata::material_code;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffalSummary {
    pub program: String,
    pub part_name: String,
    pub block_offal: f64,
    pub thickness: Option<f64>,
    /// Material code looked up from the thickness, "" when unknown.
    pub material: String,
    pub scrap_sheet1: Option<String>,
    pub scrap_sheet2: Option<String>,
}

/// The first OFFAL part of every program, sorted by program.
pub fn summarize(rows: &[NormalizedRow]) -> Vec<OffalSummary> {
    let mut summaries: Vec<OffalSummary> = first_offal_per_program(rows)
        .into_iter()
        .map(|row| OffalSummary {
            program: row.program.clone(),
            part_name: row.part_name.clone().unwrap_or_default(),
            block_offal: row.qty_nested,
            thickness: row.thickness,
            material: material_code(row.thickness).to_string(),
            scrap_sheet1: row.scrap_sheet1.clone(),
            scrap_sheet2: row.scrap_sheet2.clone(),
        })
        .collect();

    summaries.sort_by(|a, b| a.program.cmp(&b.program));
    summaries
}
