use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::NormalizedRow;
use crate::parsing::filter::is_offal;
use crate::parsing::values::round_dp;

/// Gross wood area consumed per sheet, including saw kerf and trim.
pub const GROSS_AREA_PER_SHEET: f64 = 32.96;
/// Net wood area of one sheet.
pub const NET_AREA_PER_SHEET: f64 = 32.0;

/// One part of one program, quantities summed over every table it appears in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSummary {
    pub program: String,
    pub part_name: String,
    pub sheet: Option<f64>,
    pub kit: Option<f64>,
    pub part_id: Option<String>,
    pub cart_loading: Option<String>,
    pub qty_req: f64,
    pub qty_nested: f64,
    pub part_description: Option<String>,
    pub production_instructions: Option<String>,
    pub material: Option<String>,
    pub usage_wood_gross: Option<f64>,
    pub usage_wood_net: Option<f64>,
    pub usage_cnc_part: Option<f64>,
}

/// Wood usage per kit for a given sheet area. `None` when the kit count is
/// missing or zero; a missing sheet count reads as zero.
pub fn usage_wood(area_per_sheet: f64, sheet: Option<f64>, kit: Option<f64>) -> Option<f64> {
    let kit = kit.filter(|k| *k != 0.0)?;
    Some(round_dp(area_per_sheet * sheet.unwrap_or(0.0) / kit, 3))
}

/// Parts nested per kit. OFFAL is reported as nested, never divided.
pub fn usage_cnc_part(part_name: &str, qty_nested: f64, kit: Option<f64>) -> Option<f64> {
    if is_offal(Some(part_name)) {
        return Some(qty_nested);
    }
    let kit = kit.filter(|k| *k != 0.0)?;
    Some(round_dp(qty_nested / kit, 3))
}

/// Keep the first non-empty value seen.
fn keep_first<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
    if slot.is_none() {
        slot.clone_from(value);
    }
}

/// Group rows by (Program, Part Name), sorted ascending by both.
///
/// Quantities are summed; every other field keeps its first non-empty value.
pub fn summarize(rows: &[NormalizedRow]) -> Vec<PartSummary> {
    let mut groups: BTreeMap<(String, String), PartSummary> = BTreeMap::new();

    for row in rows {
        let Some(part_name) = row.part_name.as_ref() else {
            continue;
        };

        let summary = groups
            .entry((row.program.clone(), part_name.clone()))
            .or_insert_with(|| PartSummary {
                program: row.program.clone(),
                part_name: part_name.clone(),
                sheet: None,
                kit: None,
                part_id: None,
                cart_loading: None,
                qty_req: 0.0,
                qty_nested: 0.0,
                part_description: None,
                production_instructions: None,
                material: None,
                usage_wood_gross: None,
                usage_wood_net: None,
                usage_cnc_part: None,
            });

        summary.qty_req += row.qty_req;
        summary.qty_nested += row.qty_nested;
        keep_first(&mut summary.sheet, &row.sheet);
        keep_first(&mut summary.kit, &row.kit);
        keep_first(&mut summary.part_id, &row.part_id);
        keep_first(&mut summary.cart_loading, &row.cart_loading);
        keep_first(&mut summary.part_description, &row.part_description);
        keep_first(&mut summary.production_instructions, &row.production_instructions);
        keep_first(&mut summary.material, &row.material);
    }

    groups
        .into_values()
        .map(|mut s| {
            s.usage_wood_gross = usage_wood(GROSS_AREA_PER_SHEET, s.sheet, s.kit);
            s.usage_wood_net = usage_wood(NET_AREA_PER_SHEET, s.sheet, s.kit);
            s.usage_cnc_part = usage_cnc_part(&s.part_name, s.qty_nested, s.kit);
            s
        })
        .collect()
}
