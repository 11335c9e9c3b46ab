use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::error::CutsheetError;
use crate::model::NormalizedRow;
use crate::parsing::filter::is_relief;

/// Report dates are written month/day/year.
pub const REPORT_DATE_FORMAT: &str = "%m/%d/%Y";

/// A left/right pair in one description, e.g. "LAF-RAF" or "LFT/RFT".
static LR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)L\S+\W+R\S+").expect("left/right pattern is valid"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleTimeSummary {
    pub program: String,
    pub date: String,
    pub frames_per_kit: Option<f64>,
    /// Page count of the program's document.
    pub number_of_tables: usize,
    pub different_parts: u64,
    pub total_parts: f64,
}

/// Physical parts behind one description: a mirrored left/right description
/// stands for two parts.
pub fn count_parts_with_lr_pattern(part_description: Option<&str>) -> u64 {
    match part_description {
        Some(desc) if LR_PATTERN.is_match(desc) => 2,
        _ => 1,
    }
}

pub fn parse_report_date(s: &str) -> Result<NaiveDate, CutsheetError> {
    NaiveDate::parse_from_str(s.trim(), REPORT_DATE_FORMAT)
        .map_err(|e| CutsheetError::InvalidDate(format!("'{s}': {e}")))
}

/// One record per program, sorted by program.
///
/// RELIEF rows are left out of the distinct-part count but still add to the
/// total number of nested parts.
pub fn summarize(rows: &[NormalizedRow], report_date: NaiveDate) -> Vec<CycleTimeSummary> {
    let date = report_date.format(REPORT_DATE_FORMAT).to_string();
    let mut groups: BTreeMap<&str, CycleTimeSummary> = BTreeMap::new();

    for row in rows {
        let summary = groups
            .entry(row.program.as_str())
            .or_insert_with(|| CycleTimeSummary {
                program: row.program.clone(),
                date: date.clone(),
                frames_per_kit: None,
                number_of_tables: row.page_count,
                different_parts: 0,
                total_parts: 0.0,
            });

        if summary.frames_per_kit.is_none() {
            summary.frames_per_kit = row.kit;
        }
        summary.total_parts += row.qty_nested;
        if !is_relief(row.part_description.as_deref()) {
            summary.different_parts += count_parts_with_lr_pattern(row.part_description.as_deref());
        }
    }

    groups.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(program: &str, description: Option<&str>, qty_nested: f64) -> NormalizedRow {
        NormalizedRow {
            program: program.into(),
            part_name: Some("part".into()),
            part_description: description.map(|s| s.to_string()),
            qty_nested,
            kit: Some(4.0),
            page_count: 3,
            ..Default::default()
        }
    }

    #[test]
    fn test_lr_pattern() {
        assert_eq!(count_parts_with_lr_pattern(Some("LAF-RAF Back Post")), 2);
        assert_eq!(count_parts_with_lr_pattern(Some("LFT/RFT")), 2);
        assert_eq!(count_parts_with_lr_pattern(Some("lh\\rh arm")), 2);
        assert_eq!(count_parts_with_lr_pattern(Some("Bracket Assembly")), 1);
        assert_eq!(count_parts_with_lr_pattern(None), 1);
    }

    #[test]
    fn test_parse_report_date() {
        let d = parse_report_date("03/07/2025").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 3, 7).unwrap());
        assert!(matches!(
            parse_report_date("2025-03-07"),
            Err(CutsheetError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_summarize_counts() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let rows = vec![
            row("P2", Some("LAF-RAF Back Post"), 4.0),
            row("P2", Some("Seat Deck"), 2.0),
            row("P2", Some("RELIEF CUT"), 6.0),
            row("P1", None, 1.0),
        ];

        let summaries = summarize(&rows, date);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].program, "P1");
        assert_eq!(summaries[0].different_parts, 1);

        let p2 = &summaries[1];
        assert_eq!(p2.different_parts, 3);
        assert_eq!(p2.total_parts, 12.0);
        assert_eq!(p2.frames_per_kit, Some(4.0));
        assert_eq!(p2.number_of_tables, 3);
        assert_eq!(p2.date, "03/07/2025");
    }

    #[test]
    fn test_frames_per_kit_first_non_empty() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let mut first = row("P", None, 1.0);
        first.kit = None;
        let summaries = summarize(&[first, row("P", None, 1.0)], date);
        assert_eq!(summaries[0].frames_per_kit, Some(4.0));
    }
}
