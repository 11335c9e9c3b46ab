pub mod cycle_time;
pub mod offal;
pub mod parts;

pub use cycle_time::CycleTimeSummary;
pub use offal::OffalSummary;
pub use parts::PartSummary;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{NormalizedRow, Variant};

/// Records produced by one aggregation policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "variant", content = "records", rename_all = "kebab-case")]
pub enum Aggregation {
    Parts(Vec<PartSummary>),
    CycleTime(Vec<CycleTimeSummary>),
    Offal(Vec<OffalSummary>),
}

impl Aggregation {
    pub fn variant(&self) -> Variant {
        match self {
            Aggregation::Parts(_) => Variant::Parts,
            Aggregation::CycleTime(_) => Variant::CycleTime,
            Aggregation::Offal(_) => Variant::Offal,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Aggregation::Parts(r) => r.len(),
            Aggregation::CycleTime(r) => r.len(),
            Aggregation::Offal(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reduce named-part rows with the policy of the given variant.
///
/// `report_date` is only stamped on cycle-time records.
pub fn aggregate(rows: &[NormalizedRow], variant: Variant, report_date: NaiveDate) -> Aggregation {
    match variant {
        Variant::Parts => Aggregation::Parts(parts::summarize(rows)),
        Variant::CycleTime => Aggregation::CycleTime(cycle_time::summarize(rows, report_date)),
        Variant::Offal => Aggregation::Offal(offal::summarize(rows)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_dispatches_on_variant() {
        let rows = vec![NormalizedRow {
            program: "P".into(),
            part_name: Some("Bracket".into()),
            qty_nested: 2.0,
            ..Default::default()
        }];
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();

        let parts = aggregate(&rows, Variant::Parts, date);
        assert_eq!(parts.variant(), Variant::Parts);
        assert_eq!(parts.len(), 1);

        assert_eq!(aggregate(&rows, Variant::CycleTime, date).len(), 1);
        // No OFFAL part among the rows.
        assert!(aggregate(&rows, Variant::Offal, date).is_empty());
    }
}
