//! Aggregator
//! Rolls the filtered trade records up into one total per month.

use crate::data::TradeRecord;
use std::collections::HashMap;

/// Sum of `value` over all filtered records sharing a month.
///
/// Recomputed on every pipeline run, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotal {
    pub month: f64,
    pub total: f64,
}

/// Reduce-by-key in one pass: a running total per distinct month,
/// materialized in the order each month was first encountered.
///
/// Month keys group by exact bit pattern. For finite months that is
/// plain key equality; the single NaN pattern produced by failed casts
/// collapses into one group.
pub fn monthly_totals(records: &[TradeRecord]) -> Vec<MonthlyTotal> {
    let mut sums: HashMap<u64, f64> = HashMap::new();
    let mut order: Vec<f64> = Vec::new();

    for record in records {
        let key = record.month.to_bits();
        if let Some(total) = sums.get_mut(&key) {
            *total += record.value;
        } else {
            sums.insert(key, record.value);
            order.push(record.month);
        }
    }

    order
        .into_iter()
        .map(|month| MonthlyTotal {
            month,
            total: sums[&month.to_bits()],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(month: f64, value: f64) -> TradeRecord {
        TradeRecord {
            fiber_type: "raw_cotton".to_string(),
            direction: Some(crate::data::TradeDirection::Import),
            category: "yarn".to_string(),
            sub_category: "ring spun".to_string(),
            year: 2020.0,
            month,
            value,
        }
    }

    #[test]
    fn test_groups_appear_in_first_encountered_order() {
        let records = vec![
            record(3.0, 5.0),
            record(1.0, 100.0),
            record(3.0, 7.0),
            record(2.0, 30.0),
        ];

        let totals = monthly_totals(&records);
        assert_eq!(totals.len(), 3);
        assert_eq!(totals[0], MonthlyTotal { month: 3.0, total: 12.0 });
        assert_eq!(totals[1], MonthlyTotal { month: 1.0, total: 100.0 });
        assert_eq!(totals[2], MonthlyTotal { month: 2.0, total: 30.0 });
    }

    #[test]
    fn test_sum_is_independent_of_order_within_a_group() {
        let forward = vec![record(1.0, 100.0), record(1.0, 50.0), record(1.0, 0.25)];
        let reversed: Vec<_> = forward.iter().rev().cloned().collect();

        let a = monthly_totals(&forward);
        let b = monthly_totals(&reversed);
        assert_eq!(a[0].total, 150.25);
        assert_eq!(a[0].total, b[0].total);
    }

    #[test]
    fn test_every_distinct_month_appears_exactly_once() {
        let records = vec![
            record(1.0, 1.0),
            record(2.0, 2.0),
            record(1.0, 1.0),
            record(12.0, 3.0),
            record(2.0, 2.0),
        ];

        let totals = monthly_totals(&records);
        let mut months: Vec<f64> = totals.iter().map(|t| t.month).collect();
        months.sort_by(f64::total_cmp);
        assert_eq!(months, vec![1.0, 2.0, 12.0]);
    }

    #[test]
    fn test_single_record_group_equals_its_value() {
        let totals = monthly_totals(&[record(6.0, 42.5)]);
        assert_eq!(totals, vec![MonthlyTotal { month: 6.0, total: 42.5 }]);
    }

    #[test]
    fn test_scenario_silk_already_filtered_out() {
        // The filtered scenario from the trade data: months 1, 1, 2.
        let records = vec![record(1.0, 100.0), record(1.0, 50.0), record(2.0, 30.0)];

        let totals = monthly_totals(&records);
        assert_eq!(
            totals,
            vec![
                MonthlyTotal { month: 1.0, total: 150.0 },
                MonthlyTotal { month: 2.0, total: 30.0 },
            ]
        );
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        assert!(monthly_totals(&[]).is_empty());
    }

    #[test]
    fn test_nan_values_propagate_into_the_sum() {
        let totals = monthly_totals(&[record(1.0, 10.0), record(1.0, f64::NAN)]);
        assert_eq!(totals.len(), 1);
        assert!(totals[0].total.is_nan());
    }

    #[test]
    fn test_nan_months_collapse_into_one_group() {
        let totals = monthly_totals(&[record(f64::NAN, 1.0), record(f64::NAN, 2.0)]);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].total, 3.0);
    }
}
