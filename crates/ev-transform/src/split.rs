//! Distribution of national single-year sales across states.

use tracing::{info, warn};

use ev_model::{
    DataIssue, IssueKind, NationalBreakdown, PerCategory, PipelineStage, StateRecord, YearlySales,
};

#[derive(Debug, Clone)]
pub struct SplitOutcome {
    pub records: Vec<StateRecord>,
    /// Sum of cumulative sales across states, per category.
    pub cumulative_sums: PerCategory<f64>,
    pub issues: Vec<DataIssue>,
}

/// Assigns each state its share of the national figure for both published
/// years, weighted by the state's cumulative sales in the same category.
///
/// A category whose cumulative sum is zero gets no yearly values and yields a
/// [`IssueKind::ZeroDenominator`] issue.
pub fn split_yearly_sales(records: &[StateRecord], national: &NationalBreakdown) -> SplitOutcome {
    let cumulative_sums = PerCategory::from_fn(|category| {
        records
            .iter()
            .filter_map(|record| record.cumulative(category))
            .sum::<f64>()
    });

    let mut issues = Vec::new();
    for (category, sum) in cumulative_sums.iter() {
        if *sum == 0.0 {
            warn!(category = %category, "cumulative sales sum to zero; yearly values left unset");
            issues.push(
                DataIssue::new(
                    IssueKind::ZeroDenominator,
                    PipelineStage::Split,
                    format!("cumulative {category} sales sum to zero across states"),
                )
                .with_column(category.cumulative_label()),
            );
        }
    }

    let records: Vec<StateRecord> = records
        .iter()
        .map(|record| {
            let mut updated = record.clone();
            updated.yearly_sales = PerCategory::from_fn(|category| {
                let sum = *cumulative_sums.get(category);
                match record.cumulative(category) {
                    Some(cumulative) if sum != 0.0 => {
                        let share = cumulative / sum;
                        let [first, second] = national.category(category).years();
                        YearlySales {
                            first: Some(share * first),
                            second: Some(share * second),
                        }
                    }
                    _ => YearlySales::default(),
                }
            });
            updated
        })
        .collect();

    info!(
        states = records.len(),
        zero_sums = issues.len(),
        "split national sales by year"
    );
    SplitOutcome {
        records,
        cumulative_sums,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use ev_model::{NationalSales, WheelerCategory};

    use super::*;

    fn record(state: &str, values: [Option<f64>; 3]) -> StateRecord {
        let mut record = StateRecord::new(state);
        record.cumulative_sales = PerCategory {
            two_wheeler: values[0],
            three_wheeler: values[1],
            four_wheeler: values[2],
        };
        record
    }

    fn national() -> NationalBreakdown {
        NationalBreakdown::new(PerCategory {
            two_wheeler: NationalSales::new(800.0, 1200.0),
            three_wheeler: NationalSales::new(40.0, 60.0),
            four_wheeler: NationalSales::new(10.0, 30.0),
        })
    }

    #[test]
    fn shares_follow_cumulative_weights() {
        let records = vec![
            record("Goa", [Some(300.0), Some(1.0), None]),
            record("Kerala", [Some(100.0), Some(3.0), Some(5.0)]),
        ];
        let outcome = split_yearly_sales(&records, &national());

        let goa = outcome.records[0].yearly_sales;
        assert_eq!(goa.two_wheeler.values(), [Some(600.0), Some(900.0)]);
        assert_eq!(goa.three_wheeler.values(), [Some(10.0), Some(15.0)]);
        assert_eq!(goa.four_wheeler, YearlySales::default());
        let kerala = outcome.records[1].yearly_sales;
        assert_eq!(kerala.four_wheeler.values(), [Some(10.0), Some(30.0)]);
        assert_eq!(outcome.cumulative_sums.two_wheeler, 400.0);
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn zero_sum_category_is_reported_and_left_unset() {
        let records = vec![
            record("Goa", [Some(10.0), Some(0.0), None]),
            record("Kerala", [Some(30.0), None, None]),
        ];
        let outcome = split_yearly_sales(&records, &national());

        let columns: Vec<Option<&str>> = outcome
            .issues
            .iter()
            .map(|issue| issue.column.as_deref())
            .collect();
        assert_eq!(
            columns,
            vec![
                Some("Three Wheeler Sales (Cumulative)"),
                Some("Four Wheeler Sales (Cumulative)"),
            ]
        );
        assert!(outcome.records.iter().all(|r| {
            r.yearly_sales.three_wheeler == YearlySales::default()
                && r.yearly_sales.four_wheeler == YearlySales::default()
        }));
        assert_eq!(
            outcome.records[1].yearly_sales.two_wheeler.first,
            Some(600.0)
        );
        assert_eq!(
            outcome.records[1].cumulative(WheelerCategory::TwoWheeler),
            Some(30.0)
        );
    }
}
