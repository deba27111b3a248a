//! Published national sales per wheeler category.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::{PerCategory, WheelerCategory};

/// National sales of one category for the two published years.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NationalSales {
    pub first_year: f64,
    pub second_year: f64,
}

impl NationalSales {
    pub fn new(first_year: f64, second_year: f64) -> Self {
        Self {
            first_year,
            second_year,
        }
    }

    /// Authoritative national cumulative total for the category.
    pub fn total(&self) -> f64 {
        self.first_year + self.second_year
    }

    pub fn years(&self) -> [f64; 2] {
        [self.first_year, self.second_year]
    }
}

/// National category × year breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NationalBreakdown {
    pub sales: PerCategory<NationalSales>,
}

impl NationalBreakdown {
    pub fn new(sales: PerCategory<NationalSales>) -> Self {
        Self { sales }
    }

    pub fn category(&self, category: WheelerCategory) -> NationalSales {
        *self.sales.get(category)
    }

    pub fn totals(&self) -> PerCategory<f64> {
        self.sales.map(|_, sales| sales.total())
    }
}

/// Projected national energy requirement (GWh) keyed by fiscal-year label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyProjections {
    values: BTreeMap<String, Option<f64>>,
}

impl EnergyProjections {
    pub fn new<S: AsRef<str>>(entries: impl IntoIterator<Item = (S, Option<f64>)>) -> Self {
        let mut projections = Self::default();
        for (label, value) in entries {
            projections.insert(label.as_ref(), value);
        }
        projections
    }

    /// Later entries for the same label replace earlier ones.
    pub fn insert(&mut self, label: &str, value: Option<f64>) {
        self.values.insert(label.trim().to_string(), value);
    }

    /// `None` when the label is absent; `Some(None)` when present but unparseable.
    pub fn get(&self, label: &str) -> Option<Option<f64>> {
        self.values.get(label.trim()).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_projection_distinguishes_absent_from_unparseable() {
        let projections =
            EnergyProjections::new([("2024-25", Some(1200.0)), ("2025-26", None)]);
        assert_eq!(projections.get(" 2024-25"), Some(Some(1200.0)));
        assert_eq!(projections.get("2025-26"), Some(None));
        assert_eq!(projections.get("2026-27"), None);
    }

    #[test]
    fn two_wheeler_total_sums_published_years() {
        let breakdown = NationalBreakdown::new(PerCategory {
            two_wheeler: NationalSales::new(631_464.0, 859_376.0),
            three_wheeler: NationalSales::new(352_710.0, 582_793.0),
            four_wheeler: NationalSales::new(38_240.0, 82_105.0),
        });
        let totals = breakdown.totals();
        assert_eq!(totals.two_wheeler, 1_490_840.0);
        assert_eq!(totals.three_wheeler, 935_503.0);
        assert_eq!(totals.four_wheeler, 120_345.0);
    }
}
