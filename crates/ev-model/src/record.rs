//! Per-state record of the merged EV market table.

use serde::{Deserialize, Serialize};

use crate::category::{PerCategory, WheelerCategory, YearlySales};

/// Numeric attribute of a [`StateRecord`] that a source column can populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RecordField {
    TotalEvsSold,
    EvPenetration,
    Cumulative(WheelerCategory),
    PcsFeb2024,
    PcsMar2024,
    HighwayChargers,
    RetailOutletsWithCharging,
}

impl RecordField {
    /// Final column label of the field.
    pub fn label(self) -> String {
        match self {
            RecordField::TotalEvsSold => "Total EVs Sold".to_string(),
            RecordField::EvPenetration => "EV Penetration (%)".to_string(),
            RecordField::Cumulative(category) => category.cumulative_label(),
            RecordField::PcsFeb2024 => "No. of PCS (Feb 2024)".to_string(),
            RecordField::PcsMar2024 => "No. of PCS (Mar 2024)".to_string(),
            RecordField::HighwayChargers => "No. of Highway Chargers".to_string(),
            RecordField::RetailOutletsWithCharging => "No. of ROs with Charging".to_string(),
        }
    }
}

/// One row of the merged table, keyed by canonical state/UT name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    pub state: String,
    pub total_evs_sold: Option<f64>,
    pub ev_penetration_pct: Option<f64>,
    pub cumulative_sales: PerCategory<Option<f64>>,
    pub yearly_sales: PerCategory<YearlySales>,
    pub pcs_feb_2024: Option<f64>,
    pub pcs_mar_2024: Option<f64>,
    pub highway_chargers: Option<f64>,
    pub retail_outlets_with_charging: Option<f64>,
    /// Energy requirement projections (GWh), aligned with the configured fiscal-year labels.
    /// Empty until the enrichment stage runs.
    pub energy_requirement_gwh: Vec<Option<f64>>,
}

impl StateRecord {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            ..Self::default()
        }
    }

    pub fn field(&self, field: RecordField) -> Option<f64> {
        match field {
            RecordField::TotalEvsSold => self.total_evs_sold,
            RecordField::EvPenetration => self.ev_penetration_pct,
            RecordField::Cumulative(category) => *self.cumulative_sales.get(category),
            RecordField::PcsFeb2024 => self.pcs_feb_2024,
            RecordField::PcsMar2024 => self.pcs_mar_2024,
            RecordField::HighwayChargers => self.highway_chargers,
            RecordField::RetailOutletsWithCharging => self.retail_outlets_with_charging,
        }
    }

    fn field_mut(&mut self, field: RecordField) -> &mut Option<f64> {
        match field {
            RecordField::TotalEvsSold => &mut self.total_evs_sold,
            RecordField::EvPenetration => &mut self.ev_penetration_pct,
            RecordField::Cumulative(category) => self.cumulative_sales.get_mut(category),
            RecordField::PcsFeb2024 => &mut self.pcs_feb_2024,
            RecordField::PcsMar2024 => &mut self.pcs_mar_2024,
            RecordField::HighwayChargers => &mut self.highway_chargers,
            RecordField::RetailOutletsWithCharging => &mut self.retail_outlets_with_charging,
        }
    }

    /// Fills `field` only when it is still unset. Returns true when the value was taken.
    pub fn fill_field(&mut self, field: RecordField, value: f64) -> bool {
        let slot = self.field_mut(field);
        if slot.is_some() {
            return false;
        }
        *slot = Some(value);
        true
    }

    pub fn cumulative(&self, category: WheelerCategory) -> Option<f64> {
        *self.cumulative_sales.get(category)
    }

    /// Returns a copy with the given cumulative values replaced.
    #[must_use]
    pub fn with_cumulative(&self, values: PerCategory<Option<f64>>) -> Self {
        Self {
            cumulative_sales: values,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_field_keeps_first_value() {
        let mut record = StateRecord::new("Goa");
        assert!(record.fill_field(RecordField::PcsMar2024, 12.0));
        assert!(!record.fill_field(RecordField::PcsMar2024, 99.0));
        assert_eq!(record.pcs_mar_2024, Some(12.0));
    }

    #[test]
    fn cumulative_field_routes_to_category_slot() {
        let mut record = StateRecord::new("Goa");
        assert!(record.fill_field(RecordField::Cumulative(WheelerCategory::ThreeWheeler), 40.0));
        assert_eq!(record.cumulative(WheelerCategory::ThreeWheeler), Some(40.0));
        assert_eq!(record.cumulative(WheelerCategory::TwoWheeler), None);
        assert_eq!(
            RecordField::Cumulative(WheelerCategory::ThreeWheeler).label(),
            "Three Wheeler Sales (Cumulative)"
        );
    }
}
