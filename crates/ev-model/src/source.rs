//! Catalogue of the tabular sources the pipeline reads.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the eight fixed input tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    VehicleCategorySales,
    RetailOutletCharging,
    PcsFeb2024,
    NationalCategorySales,
    HighwayChargers,
    PcsMar2024,
    EnergyRequirement,
    TotalEvSales,
}

impl SourceKind {
    /// Sources in load order.
    pub const ALL: [SourceKind; 8] = [
        SourceKind::VehicleCategorySales,
        SourceKind::RetailOutletCharging,
        SourceKind::PcsFeb2024,
        SourceKind::NationalCategorySales,
        SourceKind::HighwayChargers,
        SourceKind::PcsMar2024,
        SourceKind::EnergyRequirement,
        SourceKind::TotalEvSales,
    ];

    pub fn default_file_name(self) -> &'static str {
        match self {
            SourceKind::VehicleCategorySales => "RS_Session_256_AU_95_C.csv",
            SourceKind::RetailOutletCharging => "RS_Session_256_AU_2673_3.csv",
            SourceKind::PcsFeb2024 => "RS_Session_259_AU_2837_A.csv",
            SourceKind::NationalCategorySales => "RS_Session_263_AU_102_A.csv",
            SourceKind::HighwayChargers => "RS_Session_265_AU_277_A_to _B_ii.csv",
            SourceKind::PcsMar2024 => "RS_Session_265_AU_2151_E.csv",
            SourceKind::EnergyRequirement => "RS_Session_266_AS_217_4.csv",
            SourceKind::TotalEvSales => "RS_Session_266_AU_2164_A.csv",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SourceKind::VehicleCategorySales => "EV sales by state and vehicle type (cumulative)",
            SourceKind::RetailOutletCharging => "Retail outlets with EV charging (snapshot)",
            SourceKind::PcsFeb2024 => "Public charging stations as of Feb 2024",
            SourceKind::NationalCategorySales => "National EV sales by category (2022, 2023)",
            SourceKind::HighwayChargers => "Highway chargers (snapshot)",
            SourceKind::PcsMar2024 => "Public charging stations as of March 2024",
            SourceKind::EnergyRequirement => "Energy requirement projections (2024-2030)",
            SourceKind::TotalEvSales => "Total EV sales and penetration (cumulative)",
        }
    }

    /// True for tables keyed by state/UT.
    pub fn is_per_state(self) -> bool {
        !matches!(
            self,
            SourceKind::NationalCategorySales | SourceKind::EnergyRequirement
        )
    }

    /// True for tables that take part in the outer join.
    pub fn is_merged(self) -> bool {
        self.is_per_state()
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::VehicleCategorySales => "vehicle-category-sales",
            SourceKind::RetailOutletCharging => "retail-outlet-charging",
            SourceKind::PcsFeb2024 => "pcs-feb-2024",
            SourceKind::NationalCategorySales => "national-category-sales",
            SourceKind::HighwayChargers => "highway-chargers",
            SourceKind::PcsMar2024 => "pcs-mar-2024",
            SourceKind::EnergyRequirement => "energy-requirement",
            SourceKind::TotalEvSales => "total-ev-sales",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_sources_take_part_in_the_join() {
        let merged: Vec<SourceKind> = SourceKind::ALL
            .into_iter()
            .filter(|kind| kind.is_merged())
            .collect();
        assert_eq!(merged.len(), 6);
        assert!(!merged.contains(&SourceKind::NationalCategorySales));
        assert!(!merged.contains(&SourceKind::EnergyRequirement));
    }
}
