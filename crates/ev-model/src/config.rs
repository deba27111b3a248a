//! Fixed configuration data for the EV market pipeline.
//!
//! The correction, rename, exclusion and regional allocation tables are plain
//! values owned by [`PipelineConfig`] and handed to each stage, so every stage
//! can be exercised with alternative tables in tests.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::category::{PerCategory, WheelerCategory};
use crate::error::{ModelError, Result};
use crate::record::RecordField;
use crate::source::SourceKind;

/// Canonical name of the state/UT identifier column.
pub const STATE_COLUMN: &str = "State/UT";
/// Column names that also identify the state/UT in some sources.
pub const STATE_COLUMN_ALIASES: [&str; 1] = ["State Name"];
/// City-level entry that never belongs in the state table.
pub const EXCLUDED_STATE: &str = "Leh";
/// Row-label column of the national breakdown source.
pub const CATEGORY_COLUMN: &str = "Category";
/// Key column of the energy requirement source.
pub const ENERGY_YEAR_COLUMN: &str = "Years";
/// Value column of the energy requirement source.
pub const ENERGY_VALUE_COLUMN: &str = "Energy Requirement";
pub const PUBLISHED_YEARS: [&str; 2] = ["2022", "2023"];
pub const ENERGY_YEARS: [&str; 6] = [
    "2024-25", "2025-26", "2026-27", "2027-28", "2028-29", "2029-30",
];
pub const DEFAULT_OUTPUT_FILE: &str = "india_ev_market_all_years_numeric_imputed_rounded.csv";
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Normalizes a column label: strips a BOM, trims, and collapses inner whitespace.
pub fn normalize_label(raw: &str) -> String {
    raw.trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Output label of an energy requirement column.
pub fn energy_label(year: &str) -> String {
    format!("Energy Requirement {year} (GWh)")
}

/// Variant spelling → canonical state/UT name.
///
/// Chains are resolved on construction, so applying the table twice gives the
/// same result as applying it once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCorrections {
    map: BTreeMap<String, String>,
}

impl StateCorrections {
    pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let raw: BTreeMap<String, String> = entries
            .into_iter()
            .map(|(from, to)| (from.into().trim().to_string(), to.into().trim().to_string()))
            .collect();
        let mut map = BTreeMap::new();
        for (from, to) in &raw {
            let mut target = to.clone();
            let mut hops = 0usize;
            while let Some(next) = raw.get(&target) {
                if *next == target {
                    break;
                }
                target = next.clone();
                hops += 1;
                if hops > raw.len() {
                    return Err(ModelError::CyclicCorrection {
                        state: from.clone(),
                    });
                }
            }
            map.insert(from.clone(), target);
        }
        Ok(Self { map })
    }

    /// Canonical spelling of `raw`; unknown names pass through trimmed.
    pub fn canonical(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        self.map
            .get(trimmed)
            .cloned()
            .unwrap_or_else(|| trimmed.to_string())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(from, to)| (from.as_str(), to.as_str()))
    }
}

impl Default for StateCorrections {
    fn default() -> Self {
        let map = [
            ("Andaman and Nicobar Island", "Andaman and Nicobar Islands"),
            ("Pondicherry", "Puducherry"),
            ("Maharastra", "Maharashtra"),
            ("Andaman and Nicobar", "Andaman and Nicobar Islands"),
        ]
        .into_iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect();
        Self { map }
    }
}

/// Source column label → record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRenames {
    map: BTreeMap<String, RecordField>,
}

impl ColumnRenames {
    pub fn new<K: AsRef<str>>(entries: impl IntoIterator<Item = (K, RecordField)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(label, field)| (normalize_label(label.as_ref()), field))
            .collect();
        Self { map }
    }

    pub fn field_for(&self, source_label: &str) -> Option<RecordField> {
        self.map.get(&normalize_label(source_label)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, RecordField)> {
        self.map.iter().map(|(label, field)| (label.as_str(), *field))
    }
}

impl Default for ColumnRenames {
    fn default() -> Self {
        Self::new([
            ("Total EV", RecordField::TotalEvsSold),
            (
                "% of Share of EV in Total Vehicles Sold",
                RecordField::EvPenetration,
            ),
            (
                "Two Wheeler",
                RecordField::Cumulative(WheelerCategory::TwoWheeler),
            ),
            (
                "Three Wheeler",
                RecordField::Cumulative(WheelerCategory::ThreeWheeler),
            ),
            (
                "Four Wheeler",
                RecordField::Cumulative(WheelerCategory::FourWheeler),
            ),
            ("No. of PCS as on 31st March 2024", RecordField::PcsMar2024),
            ("Number of Charges on Highway", RecordField::HighwayChargers),
            (
                "No of RO's where EV Charging Facility available",
                RecordField::RetailOutletsWithCharging,
            ),
            ("No. of Operational PCS", RecordField::PcsFeb2024),
        ])
    }
}

/// Fixed category split applied to members of a region instead of the
/// proportional allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalRule {
    pub name: String,
    pub members: BTreeSet<String>,
    /// Share of a state's total EVs sold assigned to each category.
    pub ratios: PerCategory<f64>,
}

impl RegionalRule {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        members: impl IntoIterator<Item = S>,
        ratios: PerCategory<f64>,
    ) -> Result<Self> {
        let name = name.into();
        for (category, ratio) in ratios.iter() {
            if !ratio.is_finite() || *ratio < 0.0 {
                return Err(ModelError::InvalidRatio {
                    region: name,
                    category: category.to_string(),
                    ratio: *ratio,
                });
            }
        }
        Ok(Self {
            name,
            members: members.into_iter().map(Into::into).collect(),
            ratios,
        })
    }

    pub fn contains(&self, state: &str) -> bool {
        self.members.contains(state)
    }

    pub fn south_india() -> Self {
        Self {
            name: "South India".to_string(),
            members: [
                "Andhra Pradesh",
                "Telangana",
                "Tamil Nadu",
                "Karnataka",
                "Kerala",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            ratios: PerCategory {
                two_wheeler: 0.80,
                three_wheeler: 0.15,
                four_wheeler: 0.05,
            },
        }
    }
}

/// Ordered regional rules; the first rule containing a state wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPolicy {
    pub rules: Vec<RegionalRule>,
}

impl AllocationPolicy {
    /// Policy without regional overrides: every missing state gets a proportional share.
    pub fn proportional_only() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rule_for(&self, state: &str) -> Option<&RegionalRule> {
        self.rules.iter().find(|rule| rule.contains(state))
    }
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            rules: vec![RegionalRule::south_india()],
        }
    }
}

/// Everything the pipeline needs to know besides the source data itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory holding the source files.
    pub input_dir: PathBuf,
    /// Destination of the final table. Overwritten on every run.
    pub output_path: PathBuf,
    /// File name overrides per source; unset kinds use their default file name.
    pub source_files: BTreeMap<SourceKind, String>,
    pub corrections: StateCorrections,
    pub renames: ColumnRenames,
    pub excluded_states: BTreeSet<String>,
    pub allocation: AllocationPolicy,
    /// Category whose missing value puts a row into the allocation base.
    pub allocation_trigger: WheelerCategory,
    pub published_years: [String; 2],
    pub energy_years: Vec<String>,
    /// Marker written for missing cells.
    pub missing_value: String,
    pub preview_rows: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            source_files: BTreeMap::new(),
            corrections: StateCorrections::default(),
            renames: ColumnRenames::default(),
            excluded_states: BTreeSet::from([EXCLUDED_STATE.to_string()]),
            allocation: AllocationPolicy::default(),
            allocation_trigger: WheelerCategory::TwoWheeler,
            published_years: PUBLISHED_YEARS.map(String::from),
            energy_years: ENERGY_YEARS.iter().map(|year| (*year).to_string()).collect(),
            missing_value: String::new(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    #[must_use]
    pub fn with_source_file(mut self, kind: SourceKind, file_name: impl Into<String>) -> Self {
        self.source_files.insert(kind, file_name.into());
        self
    }

    #[must_use]
    pub fn with_allocation(mut self, policy: AllocationPolicy) -> Self {
        self.allocation = policy;
        self
    }

    #[must_use]
    pub fn with_missing_value(mut self, marker: impl Into<String>) -> Self {
        self.missing_value = marker.into();
        self
    }

    #[must_use]
    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    pub fn source_file_name(&self, kind: SourceKind) -> &str {
        self.source_files
            .get(&kind)
            .map_or(kind.default_file_name(), String::as_str)
    }

    pub fn source_path(&self, kind: SourceKind) -> PathBuf {
        self.input_dir.join(self.source_file_name(kind))
    }
}
