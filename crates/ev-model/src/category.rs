//! Wheeler categories and per-category value containers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Vehicle segment used for the cumulative and single-year sales columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelerCategory {
    TwoWheeler,
    ThreeWheeler,
    FourWheeler,
}

impl WheelerCategory {
    pub const ALL: [WheelerCategory; 3] = [
        WheelerCategory::TwoWheeler,
        WheelerCategory::ThreeWheeler,
        WheelerCategory::FourWheeler,
    ];

    /// Prefix used by the output column labels ("Two Wheeler Sales 2022").
    pub fn label(self) -> &'static str {
        match self {
            WheelerCategory::TwoWheeler => "Two Wheeler",
            WheelerCategory::ThreeWheeler => "Three Wheeler",
            WheelerCategory::FourWheeler => "Four Wheeler",
        }
    }

    /// Row label of this category in the national breakdown source.
    pub fn breakdown_label(self) -> &'static str {
        match self {
            WheelerCategory::TwoWheeler => "2 Wheelers",
            WheelerCategory::ThreeWheeler => "3 Wheelers",
            WheelerCategory::FourWheeler => "Passenger Vehicles",
        }
    }

    pub fn from_breakdown_label(label: &str) -> Result<Self> {
        let trimmed = label.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.breakdown_label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownCategory(trimmed.to_string()))
    }

    pub fn cumulative_label(self) -> String {
        format!("{} Sales (Cumulative)", self.label())
    }

    pub fn yearly_label(self, year: &str) -> String {
        format!("{} Sales {}", self.label(), year)
    }
}

impl fmt::Display for WheelerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One value per wheeler category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerCategory<T> {
    pub two_wheeler: T,
    pub three_wheeler: T,
    pub four_wheeler: T,
}

impl<T> PerCategory<T> {
    pub fn from_fn(mut f: impl FnMut(WheelerCategory) -> T) -> Self {
        Self {
            two_wheeler: f(WheelerCategory::TwoWheeler),
            three_wheeler: f(WheelerCategory::ThreeWheeler),
            four_wheeler: f(WheelerCategory::FourWheeler),
        }
    }

    pub fn get(&self, category: WheelerCategory) -> &T {
        match category {
            WheelerCategory::TwoWheeler => &self.two_wheeler,
            WheelerCategory::ThreeWheeler => &self.three_wheeler,
            WheelerCategory::FourWheeler => &self.four_wheeler,
        }
    }

    pub fn get_mut(&mut self, category: WheelerCategory) -> &mut T {
        match category {
            WheelerCategory::TwoWheeler => &mut self.two_wheeler,
            WheelerCategory::ThreeWheeler => &mut self.three_wheeler,
            WheelerCategory::FourWheeler => &mut self.four_wheeler,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(WheelerCategory, &T) -> U) -> PerCategory<U> {
        PerCategory::from_fn(|category| f(category, self.get(category)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (WheelerCategory, &T)> {
        WheelerCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }
}

/// Single-year sales for the two published years.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct YearlySales {
    pub first: Option<f64>,
    pub second: Option<f64>,
}

impl YearlySales {
    pub fn values(&self) -> [Option<f64>; 2] {
        [self.first, self.second]
    }
}
