//! Keyed national tables: category × year sales and energy projections.

use polars::prelude::DataFrame;

use ev_common::{any_to_string, column_f64_values, column_string_values, find_column};
use ev_model::config::{CATEGORY_COLUMN, ENERGY_VALUE_COLUMN, ENERGY_YEAR_COLUMN};
use ev_model::{
    EnergyProjections, NationalBreakdown, NationalSales, PerCategory, SourceKind,
    WheelerCategory, normalize_label,
};

use crate::error::{IngestError, Result};

fn required_column(df: &DataFrame, kind: SourceKind, label: &str) -> Result<String> {
    find_column(df, label, normalize_label).ok_or_else(|| IngestError::MissingColumn {
        kind,
        column: label.to_string(),
    })
}

/// Reads the national breakdown: rows keyed by category label, one column per year.
///
/// A missing category row or year column is fatal, as is a published figure
/// that cannot be read as a number.
pub fn read_national_breakdown(df: &DataFrame, years: &[String; 2]) -> Result<NationalBreakdown> {
    let kind = SourceKind::NationalCategorySales;
    let category_column = required_column(df, kind, CATEGORY_COLUMN)?;
    let labels = column_string_values(df, &category_column).unwrap_or_default();

    let mut year_values = Vec::with_capacity(years.len());
    for year in years {
        let column = required_column(df, kind, year)?;
        let (values, _) = column_f64_values(df, &column).unwrap_or_default();
        year_values.push((year.as_str(), column, values));
    }

    let mut sales = PerCategory::<NationalSales>::default();
    for category in WheelerCategory::ALL {
        let label = category.breakdown_label();
        let row = labels
            .iter()
            .position(|value| {
                WheelerCategory::from_breakdown_label(value).ok() == Some(category)
            })
            .ok_or_else(|| IngestError::MissingCategory {
                label: label.to_string(),
            })?;
        let mut figures = [0.0f64; 2];
        for (slot, (year, column, values)) in figures.iter_mut().zip(&year_values) {
            *slot = values.get(row).copied().flatten().ok_or_else(|| {
                let raw = df
                    .column(column)
                    .ok()
                    .and_then(|series| series.get(row).ok())
                    .map(any_to_string)
                    .unwrap_or_default();
                IngestError::InvalidValue {
                    kind,
                    field: format!("{label} {year}"),
                    value: raw,
                }
            })?;
        }
        *sales.get_mut(category) = NationalSales::new(figures[0], figures[1]);
    }

    Ok(NationalBreakdown::new(sales))
}

/// Reads the energy requirement table (`Years` → `Energy Requirement`).
///
/// Unparseable values are kept as missing; whether every expected year is
/// present is checked when the projections are attached to the records.
pub fn read_energy_projections(df: &DataFrame) -> Result<EnergyProjections> {
    let kind = SourceKind::EnergyRequirement;
    let year_column = required_column(df, kind, ENERGY_YEAR_COLUMN)?;
    let value_column = required_column(df, kind, ENERGY_VALUE_COLUMN)?;
    let years = column_string_values(df, &year_column).unwrap_or_default();
    let (values, unparseable) = column_f64_values(df, &value_column).unwrap_or_default();
    if unparseable > 0 {
        tracing::warn!(
            unparseable,
            column = %value_column,
            "energy requirement values could not be parsed"
        );
    }
    Ok(EnergyProjections::new(
        years
            .iter()
            .zip(values)
            .filter(|(year, _)| !year.is_empty()),
    ))
}

#[cfg(test)]
mod tests {
    use polars::prelude::{Column, IntoColumn, NamedFrom, Series};

    use super::*;

    fn test_df(columns: Vec<(&str, Vec<&str>)>) -> DataFrame {
        let cols: Vec<Column> = columns
            .into_iter()
            .map(|(name, values)| {
                Series::new(
                    name.into(),
                    values.iter().copied().map(String::from).collect::<Vec<_>>(),
                )
                .into_column()
            })
            .collect();
        DataFrame::new(cols).unwrap()
    }

    fn years() -> [String; 2] {
        ["2022".to_string(), "2023".to_string()]
    }

    fn breakdown_df() -> DataFrame {
        test_df(vec![
            (
                "Category",
                vec!["2 Wheelers", "3 Wheelers", "Passenger Vehicles", "Buses"],
            ),
            ("2022", vec!["631464", "352710", "38240", "1200"]),
            ("2023", vec!["859376", "582793", "82105", "1900"]),
        ])
    }

    #[test]
    fn reads_category_year_figures() {
        let breakdown = read_national_breakdown(&breakdown_df(), &years()).unwrap();

        assert_eq!(
            breakdown.category(WheelerCategory::TwoWheeler),
            NationalSales::new(631_464.0, 859_376.0)
        );
        assert_eq!(breakdown.totals().four_wheeler, 120_345.0);
    }

    #[test]
    fn category_labels_ignore_padding_and_case() {
        let df = test_df(vec![
            (
                "Category",
                vec![" passenger vehicles", "2 WHEELERS ", "3 Wheelers"],
            ),
            ("2022", vec!["38240", "631464", "352710"]),
            ("2023", vec!["82105", "859376", "582793"]),
        ]);
        let breakdown = read_national_breakdown(&df, &years()).unwrap();

        assert_eq!(
            breakdown.category(WheelerCategory::FourWheeler),
            NationalSales::new(38_240.0, 82_105.0)
        );
        assert_eq!(
            breakdown.category(WheelerCategory::TwoWheeler),
            NationalSales::new(631_464.0, 859_376.0)
        );
    }

    #[test]
    fn missing_category_row_is_fatal() {
        let df = test_df(vec![
            ("Category", vec!["2 Wheelers", "3 Wheelers"]),
            ("2022", vec!["1", "2"]),
            ("2023", vec!["3", "4"]),
        ]);
        let err = read_national_breakdown(&df, &years()).unwrap_err();

        assert!(matches!(err, IngestError::MissingCategory { ref label } if label == "Passenger Vehicles"));
    }

    #[test]
    fn missing_year_column_is_fatal() {
        let df = test_df(vec![
            ("Category", vec!["2 Wheelers"]),
            ("2022", vec!["1"]),
        ]);
        let err = read_national_breakdown(&df, &years()).unwrap_err();

        assert!(matches!(err, IngestError::MissingColumn { ref column, .. } if column == "2023"));
    }

    #[test]
    fn unparseable_published_figure_names_the_cell() {
        let df = test_df(vec![
            ("Category", vec!["2 Wheelers", "3 Wheelers", "Passenger Vehicles"]),
            ("2022", vec!["631464", "NA", "38240"]),
            ("2023", vec!["859376", "582793", "82105"]),
        ]);
        let err = read_national_breakdown(&df, &years()).unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid 3 Wheelers 2022 value 'NA' in national-category-sales source"
        );
    }

    #[test]
    fn reads_energy_projections() {
        let df = test_df(vec![
            ("Years", vec!["2024-25", "2025-26", ""]),
            ("Energy Requirement", vec!["1200", "n/a", "7"]),
        ]);
        let projections = read_energy_projections(&df).unwrap();

        assert_eq!(projections.len(), 2);
        assert_eq!(projections.get("2024-25"), Some(Some(1200.0)));
        assert_eq!(projections.get("2025-26"), Some(None));
    }
}
