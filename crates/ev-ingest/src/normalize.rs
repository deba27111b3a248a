//! State identifier normalization.
//!
//! Every source that identifies states gets its identifier column renamed to
//! [`STATE_COLUMN`] and each value rewritten through the correction table.
//! Rows are never dropped here.

use polars::prelude::{DataFrame, NamedFrom, Series};

use ev_common::{column_string_values, find_column};
use ev_model::{STATE_COLUMN, STATE_COLUMN_ALIASES, StateCorrections, normalize_label};

use crate::error::Result;

/// How the state identifier column was found in a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateColumn {
    /// Already named [`STATE_COLUMN`].
    Canonical,
    /// Renamed from an alias such as `State Name`.
    Renamed { from: String },
    /// No identifier column; nothing was renamed or corrected.
    Missing,
}

impl StateColumn {
    pub fn is_present(&self) -> bool {
        !matches!(self, StateColumn::Missing)
    }
}

/// Locates the identifier column among the canonical name and its aliases.
fn locate_state_column(df: &DataFrame) -> Option<String> {
    std::iter::once(STATE_COLUMN)
        .chain(STATE_COLUMN_ALIASES)
        .find_map(|label| find_column(df, label, normalize_label))
}

/// Renames the identifier column and rewrites its values to canonical names.
pub fn normalize_state_column(
    df: &mut DataFrame,
    corrections: &StateCorrections,
) -> Result<StateColumn> {
    let Some(actual) = locate_state_column(df) else {
        return Ok(StateColumn::Missing);
    };
    let outcome = if actual == STATE_COLUMN {
        StateColumn::Canonical
    } else {
        df.rename(&actual, STATE_COLUMN.into())?;
        StateColumn::Renamed { from: actual }
    };

    let values = column_string_values(df, STATE_COLUMN).unwrap_or_default();
    let mut corrected_count = 0usize;
    let corrected: Vec<String> = values
        .iter()
        .map(|raw| {
            let canonical = corrections.canonical(raw);
            if canonical != *raw {
                corrected_count += 1;
            }
            canonical
        })
        .collect();
    df.with_column(Series::new(STATE_COLUMN.into(), corrected))?;

    if corrected_count > 0 {
        tracing::debug!(corrected = corrected_count, "corrected state names");
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use polars::prelude::{Column, IntoColumn};

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

    #[test]
    fn renames_alias_and_corrects_values() {
        let mut df = test_df(vec![
            ("State Name", vec!["Pondicherry", "Goa", "Maharastra"]),
            ("Total EV", vec!["1", "2", "3"]),
        ]);
        let outcome = normalize_state_column(&mut df, &StateCorrections::default()).unwrap();

        assert_eq!(
            outcome,
            StateColumn::Renamed {
                from: "State Name".to_string()
            }
        );
        assert_eq!(
            column_string_values(&df, STATE_COLUMN).unwrap(),
            vec!["Puducherry", "Goa", "Maharashtra"]
        );
        assert!(df.column("State Name").is_err());
        assert_eq!(df.height(), 3);
    }

    #[test]
    fn canonical_column_keeps_name() {
        let mut df = test_df(vec![("State/UT", vec!["Andaman and Nicobar Island"])]);
        let outcome = normalize_state_column(&mut df, &StateCorrections::default()).unwrap();

        assert_eq!(outcome, StateColumn::Canonical);
        assert_eq!(
            column_string_values(&df, STATE_COLUMN).unwrap(),
            vec!["Andaman and Nicobar Islands"]
        );
    }

    #[test]
    fn missing_identifier_is_tolerated() {
        let mut df = test_df(vec![("Years", vec!["2024-25"])]);
        let outcome = normalize_state_column(&mut df, &StateCorrections::default()).unwrap();

        assert_eq!(outcome, StateColumn::Missing);
        assert!(!outcome.is_present());
        assert_eq!(df.get_column_names().len(), 1);
    }

    #[test]
    fn normalizing_twice_changes_nothing() {
        let corrections = StateCorrections::default();
        let mut df = test_df(vec![("State Name", vec!["Pondicherry", "Puducherry"])]);
        normalize_state_column(&mut df, &corrections).unwrap();
        let once = column_string_values(&df, STATE_COLUMN).unwrap();
        normalize_state_column(&mut df, &corrections).unwrap();
        let twice = column_string_values(&df, STATE_COLUMN).unwrap();

        assert_eq!(once, twice);
    }
}
