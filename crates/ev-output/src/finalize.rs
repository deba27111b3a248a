//! Conversion of the final records into the published DataFrame.

use anyhow::{Context, Result};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::debug;

use ev_model::{PipelineConfig, StateRecord};

use crate::columns::{OutputColumn, output_columns};

/// Rounds to zero decimal places, ties to even. Non-finite input is missing.
pub fn round_half_even(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    Some(value.round_ties_even() as i64)
}

/// Builds the output table: a string state column followed by rounded integer
/// columns, in publication order.
pub fn build_output_frame(records: &[StateRecord], config: &PipelineConfig) -> Result<DataFrame> {
    let columns: Vec<Column> = output_columns(config)
        .into_iter()
        .map(|column| {
            let label = column.label(config);
            match column {
                OutputColumn::State => {
                    let states: Vec<&str> = records.iter().map(|r| r.state.as_str()).collect();
                    Series::new(label.into(), states).into_column()
                }
                _ => {
                    let values: Vec<Option<i64>> = records
                        .iter()
                        .map(|record| column.value(record).and_then(round_half_even))
                        .collect();
                    Series::new(label.into(), values).into_column()
                }
            }
        })
        .collect();

    let frame = DataFrame::new(columns).context("build output frame")?;
    debug!(rows = frame.height(), columns = frame.width(), "built output frame");
    Ok(frame)
}

/// First `rows` rows of the output table.
pub fn preview_frame(frame: &DataFrame, rows: usize) -> DataFrame {
    frame.head(Some(rows))
}
