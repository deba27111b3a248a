//! Final column layout of the published table.

use ev_model::{
    PipelineConfig, RecordField, STATE_COLUMN, StateRecord, WheelerCategory, energy_label,
};

/// One column of the output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputColumn {
    State,
    Field(RecordField),
    /// Single-year sales of a category; the index selects the published year.
    Yearly(WheelerCategory, usize),
    /// Energy projection; the index selects the fiscal-year label.
    Energy(usize),
}

impl OutputColumn {
    pub fn label(self, config: &PipelineConfig) -> String {
        match self {
            OutputColumn::State => STATE_COLUMN.to_string(),
            OutputColumn::Field(field) => field.label(),
            OutputColumn::Yearly(category, idx) => config
                .published_years
                .get(idx)
                .map_or_else(String::new, |year| category.yearly_label(year)),
            OutputColumn::Energy(idx) => config
                .energy_years
                .get(idx)
                .map_or_else(String::new, |year| energy_label(year)),
        }
    }

    /// Numeric value of the column for `record`. Always `None` for the state column.
    pub fn value(self, record: &StateRecord) -> Option<f64> {
        match self {
            OutputColumn::State => None,
            OutputColumn::Field(field) => record.field(field),
            OutputColumn::Yearly(category, idx) => record
                .yearly_sales
                .get(category)
                .values()
                .get(idx)
                .copied()
                .flatten(),
            OutputColumn::Energy(idx) => record.energy_requirement_gwh.get(idx).copied().flatten(),
        }
    }
}

/// Columns in publication order.
pub fn output_columns(config: &PipelineConfig) -> Vec<OutputColumn> {
    let mut columns = vec![
        OutputColumn::State,
        OutputColumn::Field(RecordField::TotalEvsSold),
        OutputColumn::Field(RecordField::EvPenetration),
    ];
    columns.extend(
        WheelerCategory::ALL
            .into_iter()
            .map(|category| OutputColumn::Field(RecordField::Cumulative(category))),
    );
    for category in WheelerCategory::ALL {
        columns.extend(
            (0..config.published_years.len()).map(|idx| OutputColumn::Yearly(category, idx)),
        );
    }
    columns.extend([
        OutputColumn::Field(RecordField::PcsFeb2024),
        OutputColumn::Field(RecordField::PcsMar2024),
        OutputColumn::Field(RecordField::HighwayChargers),
        OutputColumn::Field(RecordField::RetailOutletsWithCharging),
    ]);
    columns.extend((0..config.energy_years.len()).map(OutputColumn::Energy));
    columns
}

/// Output column labels in publication order.
pub fn output_labels(config: &PipelineConfig) -> Vec<String> {
    output_columns(config)
        .into_iter()
        .map(|column| column.label(config))
        .collect()
}
