//! Outer join of the per-state sources on the canonical state name.
//!
//! Every state found in any contributing source appears exactly once. Fields
//! a source does not provide stay unset. When several rows resolve to the same
//! state, the first non-missing value of each field wins.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, warn};

use ev_common::{column_f64_values, column_string_values};
use ev_ingest::SourceFrame;
use ev_model::{
    ColumnRenames, DataIssue, IssueKind, PipelineStage, RecordField, STATE_COLUMN, StateRecord,
};

/// Result of the merge stage.
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    /// Merged records ordered by state name.
    pub records: Vec<StateRecord>,
    /// Excluded state names that were present in at least one source.
    pub excluded: Vec<String>,
    pub issues: Vec<DataIssue>,
}

/// Joins `sources` into one record per state, drops `excluded` states and
/// maps source columns onto record fields through `renames`.
pub fn merge_sources(
    sources: &[&SourceFrame],
    renames: &ColumnRenames,
    excluded: &BTreeSet<String>,
) -> MergeOutcome {
    let mut merged: BTreeMap<String, StateRecord> = BTreeMap::new();
    let mut issues = Vec::new();

    for source in sources {
        if !source.state_column.is_present() {
            debug!(source = %source.kind, "skipping source without state column");
            continue;
        }
        merge_source(source, renames, &mut merged, &mut issues);
    }

    let mut excluded_found = Vec::new();
    for state in excluded {
        if merged.remove(state).is_some() {
            debug!(state = %state, "dropped excluded state");
            excluded_found.push(state.clone());
        }
    }

    info!(
        states = merged.len(),
        excluded = excluded_found.len(),
        "merged per-state sources"
    );
    MergeOutcome {
        records: merged.into_values().collect(),
        excluded: excluded_found,
        issues,
    }
}

fn merge_source(
    source: &SourceFrame,
    renames: &ColumnRenames,
    merged: &mut BTreeMap<String, StateRecord>,
    issues: &mut Vec<DataIssue>,
) {
    let df = &source.frame;
    let states = column_string_values(df, STATE_COLUMN).unwrap_or_default();

    let mut columns: Vec<(RecordField, Vec<Option<f64>>)> = Vec::new();
    for name in df.get_column_names_owned() {
        let name = name.as_str();
        if name == STATE_COLUMN {
            continue;
        }
        let Some(field) = renames.field_for(name) else {
            debug!(source = %source.kind, column = %name, "column not carried into the table");
            continue;
        };
        let Some((values, unparseable)) = column_f64_values(df, name) else {
            continue;
        };
        if unparseable > 0 {
            warn!(
                source = %source.kind,
                column = %name,
                unparseable,
                "non-numeric values treated as missing"
            );
            issues.push(
                DataIssue::new(
                    IssueKind::UnparseableNumeric,
                    PipelineStage::Merge,
                    format!(
                        "{unparseable} value(s) in '{name}' of {} treated as missing",
                        source.kind
                    ),
                )
                .with_column(field.label())
                .with_count(unparseable as u64),
            );
        }
        columns.push((field, values));
    }

    let mut unnamed = 0u64;
    for (idx, state) in states.iter().enumerate() {
        if state.is_empty() {
            unnamed += 1;
            continue;
        }
        let record = merged
            .entry(state.clone())
            .or_insert_with(|| StateRecord::new(state.clone()));
        for (field, values) in &columns {
            if let Some(value) = values.get(idx).copied().flatten() {
                record.fill_field(*field, value);
            }
        }
    }

    if unnamed > 0 {
        warn!(source = %source.kind, rows = unnamed, "rows without a state name skipped");
        issues.push(
            DataIssue::new(
                IssueKind::MissingStateName,
                PipelineStage::Merge,
                format!("{unnamed} row(s) of {} have no state name", source.kind),
            )
            .with_count(unnamed),
        );
    }
}
