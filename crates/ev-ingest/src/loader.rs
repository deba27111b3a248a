//! Loading the source catalogue.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::{debug, info, warn};

use ev_model::{
    DataIssue, IssueKind, PipelineConfig, PipelineStage, STATE_COLUMN, SourceKind,
    StateCorrections,
};

use crate::csv::read_csv_frame;
use crate::error::{IngestError, Result};
use crate::normalize::{StateColumn, normalize_state_column};

/// One loaded and normalized source table.
#[derive(Debug, Clone)]
pub struct SourceFrame {
    pub kind: SourceKind,
    pub path: PathBuf,
    pub frame: DataFrame,
    pub state_column: StateColumn,
}

impl SourceFrame {
    pub fn row_count(&self) -> usize {
        self.frame.height()
    }
}

/// Every source of the catalogue, normalized, plus the issues found while loading.
#[derive(Debug, Clone, Default)]
pub struct LoadedSources {
    pub frames: BTreeMap<SourceKind, SourceFrame>,
    pub issues: Vec<DataIssue>,
}

impl LoadedSources {
    pub fn get(&self, kind: SourceKind) -> Result<&SourceFrame> {
        self.frames
            .get(&kind)
            .ok_or(IngestError::SourceNotLoaded { kind })
    }

    /// Sources taking part in the outer join, in catalogue order.
    pub fn merged(&self) -> Vec<&SourceFrame> {
        SourceKind::ALL
            .into_iter()
            .filter(|kind| kind.is_merged())
            .filter_map(|kind| self.frames.get(&kind))
            .collect()
    }
}

/// Reads one source file and normalizes its state identifier column.
pub fn load_source(
    kind: SourceKind,
    path: &Path,
    corrections: &StateCorrections,
) -> Result<SourceFrame> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            kind,
            path: path.to_path_buf(),
        });
    }
    let mut frame = read_csv_frame(path)?;
    let state_column = normalize_state_column(&mut frame, corrections)?;
    if let StateColumn::Renamed { from } = &state_column {
        debug!(source = %kind, from = %from, to = STATE_COLUMN, "renamed state column");
    }
    Ok(SourceFrame {
        kind,
        path: path.to_path_buf(),
        frame,
        state_column,
    })
}

/// Loads all eight sources named by the configuration.
///
/// A missing or unreadable file is fatal. A per-state source without an
/// identifier column is kept but reported, and contributes nothing to the join.
pub fn load_sources(config: &PipelineConfig) -> Result<LoadedSources> {
    let mut loaded = LoadedSources::default();
    for kind in SourceKind::ALL {
        let path = config.source_path(kind);
        let source = load_source(kind, &path, &config.corrections)?;
        if kind.is_per_state() && !source.state_column.is_present() {
            warn!(
                source = %kind,
                path = %path.display(),
                "source has no state identifier column"
            );
            loaded.issues.push(
                DataIssue::new(
                    IssueKind::SchemaMissing,
                    PipelineStage::Load,
                    format!("no '{STATE_COLUMN}' or alias column; source skipped in merge"),
                )
                .with_column(kind.to_string()),
            );
        }
        info!(
            source = %kind,
            rows = source.row_count(),
            columns = source.frame.width(),
            "loaded source"
        );
        loaded.frames.insert(kind, source);
    }
    Ok(loaded)
}
