//! Table build pipeline with explicit stages.
//!
//! The stages run in order:
//! 1. **Ingest**: read and normalize every source, extract the national tables
//! 2. **Merge**: join the per-state sources on the canonical state name
//! 3. **Impute**: fill missing cumulative category sales
//! 4. **Split**: distribute the national single-year figures
//! 5. **Enrich**: attach the energy requirement projections
//! 6. **Finalize**: round and project onto the output layout
//! 7. **Output**: write the CSV file
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use ev_ingest::{LoadedSources, load_sources, read_energy_projections, read_national_breakdown};
use ev_model::{
    EnergyProjections, NationalBreakdown, PipelineConfig, QualityReport, SourceKind,
    StateRecord,
};
use ev_output::{build_output_frame, write_output_file};
use ev_transform::{
    ImputationOutcome, ImputationSummary, MergeOutcome, SplitOutcome, attach_energy_projections,
    impute_cumulative_sales, merge_sources, split_yearly_sales,
};

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Result of the ingest stage.
#[derive(Debug)]
pub struct IngestResult {
    pub sources: LoadedSources,
    pub national: NationalBreakdown,
    pub energy: EnergyProjections,
}

impl IngestResult {
    /// Row counts of every loaded source, in catalogue order.
    pub fn source_rows(&self) -> Vec<(SourceKind, usize)> {
        self.sources
            .frames
            .iter()
            .map(|(kind, frame)| (*kind, frame.row_count()))
            .collect()
    }
}

/// Loads the source catalogue and extracts the keyed national tables.
pub fn ingest(config: &PipelineConfig) -> Result<IngestResult> {
    let sources = load_sources(config).context("load sources")?;
    let national_frame = sources
        .get(SourceKind::NationalCategorySales)
        .context("national category sales")?;
    let national = read_national_breakdown(&national_frame.frame, &config.published_years)
        .with_context(|| format!("read {}", national_frame.path.display()))?;
    let energy_frame = sources
        .get(SourceKind::EnergyRequirement)
        .context("energy requirement")?;
    let energy = read_energy_projections(&energy_frame.frame)
        .with_context(|| format!("read {}", energy_frame.path.display()))?;
    Ok(IngestResult {
        sources,
        national,
        energy,
    })
}

// ============================================================================
// Stages 2-5: Transform
// ============================================================================

pub fn merge(sources: &LoadedSources, config: &PipelineConfig) -> MergeOutcome {
    merge_sources(&sources.merged(), &config.renames, &config.excluded_states)
}

pub fn impute(
    records: &[StateRecord],
    national: &NationalBreakdown,
    config: &PipelineConfig,
) -> ImputationOutcome {
    impute_cumulative_sales(
        records,
        national,
        &config.allocation,
        config.allocation_trigger,
    )
}

pub fn split(records: &[StateRecord], national: &NationalBreakdown) -> SplitOutcome {
    split_yearly_sales(records, national)
}

pub fn enrich(
    records: &[StateRecord],
    energy: &EnergyProjections,
    config: &PipelineConfig,
) -> Result<Vec<StateRecord>> {
    attach_energy_projections(records, energy, &config.energy_years)
        .context("attach energy projections")
}

// ============================================================================
// Stages 6-7: Finalize and Output
// ============================================================================

pub fn finalize(records: &[StateRecord], config: &PipelineConfig) -> Result<DataFrame> {
    build_output_frame(records, config)
}

/// Writes the final table to the configured output path.
pub fn output(frame: &mut DataFrame, config: &PipelineConfig) -> Result<PathBuf> {
    write_output_file(&config.output_path, frame, &config.missing_value)?;
    Ok(config.output_path.clone())
}

// ============================================================================
// Full run
// ============================================================================

/// Everything a run produced before the output file is written.
#[derive(Debug)]
pub struct PipelineRun {
    pub records: Vec<StateRecord>,
    pub frame: DataFrame,
    pub imputation: ImputationSummary,
    /// Excluded states that were found in the sources.
    pub excluded: Vec<String>,
    pub source_rows: Vec<(SourceKind, usize)>,
    pub report: QualityReport,
}

/// Runs every stage up to and including finalization.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineRun> {
    let mut report = QualityReport::default();

    let ingest_span = info_span!("ingest", input_dir = %config.input_dir.display());
    let start = Instant::now();
    let ingested = ingest_span.in_scope(|| ingest(config))?;
    let source_rows = ingested.source_rows();
    info!(
        sources = source_rows.len(),
        issues = ingested.sources.issues.len(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    report.extend(ingested.sources.issues.iter().cloned());

    let start = Instant::now();
    let merged = info_span!("merge").in_scope(|| merge(&ingested.sources, config));
    info!(
        states = merged.records.len(),
        issues = merged.issues.len(),
        duration_ms = start.elapsed().as_millis(),
        "merge complete"
    );
    report.extend(merged.issues);

    let start = Instant::now();
    let imputed =
        info_span!("impute").in_scope(|| impute(&merged.records, &ingested.national, config));
    info!(
        allocated = imputed.summary.allocations.len(),
        issues = imputed.issues.len(),
        duration_ms = start.elapsed().as_millis(),
        "impute complete"
    );
    report.extend(imputed.issues);

    let start = Instant::now();
    let split_outcome =
        info_span!("split").in_scope(|| split(&imputed.records, &ingested.national));
    info!(
        issues = split_outcome.issues.len(),
        duration_ms = start.elapsed().as_millis(),
        "split complete"
    );
    report.extend(split_outcome.issues);

    let start = Instant::now();
    let records = info_span!("enrich")
        .in_scope(|| enrich(&split_outcome.records, &ingested.energy, config))?;
    info!(
        years = config.energy_years.len(),
        duration_ms = start.elapsed().as_millis(),
        "enrich complete"
    );

    let start = Instant::now();
    let frame = info_span!("finalize").in_scope(|| finalize(&records, config))?;
    info!(
        rows = frame.height(),
        columns = frame.width(),
        duration_ms = start.elapsed().as_millis(),
        "finalize complete"
    );

    Ok(PipelineRun {
        records,
        frame,
        imputation: imputed.summary,
        excluded: merged.excluded,
        source_rows,
        report,
    })
}

/// Serializes `report` as pretty JSON to `path`.
pub fn write_issues_json(path: &Path, report: &QualityReport) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)
        .with_context(|| format!("write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}
