//! CSV output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::info;

/// Writes `frame` as CSV with a header row, rendering nulls as `missing_value`.
pub fn write_csv<W: Write>(writer: W, frame: &mut DataFrame, missing_value: &str) -> Result<()> {
    CsvWriter::new(writer)
        .include_header(true)
        .with_null_value(missing_value.to_string())
        .finish(frame)
        .context("write csv")?;
    Ok(())
}

/// Writes `frame` to `path`, replacing any existing file.
pub fn write_output_file(path: &Path, frame: &mut DataFrame, missing_value: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_csv(&mut writer, frame, missing_value)
        .with_context(|| format!("write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = frame.height(),
        columns = frame.width(),
        "wrote output table"
    );
    Ok(())
}
