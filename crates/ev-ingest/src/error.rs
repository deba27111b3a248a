//! Error types for source ingestion.

use std::path::PathBuf;
use thiserror::Error;

use ev_model::SourceKind;

/// Errors that can occur while loading the source tables.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file not found.
    #[error("source file not found for {kind}: {path}")]
    FileNotFound { kind: SourceKind, path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File uses an encoding the reader cannot handle.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file is empty.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    // === Keyed Table Errors ===
    /// Required column not found in a keyed source.
    #[error("required column '{column}' not found in {kind} source")]
    MissingColumn { kind: SourceKind, column: String },

    /// Category row absent from the national breakdown.
    #[error("national breakdown has no row for category '{label}'")]
    MissingCategory { label: String },

    /// Keyed value that could not be read as a number.
    #[error("invalid {field} value '{value}' in {kind} source")]
    InvalidValue {
        kind: SourceKind,
        field: String,
        value: String,
    },

    /// The pipeline asked for a source that was never loaded.
    #[error("source {kind} was not loaded")]
    SourceNotLoaded { kind: SourceKind },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
