//! Source ingestion for the EV market pipeline.
//!
//! This crate reads the fixed catalogue of CSV sources into Polars
//! DataFrames, normalizes the state identifier column, and extracts the keyed
//! national tables.
//!
//! # Example
//!
//! ```ignore
//! use ev_ingest::{load_sources, read_national_breakdown};
//! use ev_model::{PipelineConfig, SourceKind};
//!
//! let config = PipelineConfig::default().with_input_dir("data");
//! let sources = load_sources(&config)?;
//! let national = sources.get(SourceKind::NationalCategorySales)?;
//! let breakdown = read_national_breakdown(&national.frame, &config.published_years)?;
//! ```

mod csv;
mod error;
mod loader;
mod national;
mod normalize;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{read_csv_frame, validate_encoding};

// === Loading ===
pub use loader::{LoadedSources, SourceFrame, load_source, load_sources};

// === Normalization ===
pub use normalize::{StateColumn, normalize_state_column};

// === Keyed National Tables ===
pub use national::{read_energy_projections, read_national_breakdown};
