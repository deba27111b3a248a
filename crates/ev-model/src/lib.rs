//! Data model for the India EV market dataset builder.

pub mod category;
pub mod config;
pub mod error;
pub mod issues;
pub mod national;
pub mod record;
pub mod source;

pub use category::{PerCategory, WheelerCategory, YearlySales};
pub use config::{
    AllocationPolicy, ColumnRenames, PipelineConfig, RegionalRule, STATE_COLUMN,
    STATE_COLUMN_ALIASES, StateCorrections, energy_label, normalize_label,
};
pub use error::{ModelError, Result};
pub use issues::{DataIssue, IssueKind, IssueSeverity, PipelineStage, QualityReport};
pub use national::{EnergyProjections, NationalBreakdown, NationalSales};
pub use record::{RecordField, StateRecord};
pub use source::SourceKind;
