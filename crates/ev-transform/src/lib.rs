//! Table transformations for the EV market pipeline.
//!
//! Each stage takes records by reference and returns new records together
//! with whatever it found worth reporting:
//!
//! 1. [`merge_sources`] joins the per-state sources on the state name.
//! 2. [`impute_cumulative_sales`] fills missing cumulative category sales.
//! 3. [`split_yearly_sales`] distributes the national single-year figures.
//! 4. [`attach_energy_projections`] broadcasts the energy requirement table.

mod enrich;
mod error;
mod impute;
mod merge;
mod split;

pub use enrich::attach_energy_projections;
pub use error::{Result, TransformError};
pub use impute::{
    Allocation, AllocationSource, ImputationOutcome, ImputationSummary, UnallocatedReason,
    impute_cumulative_sales,
};
pub use merge::{MergeOutcome, merge_sources};
pub use split::{SplitOutcome, split_yearly_sales};
