//! Finalization and output of the EV market table.
//!
//! Records are projected onto the fixed column layout, numeric values are
//! rounded half-to-even to whole numbers, and the table is written as CSV with
//! a uniform missing-value marker.

mod columns;
mod finalize;
mod writer;

pub use columns::{OutputColumn, output_columns, output_labels};
pub use finalize::{build_output_frame, preview_frame, round_half_even};
pub use writer::{write_csv, write_output_file};
