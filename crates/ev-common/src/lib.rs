//! Shared utilities for the EV market crates.
//!
//! Polars `AnyValue` coercion and column access helpers used by ingestion,
//! merging and output rendering.

pub mod polars;

pub use polars::{
    any_to_f64, any_to_string, column_f64_values, column_string_values, find_column,
    format_numeric, is_missing_marker, parse_f64,
};
