//! CSV reading.

mod reader;

pub use reader::{read_csv_frame, validate_encoding};
