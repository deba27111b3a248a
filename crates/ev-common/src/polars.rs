//! Polars `AnyValue` coercion helpers.
//!
//! Source tables arrive with inferred schemas: a numeric column that contains
//! a single `NA` is read as text. The helpers here coerce such cells the same
//! way regardless of the inferred dtype, turning anything unparseable into a
//! missing value.

use polars::prelude::{AnyValue, DataFrame};

/// Textual markers treated as "not available".
const MISSING_MARKERS: [&str; 6] = ["NA", "N/A", "NaN", "nan", "-", "--"];

/// Returns true for empty cells and textual not-available markers.
///
/// # Examples
///
/// ```
/// use ev_common::is_missing_marker;
///
/// assert!(is_missing_marker(""));
/// assert!(is_missing_marker(" NA "));
/// assert!(!is_missing_marker("0"));
/// ```
pub fn is_missing_marker(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || MISSING_MARKERS.contains(&trimmed)
}

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null` and formats floats without trailing zeros.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Formats a floating-point number without trailing zeros.
///
/// # Examples
///
/// ```
/// use ev_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(12.50), "12.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Converts an `AnyValue` to a finite `f64`.
///
/// Integers and floats convert directly, strings are parsed with
/// [`parse_f64`]; nulls, non-finite floats and anything else become `None`.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    let number = match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

/// Parses a string as a finite `f64`.
///
/// Missing markers and unparseable text yield `None`.
pub fn parse_f64(value: &str) -> Option<f64> {
    if is_missing_marker(value) {
        return None;
    }
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Finds the actual column name whose normalized label equals `label`.
pub fn find_column(
    df: &DataFrame,
    label: &str,
    normalize: impl Fn(&str) -> String,
) -> Option<String> {
    let wanted = normalize(label);
    df.get_column_names()
        .into_iter()
        .find(|name| normalize(name.as_str()) == wanted)
        .map(|name| name.to_string())
}

/// Extracts a column as trimmed strings (empty for nulls).
pub fn column_string_values(df: &DataFrame, name: &str) -> Option<Vec<String>> {
    let column = df.column(name).ok()?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
        values.push(value.trim().to_string());
    }
    Some(values)
}

/// Extracts a column as numbers, together with how many non-empty cells failed to parse.
pub fn column_f64_values(df: &DataFrame, name: &str) -> Option<(Vec<Option<f64>>, usize)> {
    let column = df.column(name).ok()?;
    let mut values = Vec::with_capacity(df.height());
    let mut unparseable = 0usize;
    for idx in 0..df.height() {
        let raw = column.get(idx).unwrap_or(AnyValue::Null);
        let parsed = any_to_f64(raw.clone());
        if parsed.is_none() && !is_missing_marker(&any_to_string(raw)) {
            unparseable += 1;
        }
        values.push(parsed);
    }
    Some((values, unparseable))
}
