//! Value converter: cell text ↔ schema-declared storage.
//!
//! [`render_cell`] is the display direction used when writing CSV.
//! [`parse_cell`] is the strict direction used when rebuilding Parquet; it
//! never coerces silently, and every failure names the column, the 1-based
//! row, and the raw text.

use tabedit_result::{Error, Result};

use crate::cell::{CellValue, parse_bool_literal};
use crate::schema::{ColumnDescriptor, Semantic, StorageType, TimeUnit};
use crate::temporal;

/// Render a decoded cell for display in CSV.
///
/// Date and timestamp columns render their calendar form; when the stored
/// integer is outside the calendar range the raw integer is shown instead.
pub fn render_cell(value: &CellValue, column: &ColumnDescriptor) -> String {
    match value {
        CellValue::Null => String::new(),
        CellValue::Bool(v) => v.to_string(),
        CellValue::Int64(v) => match column.semantic {
            Some(Semantic::Date) => i32::try_from(*v)
                .ok()
                .and_then(temporal::format_date)
                .unwrap_or_else(|| v.to_string()),
            Some(Semantic::Timestamp { unit, .. }) => {
                temporal::format_timestamp(*v, unit).unwrap_or_else(|| v.to_string())
            }
            None => v.to_string(),
        },
        // f32 columns render with f32 shortest-repr so they re-parse exactly.
        CellValue::Float64(v) if column.storage == StorageType::Float32 => {
            (*v as f32).to_string()
        }
        CellValue::Float64(v) => v.to_string(),
        CellValue::Str(v) => v.clone(),
    }
}

/// Parse CSV text into the storage representation of `column`.
///
/// `row` is the 1-based data row number reported on failure.
pub fn parse_cell(text: &str, column: &ColumnDescriptor, row: usize) -> Result<CellValue> {
    if text.is_empty() {
        return Ok(empty_cell(column));
    }

    let parsed = match (column.storage, column.semantic) {
        (StorageType::Int32, Some(Semantic::Date)) => temporal::parse_date(text)
            .or_else(|| uncalendared_date(text))
            .map(|days| CellValue::Int64(i64::from(days))),
        (StorageType::Int64, Some(Semantic::Timestamp { unit, .. })) => {
            temporal::parse_timestamp(text, unit)
                .or_else(|| uncalendared_timestamp(text, unit))
                .map(CellValue::Int64)
        }
        (StorageType::Boolean, _) => parse_bool_target(text).map(CellValue::Bool),
        (StorageType::Int32, _) => text
            .parse::<i32>()
            .ok()
            .map(|v| CellValue::Int64(i64::from(v))),
        (StorageType::Int64, _) => text.parse::<i64>().ok().map(CellValue::Int64),
        (StorageType::Float32, _) => text
            .parse::<f32>()
            .ok()
            .map(|v| CellValue::Float64(f64::from(v))),
        (StorageType::Float64, _) => text.parse::<f64>().ok().map(CellValue::Float64),
        (StorageType::ByteString, _) => Some(CellValue::Str(text.to_string())),
    };

    parsed.ok_or_else(|| Error::type_conversion(&column.name, row, text, column.type_label()))
}

/// Value stored for an empty cell: null when the column allows it, otherwise
/// the zero value of the storage type.
pub fn empty_cell(column: &ColumnDescriptor) -> CellValue {
    if column.nullable {
        return CellValue::Null;
    }
    match column.storage {
        StorageType::Boolean => CellValue::Bool(false),
        StorageType::Int32 | StorageType::Int64 => CellValue::Int64(0),
        StorageType::Float32 | StorageType::Float64 => CellValue::Float64(0.0),
        StorageType::ByteString => CellValue::Str(String::new()),
    }
}

// The raw integers `render_cell` shows for values outside the calendar range
// are read back as-is. An integer that has a calendar form is still rejected.
fn uncalendared_date(text: &str) -> Option<i32> {
    let days = text.parse::<i32>().ok()?;
    temporal::format_date(days).is_none().then_some(days)
}

fn uncalendared_timestamp(text: &str, unit: TimeUnit) -> Option<i64> {
    let value = text.parse::<i64>().ok()?;
    temporal::format_timestamp(value, unit).is_none().then_some(value)
}

fn parse_bool_target(text: &str) -> Option<bool> {
    match text {
        "1" => Some(true),
        "0" => Some(false),
        _ => parse_bool_literal(text),
    }
}
