//! Dynamically typed cell values.
//!
//! Rows on both sides of the codec are `Vec<CellValue>`, positionally aligned
//! with either a [`Schema`](crate::Schema) or a CSV header.

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Date32Type, Float32Type, Float64Type, Int32Type, Int64Type, TimeUnit as ArrowTimeUnit,
    TimestampMicrosecondType, TimestampMillisecondType, TimestampNanosecondType,
    TimestampSecondType,
};

use tabedit_result::{Error, Result};

/// One cell of a row.
///
/// Integer storage of every width (including date day counts and timestamp
/// unit counts) is carried as `Int64`; floats of every width as `Float64`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int64(i64),
    Float64(f64),
    Str(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Bool(_) => "boolean",
            CellValue::Int64(_) => "integer",
            CellValue::Float64(_) => "float",
            CellValue::Str(_) => "string",
        }
    }

    /// Provisional typing of raw CSV text, used before a schema is known.
    ///
    /// Tries, in order: empty → `Null`, `i64`, `f64`, boolean literal, and
    /// falls back to the text itself.
    pub fn provisional(text: &str) -> Self {
        if text.is_empty() {
            return CellValue::Null;
        }
        if let Ok(v) = text.parse::<i64>() {
            return CellValue::Int64(v);
        }
        if let Ok(v) = text.parse::<f64>() {
            return CellValue::Float64(v);
        }
        if let Some(v) = parse_bool_literal(text) {
            return CellValue::Bool(v);
        }
        CellValue::Str(text.to_string())
    }

    /// Read the cell at `index` from a decoded Arrow column.
    pub fn from_array_ref(array: &ArrayRef, index: usize) -> Result<CellValue> {
        if array.is_null(index) {
            return Ok(CellValue::Null);
        }

        let unexpected = || {
            Error::Internal(format!(
                "column array does not match its data type {:?}",
                array.data_type()
            ))
        };

        let value = match array.data_type() {
            DataType::Boolean => {
                CellValue::Bool(array.as_boolean_opt().ok_or_else(unexpected)?.value(index))
            }
            DataType::Int32 => CellValue::Int64(i64::from(
                array
                    .as_primitive_opt::<Int32Type>()
                    .ok_or_else(unexpected)?
                    .value(index),
            )),
            DataType::Int64 => CellValue::Int64(
                array
                    .as_primitive_opt::<Int64Type>()
                    .ok_or_else(unexpected)?
                    .value(index),
            ),
            DataType::Date32 => CellValue::Int64(i64::from(
                array
                    .as_primitive_opt::<Date32Type>()
                    .ok_or_else(unexpected)?
                    .value(index),
            )),
            DataType::Timestamp(unit, _) => {
                let raw = match unit {
                    ArrowTimeUnit::Second => array
                        .as_primitive_opt::<TimestampSecondType>()
                        .map(|a| a.value(index)),
                    ArrowTimeUnit::Millisecond => array
                        .as_primitive_opt::<TimestampMillisecondType>()
                        .map(|a| a.value(index)),
                    ArrowTimeUnit::Microsecond => array
                        .as_primitive_opt::<TimestampMicrosecondType>()
                        .map(|a| a.value(index)),
                    ArrowTimeUnit::Nanosecond => array
                        .as_primitive_opt::<TimestampNanosecondType>()
                        .map(|a| a.value(index)),
                };
                CellValue::Int64(raw.ok_or_else(unexpected)?)
            }
            DataType::Float32 => CellValue::Float64(f64::from(
                array
                    .as_primitive_opt::<Float32Type>()
                    .ok_or_else(unexpected)?
                    .value(index),
            )),
            DataType::Float64 => CellValue::Float64(
                array
                    .as_primitive_opt::<Float64Type>()
                    .ok_or_else(unexpected)?
                    .value(index),
            ),
            DataType::Utf8 => CellValue::Str(
                array
                    .as_string_opt::<i32>()
                    .ok_or_else(unexpected)?
                    .value(index)
                    .to_string(),
            ),
            DataType::LargeUtf8 => CellValue::Str(
                array
                    .as_string_opt::<i64>()
                    .ok_or_else(unexpected)?
                    .value(index)
                    .to_string(),
            ),
            other => {
                return Err(Error::Internal(format!(
                    "unsupported Arrow type for cell extraction: {other:?}"
                )));
            }
        };
        Ok(value)
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int64(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float64(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Str(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Str(v)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CellValue::Null, Into::into)
    }
}

/// Boolean literals recognised in CSV text: `true`, `True`, `TRUE`, `t`, `T`
/// and their `false` counterparts. Other spellings such as `tRuE` are text;
/// `0` and `1` are integers.
pub fn parse_bool_literal(text: &str) -> Option<bool> {
    match text {
        "true" | "True" | "TRUE" | "t" | "T" => Some(true),
        "false" | "False" | "FALSE" | "f" | "F" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{
        BinaryArray, BooleanArray, Date32Array, Float32Array, Int32Array, StringArray,
        TimestampNanosecondArray,
    };
    use std::sync::Arc;

    #[test]
    fn provisional_typing_prefers_numbers_over_booleans() {
        assert_eq!(CellValue::provisional(""), CellValue::Null);
        assert_eq!(CellValue::provisional("1"), CellValue::Int64(1));
        assert_eq!(CellValue::provisional("-7"), CellValue::Int64(-7));
        assert_eq!(CellValue::provisional("2.5"), CellValue::Float64(2.5));
        assert_eq!(CellValue::provisional("TRUE"), CellValue::Bool(true));
        assert_eq!(CellValue::provisional("f"), CellValue::Bool(false));
        assert_eq!(CellValue::provisional("nope"), CellValue::Str("nope".into()));
    }

    #[test]
    fn bool_literals() {
        for t in ["true", "True", "TRUE", "t", "T"] {
            assert_eq!(parse_bool_literal(t), Some(true), "{t}");
        }
        for f in ["false", "False", "FALSE", "f", "F"] {
            assert_eq!(parse_bool_literal(f), Some(false), "{f}");
        }
        assert_eq!(parse_bool_literal("1"), None);
        assert_eq!(parse_bool_literal("yes"), None);
        for mixed in ["tRuE", "fALSE", "TRue", "falsE"] {
            assert_eq!(parse_bool_literal(mixed), None, "{mixed}");
            assert_eq!(CellValue::provisional(mixed), CellValue::Str(mixed.into()));
        }
    }

    #[test]
    fn cells_extracted_from_arrow_arrays() {
        let ints: ArrayRef = Arc::new(Int32Array::from(vec![Some(5), None]));
        assert_eq!(CellValue::from_array_ref(&ints, 0).unwrap(), CellValue::Int64(5));
        assert_eq!(CellValue::from_array_ref(&ints, 1).unwrap(), CellValue::Null);

        let floats: ArrayRef = Arc::new(Float32Array::from(vec![1.5f32]));
        assert_eq!(
            CellValue::from_array_ref(&floats, 0).unwrap(),
            CellValue::Float64(1.5)
        );

        let bools: ArrayRef = Arc::new(BooleanArray::from(vec![true]));
        assert_eq!(CellValue::from_array_ref(&bools, 0).unwrap(), CellValue::Bool(true));

        let dates: ArrayRef = Arc::new(Date32Array::from(vec![20313]));
        assert_eq!(
            CellValue::from_array_ref(&dates, 0).unwrap(),
            CellValue::Int64(20313)
        );

        let ts: ArrayRef = Arc::new(TimestampNanosecondArray::from(vec![42i64]));
        assert_eq!(CellValue::from_array_ref(&ts, 0).unwrap(), CellValue::Int64(42));

        let strings: ArrayRef = Arc::new(StringArray::from(vec!["hello"]));
        assert_eq!(
            CellValue::from_array_ref(&strings, 0).unwrap(),
            CellValue::Str("hello".into())
        );
    }

    #[test]
    fn raw_binary_arrays_are_not_extracted() {
        let raw: ArrayRef = Arc::new(BinaryArray::from(vec![b"abc".as_ref()]));
        let err = CellValue::from_array_ref(&raw, 0).unwrap_err();
        assert!(matches!(err, Error::Internal(_)), "{err:?}");
    }

    #[test]
    fn option_conversion_maps_none_to_null() {
        assert_eq!(CellValue::from(None::<i64>), CellValue::Null);
        assert_eq!(CellValue::from(Some("x")), CellValue::Str("x".into()));
    }
}
