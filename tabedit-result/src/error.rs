use std::{fmt, io};
use thiserror::Error;

/// Unified error type for every tabedit operation.
///
/// The codec distinguishes between failures that abort a conversion
/// (malformed Parquet, empty CSV, a cell that cannot be coerced into its
/// column type) and conditions that are reported but tolerated
/// ([`Error::ArityMismatch`]). Each variant carries enough context to point
/// the user at the exact thing to fix.
///
/// # Error Handling Strategy
///
/// Errors propagate upward with the `?` operator. The CLI renders them with
/// their `Display` implementation; library callers can match on variants for
/// finer handling (for example to re-open the editor on a
/// [`Error::TypeConversion`]).
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading a source stream or writing a destination.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Arrow error while building or casting columnar arrays.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet error while encoding a file.
    ///
    /// Decoding failures are reported as [`Error::MalformedInput`] instead,
    /// since an unreadable footer means the input is not usable at all.
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// CSV syntax error (for example an unterminated quoted field).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The binary input could not be parsed.
    ///
    /// Raised when the Parquet footer or schema is unreadable. Aborts the
    /// conversion; nothing is written to the destination.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The text input has no header, or has no rows and no schema to fall
    /// back on.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// A CSV record whose cell count differs from the header.
    ///
    /// The codec never returns this variant; it is built for diagnostics
    /// when a record is dropped.
    #[error("record {record}: expected {expected} fields, found {found}")]
    ArityMismatch {
        record: usize,
        expected: usize,
        found: usize,
    },

    /// A cell cannot be coerced into its column's declared type.
    ///
    /// `row` is 1-based and counts data rows only (the header is not a row).
    ///
    /// # Recovery
    ///
    /// Fix the offending cell and run the conversion again; no partial
    /// output was produced.
    #[error("field '{column}' at row {row}: cannot convert {value:?} to {expected}")]
    TypeConversion {
        column: String,
        row: usize,
        value: String,
        expected: String,
    },

    /// A Parquet column uses a shape the codec does not represent
    /// (nested groups, repeated fields, decimals, fixed-length byte arrays).
    #[error("column '{column}' is not supported: {reason}")]
    UnsupportedColumn { column: String, reason: String },

    /// A codec session was driven outside its `Fresh → SchemaCaptured → Done`
    /// lifecycle.
    #[error("invalid codec state: {0}")]
    InvalidState(String),

    /// Internal error indicating a bug or a violated invariant.
    #[error("An internal operation failed: {0}")]
    Internal(String),
}

impl Error {
    /// Wrap any displayable decode failure as [`Error::MalformedInput`].
    #[inline]
    pub fn malformed<E: fmt::Display>(err: E) -> Self {
        Error::MalformedInput(err.to_string())
    }

    /// Build a [`Error::TypeConversion`] for the given cell.
    #[inline]
    pub fn type_conversion(
        column: impl Into<String>,
        row: usize,
        value: impl Into<String>,
        expected: impl fmt::Display,
    ) -> Self {
        Error::TypeConversion {
            column: column.into(),
            row,
            value: value.into(),
            expected: expected.to_string(),
        }
    }

    /// Build a [`Error::UnsupportedColumn`].
    #[inline]
    pub fn unsupported_column(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::UnsupportedColumn {
            column: column.into(),
            reason: reason.into(),
        }
    }
}
