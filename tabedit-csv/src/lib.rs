//! CSV side of the tabedit codec.
//!
//! [`CsvWriter`] renders decoded Parquet rows as CSV text for editing.
//! [`CsvReader`] parses edited text back into a [`TextTable`] of raw cells, and
//! [`infer_schema`] derives a schema for text that has none.
//!
//! Quoting follows RFC 4180 (double-quote escaping) via the `csv` crate.

pub mod inference;
pub mod reader;
pub mod writer;

pub use inference::{TypeRank, column_rank, infer_schema};
pub use reader::{CsvReadOptions, CsvReader, TextTable};
pub use writer::{CsvWriteOptions, CsvWriter};
