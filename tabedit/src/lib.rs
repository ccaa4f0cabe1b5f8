//! tabedit: edit Parquet files as CSV.
//!
//! A Parquet file is decoded to CSV ([`Copier::copy_in`]), edited as text, and
//! re-encoded ([`Copier::copy_out`]) with the original column types and
//! footer metadata. Gzip-compressed files and plain text files go through the
//! same [`Copier`] interface, selected by file name with [`MultiCopier`].
//!
//! # Example
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use tabedit::{Copier, ParquetCodec};
//!
//! # fn main() -> tabedit::Result<()> {
//! let parquet = std::fs::read("people.parquet")?;
//! let mut codec = ParquetCodec::default();
//!
//! let mut csv = Vec::new();
//! codec.copy_in(&mut csv, Box::new(Cursor::new(parquet)))?;
//!
//! // ... edit `csv` ...
//!
//! let out = std::fs::File::create("people.parquet")?;
//! codec.copy_out(Box::new(out), Box::new(Cursor::new(csv)))?;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod copier;
pub mod display;
pub mod editor;
pub mod files;
pub mod names;

pub use codec::{CodecOptions, ParquetCodec, SessionState};
pub use copier::{Copier, GzipCopier, MultiCopier, PlainCopier};
pub use display::{display_order, pandas_index_columns};
pub use editor::{CommandEditor, Editor};
pub use files::{convert_file, edit_file, edit_file_into, view_file};
pub use names::{FileKind, base_name, edit_name};

pub use tabedit_csv::{CsvReadOptions, CsvWriteOptions};
pub use tabedit_parquet::{Compression, WriterConfig};
pub use tabedit_result::{Error, Result};
