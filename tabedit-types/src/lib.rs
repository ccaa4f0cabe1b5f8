//! Schema model, cell values and the value converter shared by the
//! tabedit codec crates.
//!
//! Nothing here touches I/O: the Parquet and CSV crates decode their inputs
//! into [`Schema`], [`Metadata`] and rows of [`CellValue`], and use
//! [`render_cell`] / [`parse_cell`] to move between stored values and the
//! text a user edits.

pub mod cell;
pub mod convert;
pub mod schema;
pub mod temporal;

pub use cell::{CellValue, parse_bool_literal};
pub use convert::{empty_cell, parse_cell, render_cell};
pub use schema::{
    ColumnDescriptor, Metadata, MetadataEntry, Schema, Semantic, StorageType, TimeUnit,
    UTC_TIMEZONE,
};

/// One row of cells.
pub type Row = Vec<CellValue>;
