//! Schema inference for CSV text that did not come from a Parquet read.
//!
//! Every cell gets a [`TypeRank`]; a column's type is the maximum rank over
//! its cells. The result is independent of row order. Inference never yields
//! date or timestamp columns.

use std::ops::ControlFlow;

use tabedit_result::{Error, Result};
use tabedit_types::{CellValue, ColumnDescriptor, Schema, StorageType};

use crate::reader::TextTable;

/// Loosest primitive a piece of text parses as, ordered by width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeRank {
    Empty,
    Boolean,
    Integer,
    Float,
    String,
}

impl TypeRank {
    pub fn of(text: &str) -> Self {
        match CellValue::provisional(text) {
            CellValue::Null => TypeRank::Empty,
            CellValue::Bool(_) => TypeRank::Boolean,
            CellValue::Int64(_) => TypeRank::Integer,
            CellValue::Float64(_) => TypeRank::Float,
            CellValue::Str(_) => TypeRank::String,
        }
    }

    /// Storage used for a column of this rank. Empty-only columns are strings.
    pub fn storage(self) -> StorageType {
        match self {
            TypeRank::Boolean => StorageType::Boolean,
            TypeRank::Integer => StorageType::Int64,
            TypeRank::Float => StorageType::Float64,
            TypeRank::Empty | TypeRank::String => StorageType::ByteString,
        }
    }
}

/// Maximum rank over `cells`, stopping early once `String` is reached.
pub fn column_rank<'a, I>(cells: I) -> TypeRank
where
    I: IntoIterator<Item = &'a str>,
{
    let folded = cells.into_iter().try_fold(TypeRank::Empty, |acc, text| {
        match acc.max(TypeRank::of(text)) {
            TypeRank::String => ControlFlow::Break(TypeRank::String),
            rank => ControlFlow::Continue(rank),
        }
    });
    match folded {
        ControlFlow::Break(rank) | ControlFlow::Continue(rank) => rank,
    }
}

/// Infer one nullable column per header entry, in header order.
///
/// Fails with [`Error::EmptyInput`] when there are no data records to look at.
pub fn infer_schema(table: &TextTable) -> Result<Schema> {
    if table.is_empty() {
        return Err(Error::EmptyInput(
            "CSV input has no data rows and no schema to write them with".into(),
        ));
    }

    let schema: Schema = table
        .header()
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let rank = column_rank(table.column(idx));
            tracing::trace!("[CSV_INFER] column '{name}' ranked {rank:?}");
            ColumnDescriptor::new(name.as_str(), rank.storage())
        })
        .collect();
    Ok(schema)
}
