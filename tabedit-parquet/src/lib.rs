//! Parquet side of the tabedit codec.
//!
//! Whole files are decoded from and encoded to memory buffers. Reading yields a
//! [`ParquetTable`] (schema, footer metadata and rows); writing takes the same
//! three pieces and produces bytes whose leaf columns match the schema exactly.
//!
//! Only flat tables are handled. Each leaf maps to one
//! [`ColumnDescriptor`](tabedit_types::ColumnDescriptor); nested, repeated and
//! otherwise unsupported columns are rejected by [`schema_from_parquet`].

pub mod reader;
pub mod schema;
pub mod writer;

pub use reader::{ParquetTable, RowIter, read_parquet_from_memory};
pub use schema::schema_from_parquet;
pub use writer::{WriterConfig, write_parquet_to_memory};

pub use parquet::basic::Compression;
