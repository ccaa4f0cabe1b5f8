//! The Parquet ⇄ CSV codec session.
//!
//! A [`ParquetCodec`] is single-use: `copy_in` decodes a Parquet file to CSV
//! and remembers its schema and footer metadata, and a following `copy_out`
//! rebuilds Parquet from (possibly edited) CSV with that same schema. A
//! `copy_out` on a fresh session infers the schema from the text instead.

use std::collections::HashMap;
use std::io::{Read, Write};

use tabedit_csv::{CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter, TextTable, infer_schema};
use tabedit_parquet::{WriterConfig, read_parquet_from_memory, write_parquet_to_memory};
use tabedit_result::{Error, Result};
use tabedit_types::{Metadata, Row, Schema, empty_cell, parse_cell};

use crate::copier::Copier;
use crate::display::display_order;

/// Settings for one codec session.
#[derive(Debug, Clone, Default)]
pub struct CodecOptions {
    pub read: CsvReadOptions,
    pub write: CsvWriteOptions,
    pub parquet: WriterConfig,
    /// List pandas index columns first in the CSV. The Parquet column order
    /// written back is unaffected.
    pub index_columns_first: bool,
}

/// Lifecycle of a [`ParquetCodec`].
///
/// `Fresh -> SchemaCaptured -> Done` when `copy_in` runs first. A `copy_out`
/// on a fresh session infers its schema from the text, uses it for that one
/// file and goes straight from `Fresh` to `Done`; the inferred schema is not
/// kept, so [`ParquetCodec::schema`] stays `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Fresh,
    SchemaCaptured,
    Done,
}

#[derive(Debug, Clone)]
pub struct ParquetCodec {
    options: CodecOptions,
    state: SessionState,
    schema: Option<Schema>,
    metadata: Metadata,
}

impl Default for ParquetCodec {
    fn default() -> Self {
        Self::new(CodecOptions::default())
    }
}

impl ParquetCodec {
    pub fn new(options: CodecOptions) -> Self {
        Self {
            options,
            state: SessionState::Fresh,
            schema: None,
            metadata: Metadata::default(),
        }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Schema captured by `copy_in`, if any.
    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    /// Footer metadata captured by `copy_in`; empty otherwise.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Decode Parquet from `src` and write it to `dst` as CSV.
    fn decode(&mut self, dst: &mut dyn Write, mut src: Box<dyn Read>) -> Result<()> {
        if self.state != SessionState::Fresh {
            return Err(Error::InvalidState(format!(
                "copy_in requires a fresh session, found {:?}",
                self.state
            )));
        }

        let mut bytes = Vec::new();
        src.read_to_end(&mut bytes)?;
        drop(src);

        let table = read_parquet_from_memory(bytes)?;
        let order = display_order(
            table.schema(),
            table.metadata(),
            self.options.index_columns_first,
        );
        let mut csv = Vec::new();
        let written = CsvWriter::new(self.options.write.clone()).write_rows_in_order(
            &mut csv,
            table.schema(),
            &order,
            table.rows(),
        )?;
        dst.write_all(&csv)?;
        tracing::debug!(
            "[CODEC] copy_in wrote {written} rows, captured {} columns and {} metadata entries",
            table.schema().len(),
            table.metadata().len()
        );

        let (schema, metadata, _) = table.into_parts();
        self.schema = Some(schema);
        self.metadata = metadata;
        self.state = SessionState::SchemaCaptured;
        Ok(())
    }

    /// Parse CSV from `src` and build the complete Parquet file in memory.
    ///
    /// Marks the session done on success.
    pub fn encode(&mut self, mut src: Box<dyn Read>) -> Result<Vec<u8>> {
        if self.state == SessionState::Done {
            return Err(Error::InvalidState(
                "copy_out already completed for this session".into(),
            ));
        }

        let mut text = Vec::new();
        src.read_to_end(&mut text)?;
        drop(src);

        let table = CsvReader::new(self.options.read.clone()).read_from(text.as_slice())?;
        let inferred;
        let schema = match &self.schema {
            Some(schema) => schema,
            None => {
                inferred = infer_schema(&table)?;
                tracing::debug!(
                    "[CODEC] inferred {} columns from {} rows",
                    inferred.len(),
                    table.len()
                );
                &inferred
            }
        };

        let rows = convert_rows(schema, &table)?;
        let bytes =
            write_parquet_to_memory(schema, &rows, &self.metadata, &self.options.parquet)?;
        tracing::debug!("[CODEC] copy_out encoded {} rows", rows.len());

        self.state = SessionState::Done;
        Ok(bytes)
    }
}

impl Copier for ParquetCodec {
    fn copy_in(&mut self, dst: &mut dyn Write, src: Box<dyn Read>) -> Result<()> {
        self.decode(dst, src)
    }

    fn copy_out(&mut self, mut dst: Box<dyn Write>, src: Box<dyn Read>) -> Result<()> {
        let bytes = self.encode(src)?;
        dst.write_all(&bytes)?;
        dst.flush()?;
        Ok(())
    }
}

/// For each schema column, the CSV field it reads from. The k-th schema
/// column named `x` takes the k-th header field named `x`.
fn match_columns(schema: &Schema, header: &[String]) -> Vec<Option<usize>> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    schema
        .columns()
        .iter()
        .map(|column| {
            let occurrence = seen.entry(column.name.as_str()).or_insert(0);
            let nth = *occurrence;
            *occurrence += 1;
            let source = header
                .iter()
                .enumerate()
                .filter(|(_, name)| **name == column.name)
                .nth(nth)
                .map(|(idx, _)| idx);
            if source.is_none() {
                tracing::debug!("[CODEC] column '{}' missing from CSV header", column.name);
            }
            source
        })
        .collect()
}

/// Convert every kept record to the schema's storage types. Row numbers in
/// errors are 1-based over kept records.
fn convert_rows(schema: &Schema, table: &TextTable) -> Result<Vec<Row>> {
    let sources = match_columns(schema, table.header());
    table
        .records()
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let row_number = idx + 1;
            schema
                .columns()
                .iter()
                .zip(&sources)
                .map(|(column, source)| match source {
                    Some(field) => parse_cell(&record[*field], column, row_number),
                    None => Ok(empty_cell(column)),
                })
                .collect::<Result<Row>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tabedit_types::{CellValue, ColumnDescriptor, StorageType};

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn columns_match_by_name_and_occurrence() {
        let schema = Schema::new(vec![
            ColumnDescriptor::new("a", StorageType::Int64),
            ColumnDescriptor::new("b", StorageType::Int64),
            ColumnDescriptor::new("a", StorageType::Int64),
            ColumnDescriptor::new("missing", StorageType::Int64),
        ]);
        let sources = match_columns(&schema, &header(&["b", "a", "extra", "a"]));
        assert_eq!(sources, vec![Some(1), Some(0), Some(3), None]);
    }

    #[test]
    fn missing_columns_get_empty_cells() {
        let schema = Schema::new(vec![
            ColumnDescriptor::new("n", StorageType::Int64).with_nullable(false),
            ColumnDescriptor::new("s", StorageType::ByteString),
        ]);
        let table = TextTable::new(header(&["s"]), vec![vec!["x".into()]]);
        let rows = convert_rows(&schema, &table).unwrap();
        assert_eq!(rows, vec![vec![CellValue::Int64(0), CellValue::from("x")]]);
    }

    #[test]
    fn fresh_session_infers_on_copy_out() {
        let mut codec = ParquetCodec::default();
        let bytes = codec
            .encode(Box::new(Cursor::new(b"a,b\n1,x\n".to_vec())))
            .unwrap();
        assert_eq!(codec.state(), SessionState::Done);
        assert!(codec.schema().is_none());

        let table = read_parquet_from_memory(bytes).unwrap();
        assert_eq!(table.schema().columns()[0].storage, StorageType::Int64);
        assert_eq!(table.schema().columns()[1].storage, StorageType::ByteString);
    }

    #[test]
    fn failed_copy_out_keeps_state() {
        let mut codec = ParquetCodec::default();
        let err = codec.encode(Box::new(Cursor::new(Vec::new()))).unwrap_err();
        assert!(matches!(err, Error::EmptyInput(_)));
        assert_eq!(codec.state(), SessionState::Fresh);
    }

    /// Records the size of every write it receives.
    #[derive(Default)]
    struct ChunkLog(Vec<usize>);

    impl Write for ChunkLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.push(buf.len());
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn copy_in_hands_over_the_csv_in_one_write() {
        let mut codec = ParquetCodec::default();
        let mut log = ChunkLog::default();
        codec
            .copy_in(
                &mut log,
                Box::new(Cursor::new(tabedit_test_utils::people_parquet())),
            )
            .unwrap();

        let expected = "name,age,score,active\nAlice,30,1.5,true\nBob,,2,false\nCarol,41,3.25,true\n";
        assert_eq!(log.0, vec![expected.len()]);
    }

    #[test]
    fn reuse_is_rejected() {
        let mut codec = ParquetCodec::default();
        codec
            .encode(Box::new(Cursor::new(b"a\n1\n".to_vec())))
            .unwrap();

        let again = codec.encode(Box::new(Cursor::new(b"a\n1\n".to_vec())));
        assert!(matches!(again, Err(Error::InvalidState(_))));

        let mut sink = Vec::new();
        let copy_in = codec.copy_in(&mut sink, Box::new(Cursor::new(Vec::new())));
        assert!(matches!(copy_in, Err(Error::InvalidState(_))));
        assert!(sink.is_empty());
    }
}
