//! Parquet file reading utilities.

use arrow::array::ArrayRef;
use arrow::compute::{CastOptions, cast_with_options};
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use parquet::arrow::arrow_reader::{ArrowReaderOptions, ParquetRecordBatchReaderBuilder};

use tabedit_result::{Error, Result};
use tabedit_types::{CellValue, ColumnDescriptor, Metadata, MetadataEntry, Row, Schema};

use crate::schema::schema_from_parquet;

/// A fully decoded Parquet file: schema, footer metadata, and its rows.
///
/// Columns are held as Arrow arrays already cast to the schema's types; rows
/// are materialized on demand through [`ParquetTable::row`] and
/// [`ParquetTable::rows`].
#[derive(Debug, Clone)]
pub struct ParquetTable {
    schema: Schema,
    metadata: Metadata,
    batches: Vec<RecordBatch>,
    num_rows: usize,
}

impl ParquetTable {
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn into_parts(self) -> (Schema, Metadata, Vec<RecordBatch>) {
        (self.schema, self.metadata, self.batches)
    }

    /// Row at `index`, or `None` past the end.
    pub fn row(&self, index: usize) -> Result<Option<Row>> {
        let mut offset = index;
        for batch in &self.batches {
            if offset < batch.num_rows() {
                return row_from_batch(batch, offset).map(Some);
            }
            offset -= batch.num_rows();
        }
        Ok(None)
    }

    /// Iterate rows from the start. Each call restarts at row 0.
    pub fn rows(&self) -> RowIter<'_> {
        RowIter {
            table: self,
            batch: 0,
            offset: 0,
        }
    }
}

/// Iterator over the rows of a [`ParquetTable`].
pub struct RowIter<'a> {
    table: &'a ParquetTable,
    batch: usize,
    offset: usize,
}

impl Iterator for RowIter<'_> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let batch = self.table.batches.get(self.batch)?;
            if self.offset < batch.num_rows() {
                let row = row_from_batch(batch, self.offset);
                self.offset += 1;
                return Some(row);
            }
            self.batch += 1;
            self.offset = 0;
        }
    }
}

fn row_from_batch(batch: &RecordBatch, index: usize) -> Result<Row> {
    batch
        .columns()
        .iter()
        .map(|column| CellValue::from_array_ref(column, index))
        .collect()
}

/// Decode in-memory Parquet bytes.
///
/// The Parquet schema is the source of truth for column types; any embedded
/// Arrow schema hint is ignored so that the decoded arrays match what the
/// writer will produce on the way back.
pub fn read_parquet_from_memory(bytes: impl Into<Bytes>) -> Result<ParquetTable> {
    let bytes = bytes.into();
    tracing::trace!("[PARQUET_READ] decoding {} bytes", bytes.len());

    let options = ArrowReaderOptions::new().with_skip_arrow_metadata(true);
    let builder = ParquetRecordBatchReaderBuilder::try_new_with_options(bytes, options)
        .map_err(|e| Error::MalformedInput(format!("failed to read Parquet footer: {e}")))?;

    let schema = schema_from_parquet(builder.parquet_schema())?;
    let metadata = builder
        .metadata()
        .file_metadata()
        .key_value_metadata()
        .map(|kvs| {
            kvs.iter()
                .map(|kv| MetadataEntry {
                    key: kv.key.clone(),
                    value: kv.value.clone(),
                })
                .collect::<Vec<_>>()
        })
        .map(Metadata::new)
        .unwrap_or_default();

    tracing::debug!(
        "[PARQUET_READ] schema has {} columns, footer has {} metadata entries",
        schema.len(),
        metadata.len()
    );

    let reader = builder
        .build()
        .map_err(|e| Error::MalformedInput(format!("failed to build Parquet reader: {e}")))?;

    let arrow_schema = schema.to_arrow();
    let mut batches = Vec::new();
    let mut num_rows = 0usize;
    for batch_result in reader {
        let batch = batch_result.map_err(Error::malformed)?;

        let columns = batch
            .columns()
            .iter()
            .zip(schema.columns())
            .map(|(array, column)| conform_column(array, column))
            .collect::<Result<Vec<_>>>()?;

        num_rows += batch.num_rows();
        batches.push(RecordBatch::try_new(arrow_schema.clone(), columns)?);
    }

    tracing::trace!("[PARQUET_READ] decoded {num_rows} rows in {} batches", batches.len());

    Ok(ParquetTable {
        schema,
        metadata,
        batches,
        num_rows,
    })
}

/// Cast a decoded array to the type the schema declares for it. Narrowing
/// that would lose values fails instead of producing nulls.
fn conform_column(array: &ArrayRef, column: &ColumnDescriptor) -> Result<ArrayRef> {
    let target = column.arrow_type();
    if array.data_type() == &target {
        return Ok(array.clone());
    }
    let options = CastOptions {
        safe: false,
        ..Default::default()
    };
    cast_with_options(array, &target, &options).map_err(|e| {
        Error::MalformedInput(format!(
            "column '{}' could not be decoded as {}: {e}",
            column.name,
            column.type_label()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::{WriterConfig, write_parquet_to_memory};
    use tabedit_types::StorageType;

    fn sample() -> (Schema, Vec<Row>) {
        let schema = Schema::new(vec![
            ColumnDescriptor::new("id", StorageType::Int64),
            ColumnDescriptor::new("name", StorageType::ByteString),
        ]);
        let rows = vec![
            vec![CellValue::Int64(1), CellValue::from("a")],
            vec![CellValue::Int64(2), CellValue::from("b")],
            vec![CellValue::Int64(3), CellValue::Null],
        ];
        (schema, rows)
    }

    #[test]
    fn test_read_parquet_from_memory() {
        let (schema, rows) = sample();
        let bytes =
            write_parquet_to_memory(&schema, &rows, &Metadata::default(), &WriterConfig::default())
                .unwrap();

        let table = read_parquet_from_memory(bytes).unwrap();
        assert_eq!(table.schema(), &schema);
        assert_eq!(table.num_rows(), 3);
        assert!(table.metadata().is_empty());

        let decoded: Vec<Row> = table.rows().collect::<Result<_>>().unwrap();
        assert_eq!(decoded, rows);
    }

    #[test]
    fn rows_are_addressable_across_row_groups() {
        let (schema, rows) = sample();
        let config = WriterConfig {
            max_row_group_size: 2,
            ..Default::default()
        };
        let bytes = write_parquet_to_memory(&schema, &rows, &Metadata::default(), &config).unwrap();

        let table = read_parquet_from_memory(bytes).unwrap();
        assert_eq!(table.row(2).unwrap(), Some(rows[2].clone()));
        assert_eq!(table.row(3).unwrap(), None);

        // Iteration restarts from the first row every time.
        assert_eq!(table.rows().count(), 3);
        assert_eq!(table.rows().count(), 3);
    }

    #[test]
    fn garbage_is_malformed_input() {
        let err = read_parquet_from_memory(b"definitely not parquet".to_vec()).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }
}
