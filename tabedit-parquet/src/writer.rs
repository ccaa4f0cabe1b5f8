//! Parquet file writing utilities.

use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::compute::cast;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_writer::ArrowWriterOptions;
use parquet::basic::Compression;
use parquet::file::metadata::KeyValue;
use parquet::file::properties::WriterProperties;

use tabedit_result::{Error, Result};
use tabedit_types::{CellValue, ColumnDescriptor, Metadata, Row, Schema, StorageType};

/// Parquet encoder settings.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    pub compression: Compression,
    pub max_row_group_size: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::SNAPPY,
            max_row_group_size: 8192,
        }
    }
}

/// Encode `rows` as an in-memory Parquet file whose leaf columns match
/// `schema` exactly, with `metadata` as the footer key/value list.
///
/// No Arrow schema hint is embedded, so the footer metadata of the output is
/// exactly `metadata`. Each row must already hold cells converted to its
/// column's storage; a mismatch is reported as an internal error.
pub fn write_parquet_to_memory(
    schema: &Schema,
    rows: &[Row],
    metadata: &Metadata,
    config: &WriterConfig,
) -> Result<Vec<u8>> {
    tracing::trace!(
        "[PARQUET_WRITE] encoding {} rows x {} columns",
        rows.len(),
        schema.len()
    );

    let columns = schema
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| build_column(column, idx, rows))
        .collect::<Result<Vec<_>>>()?;

    let arrow_schema = schema.to_arrow();
    let batch = RecordBatch::try_new_with_options(
        Arc::clone(&arrow_schema),
        columns,
        &RecordBatchOptions::new().with_row_count(Some(rows.len())),
    )?;

    let key_value_metadata = (!metadata.is_empty()).then(|| {
        metadata
            .entries()
            .iter()
            .map(|entry| KeyValue {
                key: entry.key.clone(),
                value: entry.value.clone(),
            })
            .collect::<Vec<_>>()
    });

    let props = WriterProperties::builder()
        .set_compression(config.compression)
        .set_max_row_group_size(config.max_row_group_size)
        .set_key_value_metadata(key_value_metadata)
        .build();
    let options = ArrowWriterOptions::new()
        .with_properties(props)
        .with_skip_arrow_metadata(true);

    let mut buffer = Vec::new();
    let mut writer = ArrowWriter::try_new_with_options(&mut buffer, arrow_schema, options)?;
    if batch.num_rows() > 0 {
        writer.write(&batch)?;
    }
    writer.close()?;

    tracing::trace!("[PARQUET_WRITE] wrote {} bytes", buffer.len());
    Ok(buffer)
}

fn build_column(column: &ColumnDescriptor, idx: usize, rows: &[Row]) -> Result<ArrayRef> {
    let cells = rows.iter().map(|row| row.get(idx).unwrap_or(&CellValue::Null));
    let mismatch = |cell: &CellValue| {
        Error::Internal(format!(
            "column '{}' expects {} cells, found {}",
            column.name,
            column.storage,
            cell.type_name()
        ))
    };

    let array: ArrayRef = match column.storage {
        StorageType::Boolean => Arc::new(
            cells
                .map(|cell| match cell {
                    CellValue::Null => Ok(None),
                    CellValue::Bool(v) => Ok(Some(*v)),
                    other => Err(mismatch(other)),
                })
                .collect::<Result<BooleanArray>>()?,
        ),
        StorageType::Int32 => Arc::new(
            cells
                .map(|cell| match cell {
                    CellValue::Null => Ok(None),
                    CellValue::Int64(v) => i32::try_from(*v).map(Some).map_err(|_| {
                        Error::Internal(format!(
                            "value {v} does not fit Int32 column '{}'",
                            column.name
                        ))
                    }),
                    other => Err(mismatch(other)),
                })
                .collect::<Result<Int32Array>>()?,
        ),
        StorageType::Int64 => Arc::new(
            cells
                .map(|cell| match cell {
                    CellValue::Null => Ok(None),
                    CellValue::Int64(v) => Ok(Some(*v)),
                    other => Err(mismatch(other)),
                })
                .collect::<Result<Int64Array>>()?,
        ),
        StorageType::Float32 => Arc::new(
            cells
                .map(|cell| match cell {
                    CellValue::Null => Ok(None),
                    CellValue::Float64(v) => Ok(Some(*v as f32)),
                    other => Err(mismatch(other)),
                })
                .collect::<Result<Float32Array>>()?,
        ),
        StorageType::Float64 => Arc::new(
            cells
                .map(|cell| match cell {
                    CellValue::Null => Ok(None),
                    CellValue::Float64(v) => Ok(Some(*v)),
                    other => Err(mismatch(other)),
                })
                .collect::<Result<Float64Array>>()?,
        ),
        StorageType::ByteString => Arc::new(
            cells
                .map(|cell| match cell {
                    CellValue::Null => Ok(None),
                    CellValue::Str(v) => Ok(Some(v.as_str())),
                    other => Err(mismatch(other)),
                })
                .collect::<Result<StringArray>>()?,
        ),
    };

    // Semantic columns are built from their storage integers, then retagged.
    let target = column.arrow_type();
    if array.data_type() == &target {
        Ok(array)
    } else {
        Ok(cast(&array, &target)?)
    }
}
