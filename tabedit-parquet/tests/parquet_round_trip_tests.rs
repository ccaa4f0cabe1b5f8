//! Integration tests for decoding foreign Parquet files and re-encoding them.

use std::sync::Arc;

use arrow::array::{ArrayRef, BinaryArray};
use arrow::datatypes::{DataType, Field, Schema as ArrowSchema};
use arrow::record_batch::RecordBatch;
use tabedit_parquet::{WriterConfig, read_parquet_from_memory, write_parquet_to_memory};
use tabedit_result::Result;
use tabedit_test_utils::{
    PANDAS_METADATA, init_tracing_for_tests, pandas_indexed_parquet, parquet_bytes,
    people_parquet, temporal_batch,
};
use tabedit_types::{CellValue, Row, Semantic, StorageType, TimeUnit, render_cell};

#[test]
fn foreign_file_decodes_with_nulls() {
    init_tracing_for_tests();

    let table = read_parquet_from_memory(people_parquet()).unwrap();
    let names: Vec<_> = table.schema().names().collect();
    assert_eq!(names, vec!["name", "age", "score", "active"]);
    assert_eq!(table.num_rows(), 3);

    let second = table.row(1).unwrap().unwrap();
    assert_eq!(
        second,
        vec![
            CellValue::from("Bob"),
            CellValue::Null,
            CellValue::Float64(2.0),
            CellValue::Bool(false),
        ]
    );
}

#[test]
fn unannotated_byte_arrays_decode_as_text() {
    init_tracing_for_tests();

    let schema = Arc::new(ArrowSchema::new(vec![Field::new(
        "blob",
        DataType::Binary,
        true,
    )]));
    let column: ArrayRef = Arc::new(BinaryArray::from(vec![
        Some(b"plain".as_ref()),
        None,
        Some("caf\u{e9}".as_bytes()),
    ]));
    let batch = RecordBatch::try_new(schema, vec![column]).unwrap();

    let table = read_parquet_from_memory(parquet_bytes(&batch, &[])).unwrap();
    let column = &table.schema().columns()[0];
    assert_eq!(column.storage, StorageType::ByteString);
    assert_eq!(column.semantic, None);

    let rows: Vec<Row> = table.rows().collect::<Result<_>>().unwrap();
    assert_eq!(
        rows,
        vec![
            vec![CellValue::from("plain")],
            vec![CellValue::Null],
            vec![CellValue::from("caf\u{e9}")],
        ]
    );
}

#[test]
fn temporal_columns_keep_their_semantics() {
    init_tracing_for_tests();

    let bytes = parquet_bytes(&temporal_batch(), &[]);
    let table = read_parquet_from_memory(bytes).unwrap();

    let day = &table.schema().columns()[0];
    let at = &table.schema().columns()[1];
    assert_eq!(day.storage, StorageType::Int32);
    assert_eq!(day.semantic, Some(Semantic::Date));
    assert_eq!(at.storage, StorageType::Int64);
    assert_eq!(
        at.semantic,
        Some(Semantic::Timestamp {
            unit: TimeUnit::Nanos,
            utc_adjusted: false
        })
    );

    let row = table.row(0).unwrap().unwrap();
    assert_eq!(render_cell(&row[0], day), "2025-08-13");
    assert_eq!(render_cell(&row[1], at), "2025-08-13 23:07:38.027512000");
}

#[test]
fn re_encoding_preserves_schema_metadata_and_rows() {
    init_tracing_for_tests();

    let original = read_parquet_from_memory(pandas_indexed_parquet()).unwrap();
    let rows: Vec<Row> = original.rows().collect::<Result<_>>().unwrap();

    let bytes = write_parquet_to_memory(
        original.schema(),
        &rows,
        original.metadata(),
        &WriterConfig::default(),
    )
    .unwrap();
    let rewritten = read_parquet_from_memory(bytes).unwrap();

    assert_eq!(rewritten.schema(), original.schema());
    assert_eq!(rewritten.metadata(), original.metadata());
    assert_eq!(rewritten.metadata().get("pandas"), Some(PANDAS_METADATA));
    let rewritten_rows: Vec<Row> = rewritten.rows().collect::<Result<_>>().unwrap();
    assert_eq!(rewritten_rows, rows);
}

#[test]
fn zero_row_file_keeps_its_schema() {
    init_tracing_for_tests();

    let table = read_parquet_from_memory(people_parquet()).unwrap();
    let bytes =
        write_parquet_to_memory(table.schema(), &[], table.metadata(), &WriterConfig::default())
            .unwrap();

    let empty = read_parquet_from_memory(bytes).unwrap();
    assert_eq!(empty.num_rows(), 0);
    assert_eq!(empty.schema(), table.schema());
    assert_eq!(empty.rows().count(), 0);
}
