//! Helpers shared by tabedit test suites: tracing setup and Parquet fixtures
//! built directly with the `parquet` crate, independent of tabedit's own
//! writer.

use std::sync::{Arc, Once};

use arrow::array::{
    ArrayRef, BooleanArray, Date32Array, Float64Array, Int64Array, StringArray,
    TimestampNanosecondArray,
};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_writer::ArrowWriterOptions;
use parquet::file::metadata::KeyValue;
use parquet::file::properties::WriterProperties;

static INIT: Once = Once::new();

/// Initialize tracing for test binaries. Safe to call multiple times.
pub fn init_tracing_for_tests() {
    INIT.call_once(|| {
        use tracing_subscriber::filter::EnvFilter;
        use tracing_subscriber::fmt;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .try_init();
    });
}

#[cfg(feature = "auto-init")]
mod auto {
    use ctor::ctor;

    #[ctor]
    fn init() {
        super::init_tracing_for_tests();
    }
}

/// Encode `batch` as Parquet with the given footer key/value pairs.
///
/// The Arrow schema hint is left out so the footer holds exactly `metadata`.
pub fn parquet_bytes(batch: &RecordBatch, metadata: &[(&str, &str)]) -> Vec<u8> {
    let kvs = (!metadata.is_empty()).then(|| {
        metadata
            .iter()
            .map(|(k, v)| KeyValue::new(k.to_string(), v.to_string()))
            .collect::<Vec<_>>()
    });
    let props = WriterProperties::builder()
        .set_key_value_metadata(kvs)
        .build();
    let options = ArrowWriterOptions::new()
        .with_properties(props)
        .with_skip_arrow_metadata(true);

    let mut buf = Vec::new();
    let mut writer = ArrowWriter::try_new_with_options(&mut buf, batch.schema(), options)
        .expect("create parquet writer");
    writer.write(batch).expect("write batch");
    writer.close().expect("close writer");
    buf
}

/// People table: `name` (utf8), `age` (int64), `score` (double),
/// `active` (bool). The second row has a null age.
pub fn people_batch() -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, true),
        Field::new("age", DataType::Int64, true),
        Field::new("score", DataType::Float64, true),
        Field::new("active", DataType::Boolean, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec!["Alice", "Bob", "Carol"])),
        Arc::new(Int64Array::from(vec![Some(30), None, Some(41)])),
        Arc::new(Float64Array::from(vec![1.5, 2.0, 3.25])),
        Arc::new(BooleanArray::from(vec![true, false, true])),
    ];
    RecordBatch::try_new(schema, columns).expect("people batch")
}

/// Parquet bytes for [`people_batch`] with no footer metadata.
pub fn people_parquet() -> Vec<u8> {
    parquet_bytes(&people_batch(), &[])
}

/// Table with a date and a nanosecond timestamp column.
pub fn temporal_batch() -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("day", DataType::Date32, true),
        Field::new("at", DataType::Timestamp(TimeUnit::Nanosecond, None), true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Date32Array::from(vec![20313])),
        Arc::new(TimestampNanosecondArray::from(vec![1_755_126_458_027_512_000i64])),
    ];
    RecordBatch::try_new(schema, columns).expect("temporal batch")
}

/// Table written the way pandas does it: data columns first, the index
/// column last, and a `pandas` footer entry naming the index.
pub fn pandas_indexed_parquet() -> Vec<u8> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("value", DataType::Float64, true),
        Field::new("label", DataType::Utf8, true),
        Field::new("row_key", DataType::Int64, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Float64Array::from(vec![0.5, 1.5])),
        Arc::new(StringArray::from(vec!["x", "y"])),
        Arc::new(Int64Array::from(vec![10, 20])),
    ];
    let batch = RecordBatch::try_new(schema, columns).expect("pandas batch");
    parquet_bytes(&batch, &[("pandas", PANDAS_METADATA)])
}

/// Footer JSON used by [`pandas_indexed_parquet`].
pub const PANDAS_METADATA: &str = r#"{"index_columns": ["row_key"], "columns": [{"name": "value"}, {"name": "label"}, {"name": "row_key"}]}"#;
