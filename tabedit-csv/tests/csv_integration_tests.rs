use std::io::Write;
use tempfile::NamedTempFile;

use tabedit_csv::{CsvReader, CsvWriter, infer_schema};
use tabedit_test_utils::init_tracing_for_tests;
use tabedit_types::{ColumnDescriptor, Row, Schema, StorageType, parse_cell};

#[test]
fn integration_infer_schema_from_file() {
    init_tracing_for_tests();

    let mut tmp = NamedTempFile::new().expect("create tmp");
    writeln!(tmp, "id,price,flag,note,mixed").unwrap();
    writeln!(tmp, "1,3.14,true,,true").unwrap();
    writeln!(tmp, "2,2,false,,1").unwrap();
    writeln!(tmp, "3,2.71,T,,nope").unwrap();

    let schema = CsvReader::default().infer_schema(tmp.path()).expect("infer");

    let storage: Vec<_> = schema.columns().iter().map(|c| c.storage).collect();
    assert_eq!(
        storage,
        vec![
            StorageType::Int64,
            StorageType::Float64,
            StorageType::Boolean,
            StorageType::ByteString,
            StorageType::ByteString,
        ]
    );
}

#[test]
fn dropped_rows_do_not_shift_row_numbers() {
    init_tracing_for_tests();

    let table = CsvReader::default()
        .read_from("name,age\nAlice,25\nstray\nBob,thirty\n".as_bytes())
        .unwrap();
    let schema = Schema::new(vec![
        ColumnDescriptor::new("name", StorageType::ByteString),
        ColumnDescriptor::new("age", StorageType::Int64),
    ]);

    // Row numbers count kept data rows only.
    let failure = table
        .records()
        .iter()
        .enumerate()
        .find_map(|(idx, record)| parse_cell(&record[1], &schema.columns()[1], idx + 1).err())
        .expect("conversion failure");
    assert_eq!(
        failure.to_string(),
        "field 'age' at row 2: cannot convert \"thirty\" to Int64"
    );
}

#[test]
fn written_text_reads_back_with_the_same_cells() {
    init_tracing_for_tests();

    let table = CsvReader::default()
        .read_from("word,n\n\"a \"\"quoted\"\" word\",1\n\"multi\nline\",2\n".as_bytes())
        .unwrap();
    let schema = infer_schema(&table).unwrap();
    let rows: Vec<Row> = table.provisional_rows().collect();

    let mut out = Vec::new();
    CsvWriter::default()
        .write_rows(&mut out, &schema, rows.into_iter().map(Ok))
        .unwrap();

    let reread = CsvReader::default().read_from(out.as_slice()).unwrap();
    assert_eq!(reread, table);
}
