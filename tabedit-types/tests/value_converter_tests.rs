use tabedit_types::{
    CellValue, ColumnDescriptor, Semantic, StorageType, TimeUnit, parse_cell, render_cell,
};

#[test]
fn timestamps_render_with_nine_fractional_digits_for_every_unit() {
    let value_nanos = 1_755_126_458_027_512_000i64;
    let cases = [
        (TimeUnit::Nanos, value_nanos),
        (TimeUnit::Micros, value_nanos / 1_000),
        (TimeUnit::Millis, 1_755_126_458_027i64),
    ];
    let expected = [
        "2025-08-13 23:07:38.027512000",
        "2025-08-13 23:07:38.027512000",
        "2025-08-13 23:07:38.027000000",
    ];

    for ((unit, raw), text) in cases.into_iter().zip(expected) {
        let column = ColumnDescriptor::timestamp("ts", unit);
        assert_eq!(render_cell(&CellValue::Int64(raw), &column), text);
        assert_eq!(parse_cell(text, &column, 1).unwrap(), CellValue::Int64(raw));
    }
}

#[test]
fn sub_unit_precision_is_a_conversion_error() {
    let column = ColumnDescriptor::timestamp("ts", TimeUnit::Millis);
    assert!(parse_cell("2025-08-13 23:07:38.027512000", &column, 5).is_err());
}

#[test]
fn utc_adjusted_timestamps_use_the_same_text() {
    let column = ColumnDescriptor::new("ts", StorageType::Int64).with_semantic(
        Semantic::Timestamp {
            unit: TimeUnit::Nanos,
            utc_adjusted: true,
        },
    );
    assert_eq!(
        render_cell(&CellValue::Int64(0), &column),
        "1970-01-01 00:00:00.000000000"
    );
    assert_eq!(
        parse_cell("1969-12-31 23:59:59.999999999", &column, 1).unwrap(),
        CellValue::Int64(-1)
    );
}

#[test]
fn error_message_points_at_the_cell() {
    let column = ColumnDescriptor::date("born");
    let err = parse_cell("2025-13-01", &column, 7).unwrap_err();
    assert_eq!(
        err.to_string(),
        "field 'born' at row 7: cannot convert \"2025-13-01\" to Date (YYYY-MM-DD)"
    );
}
