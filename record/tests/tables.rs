use record::{Clip, ClockConverter, RecordError, RecordTable};

fn span_table(rows: &[(i64, i64)]) -> RecordTable {
    let mut table = RecordTable::new(vec!["callback_start_timestamp", "callback_end_timestamp"]);
    for (start, end) in rows {
        table
            .push_row(vec![Some(*start), Some(*end)])
            .expect("push row");
    }
    table
}

#[test]
fn push_row_rejects_wrong_arity() {
    let mut table = RecordTable::new(vec!["a", "b"]);
    let err = table.push_row(vec![Some(1)]).expect_err("arity mismatch");
    assert_eq!(
        err,
        RecordError::ColumnCountMismatch {
            expected: 2,
            got: 1
        }
    );
}

#[test]
fn column_values_extracts_dense_series() {
    let table = span_table(&[(10, 20), (30, 45)]);
    let starts = table
        .column_values("callback_start_timestamp")
        .expect("dense column");
    assert_eq!(starts, vec![10, 30]);
}

#[test]
fn column_values_fails_on_missing_value() {
    let mut table = RecordTable::new(vec!["ts", "latency"]);
    table.push_row(vec![Some(1), Some(5)]).expect("push row");
    table.push_row(vec![Some(2), None]).expect("push row");
    let err = table.column_values("latency").expect_err("missing value");
    assert_eq!(
        err,
        RecordError::MissingValue {
            column: "latency".to_string(),
            row: 1
        }
    );
}

#[test]
fn unknown_column_is_reported_by_name() {
    let table = span_table(&[(10, 20)]);
    let err = table.column_values("nope").expect_err("unknown column");
    assert_eq!(err, RecordError::UnknownColumn("nope".to_string()));
}

#[test]
fn clip_keeps_rows_inside_range_including_bounds() {
    let table = span_table(&[(5, 6), (10, 12), (20, 25), (31, 40)]);
    let clipped = Clip::new(10, 30).apply(&table);
    assert_eq!(clipped.len(), 2);
    assert_eq!(
        clipped.column_values("callback_start_timestamp").unwrap(),
        vec![10, 20]
    );
}

#[test]
fn clip_keeps_rows_with_missing_timestamp_for_the_consumer() {
    let mut table = RecordTable::new(vec!["ts", "end"]);
    table.push_row(vec![None, Some(15)]).expect("push row");
    let clipped = Clip::new(0, 10).apply(&table);
    assert_eq!(clipped.len(), 1);
    assert!(clipped.column_values("ts").is_err());
}

#[test]
fn clip_from_trimmed_frame_strips_both_ends() {
    let clip = Clip::from_trimmed_frame(1_000_000_000, 5_000_000_000, 1.0, 2.0);
    assert_eq!(clip.begin_ns(), 2_000_000_000);
    assert_eq!(clip.end_ns(), 3_000_000_000);
}

#[test]
fn clip_from_trimmed_frame_never_inverts() {
    let clip = Clip::from_trimmed_frame(0, 1_000_000_000, 2.0, 0.0);
    assert!(clip.begin_ns() <= clip.end_ns());
}

#[test]
fn clock_converter_is_linear() {
    let converter = ClockConverter::new(2.0, 100.0);
    assert_eq!(converter.convert(10), 120.0);
}

#[test]
fn tables_round_trip_through_serde() {
    let table = span_table(&[(10, 20)]);
    let json = serde_json::to_string(&table).expect("serialize");
    let back: RecordTable = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back.len(), 1);
    assert_eq!(back.columns(), table.columns());
}
