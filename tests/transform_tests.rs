//! Transformation behavior on small hand-built logs.

mod common;

use common::*;
use eventlog_prep::config::ColumnNames;
use eventlog_prep::eventlog::{datetime_series, from_series, TIME_UNIT};
use eventlog_prep::transform::{self, ColumnSelection, DurationColumn};
use eventlog_prep::PrepError;
use polars::prelude::*;

fn cols() -> ColumnNames {
    ColumnNames::default()
}

#[test]
fn aggregate_join_keeps_rows_and_order() {
    let log = log_of(&[("B", "X", 0), ("A", "X", 1), ("B", "Y", 2), ("A", "Z", 3)]);
    let out = transform::aggregate_and_join(
        log.clone(),
        "case:concept:name",
        col("concept:name").first(),
        "first",
    )
    .unwrap();
    assert_eq!(out.height(), 4);
    assert_eq!(texts(&out, "concept:name"), texts(&log, "concept:name"));
    assert_eq!(texts(&out, "first"), strs(&["X", "X", "X", "X"]));

    let out = transform::aggregate_and_join(
        log,
        "case:concept:name",
        col("concept:name").last(),
        "last",
    )
    .unwrap();
    assert_eq!(texts(&out, "last"), strs(&["Y", "Z", "Y", "Z"]));
}

#[test]
fn aggregate_join_missing_key_gives_missing_value() {
    let log = from_series(vec![
        Series::new("case:concept:name".into(), &[Some("A"), None, Some("A")]),
        Series::new("v".into(), &[1i64, 2, 3]),
    ])
    .unwrap();
    let out = transform::aggregate_and_join(
        log,
        "case:concept:name",
        len().cast(DataType::Int64),
        "n",
    )
    .unwrap();
    assert_eq!(ints(&out, "n"), vec![Some(2), None, Some(2)]);
}

#[test]
fn aggregate_mapping_names_columns_by_key() {
    let out = transform::aggregate_mapping_and_join(
        two_case_log(),
        "case:concept:name",
        vec![
            ("events", len().cast(DataType::Int64)),
            ("x", col("concept:name").eq(lit("X")).cast(DataType::Int64).sum()),
        ],
        "per case",
    )
    .unwrap();
    assert_eq!(ints(&out, "per case events"), vec![Some(2), Some(2), Some(1)]);
    assert_eq!(ints(&out, "per case x"), vec![Some(1), Some(1), Some(1)]);
}

#[test]
fn event_duration_scenario() {
    let out = transform::event_duration(two_case_log(), &cols()).unwrap();
    assert_eq!(ints(&out, "duration"), vec![Some(10), None, None]);
    assert_eq!(out.height(), 3);
}

#[test]
fn event_duration_uses_total_seconds_across_days() {
    let log = log_of(&[("A", "X", 0), ("A", "Y", 90_000)]);
    let out = transform::event_duration(log, &cols()).unwrap();
    assert_eq!(ints(&out, "duration"), vec![Some(90_000), None]);
}

#[test]
fn event_duration_trusts_row_order() {
    // Rows out of chronological order are not re-sorted.
    let log = log_of(&[("A", "X", 20), ("A", "Y", 5)]);
    let out = transform::event_duration(log, &cols()).unwrap();
    assert_eq!(ints(&out, "duration"), vec![Some(-15), None]);
}

#[test]
fn event_duration_on_interleaved_cases() {
    let log = log_of(&[("A", "X", 0), ("B", "X", 100), ("A", "Y", 30), ("B", "Y", 160)]);
    let out = transform::event_duration(log, &cols()).unwrap();
    assert_eq!(ints(&out, "duration"), vec![Some(30), Some(60), None, None]);
}

#[test]
fn event_duration_rejects_text_timestamps() {
    let log = from_series(vec![
        Series::new("case:concept:name".into(), &["A"]),
        Series::new("time:timestamp".into(), &["yesterday"]),
    ])
    .unwrap();
    let err = transform::event_duration(log, &cols()).unwrap_err();
    assert!(matches!(err, PrepError::TypeMismatch { .. }));
}

#[test]
fn event_duration_missing_timestamp_column() {
    let log = from_series(vec![Series::new("case:concept:name".into(), &["A"])]).unwrap();
    let err = transform::event_duration(log, &cols()).unwrap_err();
    assert_eq!(err.to_string(), "missing column: time:timestamp");
}

#[test]
fn zoned_timestamps_keep_wall_clock() {
    let naive = datetime_series("time:timestamp", &[Some(at(36_000)), Some(at(36_300))]).unwrap();
    let zoned = naive
        .cast(&DataType::Int64)
        .unwrap()
        .cast(&DataType::Datetime(TIME_UNIT, Some("UTC".into())))
        .unwrap();
    let log = from_series(vec![
        Series::new("case:concept:name".into(), &["A", "A"]),
        zoned,
    ])
    .unwrap();
    let out = transform::event_duration(log, &cols()).unwrap();
    assert_eq!(ints(&out, "duration"), vec![Some(300), None]);
    assert_eq!(
        out.column("time:timestamp").unwrap().dtype(),
        &DataType::Datetime(TIME_UNIT, None)
    );
    let attrs = transform::time_attributes(out, &cols()).unwrap();
    assert_eq!(ints(&attrs, "hour"), vec![Some(10), Some(10)]);
}

#[test]
fn cumulative_duration_is_idempotent() {
    let log = log_of(&[("A", "X", 0), ("A", "Y", 10), ("A", "Z", 25), ("B", "X", 0)]);
    let direct =
        transform::cumulative_duration(log.clone(), &cols(), DurationColumn::Retain).unwrap();
    let staged = transform::cumulative_duration(
        transform::event_duration(log, &cols()).unwrap(),
        &cols(),
        DurationColumn::Retain,
    )
    .unwrap();
    assert!(direct.equals_missing(&staged));
    assert_eq!(
        ints(&direct, "cumulative_duration"),
        vec![Some(10), Some(25), None, None]
    );
    assert_eq!(names(&direct).iter().filter(|n| *n == "duration").count(), 1);
}

#[test]
fn temporary_duration_is_dropped() {
    let log = two_case_log();
    let width = log.width();
    let out = transform::total_duration(log, &cols(), DurationColumn::Temporary).unwrap();
    assert!(!has(&out, "duration"));
    assert_eq!(out.width(), width + 1);
    assert_eq!(ints(&out, "total_duration"), vec![Some(10), Some(10), Some(0)]);

    let out = transform::cumulative_duration(two_case_log(), &cols(), DurationColumn::Temporary)
        .unwrap();
    assert!(!has(&out, "duration"));
    assert!(has(&out, "cumulative_duration"));
}

#[test]
fn temporary_keeps_existing_duration() {
    let log = transform::event_duration(two_case_log(), &cols()).unwrap();
    let out = transform::total_duration(log, &cols(), DurationColumn::Temporary).unwrap();
    assert!(has(&out, "duration"));
}

#[test]
fn existing_duration_is_reused() {
    let log = with(
        two_case_log(),
        Series::new("duration".into(), &[Some(1.5), Some(2.5), None]),
    );
    let out = transform::total_duration(log, &cols(), DurationColumn::Retain).unwrap();
    assert_eq!(
        floats(&out, "total_duration"),
        vec![Some(4.0), Some(4.0), Some(0.0)]
    );
    assert_eq!(floats(&out, "duration"), vec![Some(1.5), Some(2.5), None]);
}

#[test]
fn time_attributes_calendar_fields() {
    // 2024-03-04 is a Monday.
    let log = log_of(&[("A", "X", 0), ("A", "Y", 6 * 86_400 + 23 * 3600)]);
    let out = transform::time_attributes(log, &cols()).unwrap();
    assert_eq!(ints(&out, "month"), vec![Some(3), Some(3)]);
    assert_eq!(ints(&out, "weekday"), vec![Some(0), Some(6)]);
    assert_eq!(ints(&out, "hour"), vec![Some(0), Some(23)]);
}

#[test]
fn activity_count_scenario() {
    let out = transform::activity_count(two_case_log(), "X", &cols()).unwrap();
    assert_eq!(ints(&out, "Count X"), vec![Some(1), Some(1), Some(1)]);

    let out = transform::activity_count(two_case_log(), "Y", &cols()).unwrap();
    assert_eq!(ints(&out, "Count Y"), vec![Some(1), Some(1), Some(0)]);
}

#[test]
fn activity_count_matches_per_case_occurrences() {
    let log = log_of(&[
        ("A", "X", 0),
        ("B", "X", 1),
        ("A", "X", 2),
        ("C", "Y", 3),
        ("A", "Y", 4),
    ]);
    let out = transform::activity_count(log, "X", &cols()).unwrap();
    assert_eq!(
        ints(&out, "Count X"),
        vec![Some(2), Some(1), Some(2), Some(0), Some(2)]
    );
}

#[test]
fn activity_counts_adds_one_column_per_activity() {
    let out = transform::activity_counts(two_case_log(), &cols()).unwrap();
    assert_eq!(ints(&out, "Count X"), vec![Some(1), Some(1), Some(1)]);
    assert_eq!(ints(&out, "Count Y"), vec![Some(1), Some(1), Some(0)]);
    assert_eq!(out.width(), 5);
}

#[test]
fn activity_counts_accept_integer_codes() {
    let log = with(
        two_case_log(),
        Series::new("concept:name".into(), &[7i64, 8, 7]),
    );
    let out = transform::activity_count(log.clone(), "7", &cols()).unwrap();
    assert_eq!(ints(&out, "Count 7"), vec![Some(1), Some(1), Some(1)]);

    let out = transform::activity_counts(log, &cols()).unwrap();
    assert_eq!(ints(&out, "Count 8"), vec![Some(1), Some(1), Some(0)]);
}

#[test]
fn filter_by_activity_count_scenario() {
    let out = transform::filter_by_activity_count(two_case_log(), "X", 1, &cols()).unwrap();
    assert!(out.equals_missing(&two_case_log()));

    let out = transform::filter_by_activity_count(two_case_log(), "X", 2, &cols()).unwrap();
    assert_eq!(out.height(), 0);
    assert!(!has(&out, "Count X"));
}

#[test]
fn filter_by_activity_count_drops_whole_cases() {
    let out = transform::filter_by_activity_count(two_case_log(), "Y", 1, &cols()).unwrap();
    assert_eq!(texts(&out, "case:concept:name"), strs(&["A", "A"]));
}

#[test]
fn sequence_length_scenario() {
    let out = transform::sequence_length(two_case_log(), &cols()).unwrap();
    assert_eq!(ints(&out, "l"), vec![Some(2), Some(2), Some(1)]);
}

#[test]
fn trace_count_counts_distinct_cases() {
    let log = log_of(&[("A", "X", 0), ("B", "X", 1), ("A", "Y", 2), ("C", "X", 3)]);
    assert_eq!(transform::trace_count(&log, &cols()).unwrap(), 3);
}

#[test]
fn trace_count_skips_missing_case_ids() {
    let log = from_series(vec![Series::new(
        "case:concept:name".into(),
        &[Some("A"), None, Some("B"), None],
    )])
    .unwrap();
    assert_eq!(transform::trace_count(&log, &cols()).unwrap(), 2);
}

#[test]
fn time_window_keeps_whole_cases() {
    let log = log_of(&[
        ("A", "X", 0),
        ("A", "Y", 500),
        ("B", "X", 1000),
        ("B", "Y", 1100),
        ("C", "X", 50),
    ]);
    let out = transform::filter_by_time_window(log, at(400), at(600), &cols()).unwrap();
    assert_eq!(texts(&out, "case:concept:name"), strs(&["A", "A"]));
    assert_eq!(
        out.column("time:timestamp").unwrap().dtype(),
        &DataType::Datetime(TIME_UNIT, None)
    );
}

#[test]
fn time_window_keeps_case_spanning_the_window() {
    // A starts before and ends after the window with no event inside it.
    let log = log_of(&[("A", "X", 0), ("A", "Y", 1000), ("B", "X", 500), ("C", "X", 700)]);
    let out = transform::filter_by_time_window(log, at(400), at(600), &cols()).unwrap();
    assert_eq!(texts(&out, "case:concept:name"), strs(&["A", "A", "B"]));
}

#[test]
fn time_window_bounds_are_inclusive() {
    let log = log_of(&[("A", "X", 100), ("B", "X", 200), ("C", "X", 201)]);
    let out = transform::filter_by_time_window(log, at(100), at(200), &cols()).unwrap();
    assert_eq!(texts(&out, "case:concept:name"), strs(&["A", "B"]));
}

#[test]
fn one_hot_explicit_scenario() {
    let log = log_of(&[("A", "X", 0), ("A", "Y", 10), ("B", "X", 0)]);
    let selection = ColumnSelection::Explicit(vec!["concept:name".to_string()]);
    let out = transform::one_hot_encode(log, &cols(), &selection).unwrap();
    assert_eq!(
        names(&out),
        vec![
            "case:concept:name",
            "time:timestamp",
            "concept:name_X",
            "concept:name_Y"
        ]
    );
    let x = ints(&out, "concept:name_X");
    let y = ints(&out, "concept:name_Y");
    for (a, b) in x.iter().zip(&y) {
        assert_eq!(a.unwrap() + b.unwrap(), 1);
    }
    assert_eq!(x, vec![Some(1), Some(0), Some(1)]);
}

#[test]
fn one_hot_all_excludes_case_and_timestamp() {
    let log = with(
        two_case_log(),
        Series::new("org:resource".into(), &["r1", "r2", "r1"]),
    );
    let log = with(log, Series::new("cost".into(), &[3i64, 4, 5]));
    let out = transform::one_hot_encode(log, &cols(), &ColumnSelection::All).unwrap();
    assert_eq!(
        names(&out),
        vec![
            "case:concept:name",
            "time:timestamp",
            "concept:name_X",
            "concept:name_Y",
            "org:resource_r1",
            "org:resource_r2",
            "cost"
        ]
    );
}

#[test]
fn one_hot_prefix_always_adds_resource_and_activity() {
    let log = with(
        two_case_log(),
        Series::new("org:resource".into(), &[Some("r1"), None, Some("r1")]),
    );
    let log = with(
        log,
        Series::new("case:channel".into(), &["web", "web", "mail"]),
    );
    let selection = ColumnSelection::Prefix("case:".to_string());
    let out = transform::one_hot_encode(log, &cols(), &selection).unwrap();
    assert!(has(&out, "case:concept:name"));
    assert!(has(&out, "case:channel_mail"));
    assert!(has(&out, "concept:name_X"));
    assert_eq!(ints(&out, "org:resource_r1"), vec![Some(1), Some(0), Some(1)]);
}

#[test]
fn one_hot_missing_resource_is_reported() {
    let err =
        transform::one_hot_encode(two_case_log(), &cols(), &ColumnSelection::All).unwrap_err();
    assert_eq!(err.to_string(), "missing column: org:resource");
}

#[test]
fn one_hot_name_clash_is_reported() {
    let log = with(
        two_case_log(),
        Series::new("concept:name_X".into(), &[1i64, 2, 3]),
    );
    let selection = ColumnSelection::Explicit(vec!["concept:name".to_string()]);
    let err = transform::one_hot_encode(log, &cols(), &selection).unwrap_err();
    assert!(matches!(
        err,
        PrepError::EncodedNameClash { ref encoded, ref from_column }
            if encoded == "concept:name_X" && from_column == "concept:name"
    ));
}

#[test]
fn scaled_columns_have_zero_mean_unit_std() {
    let log = with(
        two_case_log(),
        Series::new("a".into(), &[1.0f64, 5.0, 9.0]),
    );
    let log = with(log, Series::new("b".into(), &[10i64, -2, 4]));
    let out = transform::scale_features(log, &["a", "b"]).unwrap();
    for name in ["a", "b"] {
        let v: Vec<f64> = floats(&out, name).into_iter().flatten().collect();
        let n = v.len() as f64;
        let mean = v.iter().sum::<f64>() / n;
        let std = (v.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt();
        assert!(mean.abs() < 1e-9, "{name} mean {mean}");
        assert!((std - 1.0).abs() < 1e-9, "{name} std {std}");
    }
    assert_eq!(floats(&out, "a"), vec![Some(-1.0), Some(0.0), Some(1.0)]);
}

#[test]
fn scaling_constant_column_is_not_finite() {
    let log = with(
        two_case_log(),
        Series::new("c".into(), &[Some(2.0f64), Some(2.0), None]),
    );
    let out = transform::scale_features(log, &["c"]).unwrap();
    let v = floats(&out, "c");
    assert!(v[0].is_some_and(f64::is_nan));
    assert!(v[2].is_none());
}

#[test]
fn scaling_text_column_is_type_error() {
    let err = transform::scale_features(two_case_log(), &["concept:name"]).unwrap_err();
    assert!(matches!(err, PrepError::TypeMismatch { .. }));
}
