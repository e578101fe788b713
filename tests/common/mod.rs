//! Shared fixtures: small event logs built from (case, activity, seconds) triples.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use eventlog_prep::config::ColumnNames;
use eventlog_prep::eventlog::{datetime_series, from_series};
use polars::prelude::*;

pub fn at(secs: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 4)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + chrono::Duration::seconds(secs)
}

/// Log with the default case/activity/timestamp columns.
pub fn log_of(events: &[(&str, &str, i64)]) -> DataFrame {
    let cols = ColumnNames::default();
    let cases: Vec<&str> = events.iter().map(|e| e.0).collect();
    let acts: Vec<&str> = events.iter().map(|e| e.1).collect();
    let ts: Vec<Option<NaiveDateTime>> = events.iter().map(|e| Some(at(e.2))).collect();
    from_series(vec![
        Series::new(cols.case_id.as_str().into(), cases),
        Series::new(cols.activity.as_str().into(), acts),
        datetime_series(&cols.timestamp, &ts).unwrap(),
    ])
    .unwrap()
}

/// Case A: X at 0s, Y at 10s. Case B: X at 0s.
pub fn two_case_log() -> DataFrame {
    log_of(&[("A", "X", 0), ("A", "Y", 10), ("B", "X", 0)])
}

/// Append or replace a column.
pub fn with(log: DataFrame, column: Series) -> DataFrame {
    let mut log = log;
    log.with_column(column).unwrap();
    log
}

pub fn names(log: &DataFrame) -> Vec<String> {
    log.get_column_names()
        .into_iter()
        .map(|n| n.to_string())
        .collect()
}

pub fn has(log: &DataFrame, name: &str) -> bool {
    log.get_column_index(name).is_some()
}

fn series<'a>(log: &'a DataFrame, name: &str) -> &'a Series {
    log.column(name).unwrap().as_materialized_series()
}

pub fn ints(log: &DataFrame, name: &str) -> Vec<Option<i64>> {
    series(log, name).i64().unwrap().into_iter().collect()
}

pub fn floats(log: &DataFrame, name: &str) -> Vec<Option<f64>> {
    let values = series(log, name).cast(&DataType::Float64).unwrap();
    values.f64().unwrap().into_iter().collect()
}

pub fn texts(log: &DataFrame, name: &str) -> Vec<Option<String>> {
    series(log, name)
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(String::from))
        .collect()
}

pub fn strs(values: &[&str]) -> Vec<Option<String>> {
    values.iter().map(|v| Some(v.to_string())).collect()
}
