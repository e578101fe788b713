//! Event logs as polars data frames: one row per event, rows kept in occurrence order.

mod ndjson;

pub use ndjson::{read_ndjson, write_ndjson};

use crate::error::{PrepError, Result};
use chrono::NaiveDateTime;
use polars::prelude::*;
use std::collections::HashSet;

/// Timestamps are stored at microsecond precision.
pub const TIME_UNIT: TimeUnit = TimeUnit::Microseconds;

/// Build a log from equal-length series. Names must be unique.
pub fn from_series(columns: Vec<Series>) -> Result<DataFrame> {
    let mut seen = HashSet::new();
    for s in &columns {
        if !seen.insert(s.name().as_str()) {
            return Err(PrepError::DuplicateColumn(s.name().to_string()));
        }
    }
    Ok(DataFrame::new(columns.into_iter().map(Column::from).collect())?)
}

/// Naive timestamp series from wall-clock date-times.
pub fn datetime_series(name: &str, values: &[Option<NaiveDateTime>]) -> Result<Series> {
    let micros: Vec<Option<i64>> = values
        .iter()
        .map(|t| t.map(|t| t.and_utc().timestamp_micros()))
        .collect();
    Ok(Series::new(name.into(), micros).cast(&DataType::Datetime(TIME_UNIT, None))?)
}

pub(crate) fn datetime_lit(t: NaiveDateTime) -> Expr {
    lit(t.and_utc().timestamp_micros()).cast(DataType::Datetime(TIME_UNIT, None))
}

pub fn contains(log: &DataFrame, name: &str) -> bool {
    log.get_column_index(name).is_some()
}

pub fn require_column<'a>(log: &'a DataFrame, name: &str) -> Result<&'a Column> {
    match log.get_column_index(name) {
        Some(i) => Ok(&log.get_columns()[i]),
        None => Err(PrepError::MissingColumn(name.to_string())),
    }
}

pub fn require_datetime<'a>(log: &'a DataFrame, name: &str) -> Result<&'a Column> {
    let column = require_column(log, name)?;
    match column.dtype() {
        DataType::Datetime(_, _) => Ok(column),
        other => Err(PrepError::type_mismatch(name, "datetime", other)),
    }
}

pub fn is_integer(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int32 | DataType::Int64 | DataType::UInt32 | DataType::UInt64
    )
}

pub fn is_numeric(dtype: &DataType) -> bool {
    is_integer(dtype) || matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Drop the time zone of a timestamp column, keeping wall-clock time.
pub fn normalize_timestamps(log: DataFrame, name: &str) -> Result<DataFrame> {
    let zoned = matches!(
        require_datetime(&log, name)?.dtype(),
        DataType::Datetime(_, Some(_))
    );
    if !zoned {
        return Ok(log);
    }
    let naive = col(name).dt().replace_time_zone(None, lit("raise"), NonExistent::Raise);
    Ok(log.lazy().with_column(naive).collect()?)
}

pub fn drop_columns<S: AsRef<str>>(log: DataFrame, names: &[S]) -> Result<DataFrame> {
    let mut log = log;
    for name in names {
        let name = name.as_ref();
        require_column(&log, name)?;
        log = log.drop(name)?;
    }
    Ok(log)
}

/// Fill missing cells (and NaN) of a numeric column. An integer column stays
/// integer when `value` is integral.
pub fn fill_missing(log: DataFrame, name: &str, value: f64) -> Result<DataFrame> {
    let dtype = require_column(&log, name)?.dtype().clone();
    let filled = match dtype {
        DataType::Float32 | DataType::Float64 => {
            col(name).fill_nan(lit(value)).fill_null(lit(value))
        }
        ref d if is_integer(d) && value.fract() == 0.0 => col(name)
            .cast(DataType::Int64)
            .fill_null(lit(value as i64)),
        ref d if is_integer(d) => col(name).cast(DataType::Float64).fill_null(lit(value)),
        other => return Err(PrepError::type_mismatch(name, "numeric", &other)),
    };
    Ok(log.lazy().with_column(filled).collect()?)
}
