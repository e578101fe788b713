//! Newline-delimited JSON event logs: one object per event, one event per line.

use super::{datetime_series, from_series};
use crate::config::ColumnNames;
use crate::error::{PrepError, Result};
use chrono::{DateTime, NaiveDateTime};
use polars::prelude::*;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::io::{BufRead, Write};

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

const WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Wall-clock time of an RFC 3339 or naive timestamp. Offsets are dropped,
/// not converted.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
}

/// Read an event log. Columns appear in first-seen key order; keys absent
/// from a line become missing cells.
pub fn read_ndjson<R: BufRead>(reader: R, columns: &ColumnNames) -> Result<DataFrame> {
    let mut names: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut cells: Vec<Vec<Value>> = Vec::new();
    let mut line_of_row: Vec<usize> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(trimmed).map_err(|e| PrepError::Parse {
            line: i + 1,
            message: e.to_string(),
        })?;
        let Value::Object(map) = value else {
            return Err(PrepError::Parse {
                line: i + 1,
                message: "expected a JSON object".to_string(),
            });
        };
        let rows = line_of_row.len();
        for (key, v) in map {
            let col = match index.get(&key) {
                Some(&c) => c,
                None => {
                    names.push(key.clone());
                    cells.push(vec![Value::Null; rows]);
                    index.insert(key, names.len() - 1);
                    names.len() - 1
                }
            };
            cells[col].push(v);
        }
        line_of_row.push(i + 1);
        for col in cells.iter_mut() {
            if col.len() < line_of_row.len() {
                col.push(Value::Null);
            }
        }
    }

    let built = names
        .into_iter()
        .zip(cells)
        .map(|(name, values)| -> Result<Series> {
            if name == columns.timestamp {
                timestamp_series(&name, &values, &line_of_row)
            } else {
                Ok(infer_series(&name, values))
            }
        })
        .collect::<Result<Vec<_>>>()?;
    from_series(built)
}

fn timestamp_series(name: &str, values: &[Value], line_of_row: &[usize]) -> Result<Series> {
    let mut parsed = Vec::with_capacity(values.len());
    for (row, v) in values.iter().enumerate() {
        let cell = match v {
            Value::Null => None,
            Value::String(s) => Some(parse_timestamp(s).ok_or_else(|| PrepError::Parse {
                line: line_of_row[row],
                message: format!("invalid timestamp '{s}'"),
            })?),
            other => {
                return Err(PrepError::Parse {
                    line: line_of_row[row],
                    message: format!("timestamp must be a string, got {other}"),
                })
            }
        };
        parsed.push(cell);
    }
    datetime_series(name, &parsed)
}

fn infer_series(name: &str, values: Vec<Value>) -> Series {
    let all_int = values.iter().all(|v| v.is_null() || v.as_i64().is_some());
    let all_number = values.iter().all(|v| v.is_null() || v.is_number());
    if all_int {
        let ints: Vec<Option<i64>> = values.iter().map(Value::as_i64).collect();
        Series::new(name.into(), ints)
    } else if all_number {
        let floats: Vec<Option<f64>> = values.iter().map(Value::as_f64).collect();
        Series::new(name.into(), floats)
    } else {
        let texts: Vec<Option<String>> = values
            .into_iter()
            .map(|v| match v {
                Value::Null => None,
                Value::String(s) => Some(s),
                other => Some(other.to_string()),
            })
            .collect();
        Series::new(name.into(), texts)
    }
}

fn datetime_json(t: i64, unit: TimeUnit) -> Value {
    let utc = match unit {
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(t)),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(t),
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(t),
    };
    utc.map(|t| Value::String(t.naive_utc().format(WRITE_FORMAT).to_string()))
        .unwrap_or(Value::Null)
}

fn float_json(x: f64) -> Value {
    serde_json::Number::from_f64(x)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn cell_json(cell: AnyValue<'_>) -> Value {
    match cell {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        AnyValue::Int32(x) => Value::from(x),
        AnyValue::Int64(x) => Value::from(x),
        AnyValue::UInt32(x) => Value::from(x),
        AnyValue::UInt64(x) => Value::from(x),
        AnyValue::Float32(x) => float_json(f64::from(x)),
        AnyValue::Float64(x) => float_json(x),
        AnyValue::Datetime(t, unit, _) => datetime_json(t, unit),
        other => Value::String(other.to_string()),
    }
}

/// Write one JSON object per row. Missing cells are written as null and
/// timestamps as naive ISO 8601.
pub fn write_ndjson<W: Write>(log: &DataFrame, writer: &mut W) -> Result<()> {
    let series: Vec<&Series> = log
        .get_columns()
        .iter()
        .map(Column::as_materialized_series)
        .collect();
    for row in 0..log.height() {
        let mut obj = Map::new();
        for s in &series {
            obj.insert(s.name().to_string(), cell_json(s.get(row)?));
        }
        serde_json::to_writer(&mut *writer, &Value::Object(obj))?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}
