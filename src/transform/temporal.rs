//! Calendar features from the timestamp column.

use crate::config::ColumnNames;
use crate::error::Result;
use crate::eventlog::require_datetime;
use polars::prelude::*;

pub const MONTH_COL: &str = "month";
pub const WEEKDAY_COL: &str = "weekday";
pub const HOUR_COL: &str = "hour";

/// Add `month` (1-12), `weekday` (0 = Monday .. 6 = Sunday) and `hour` (0-23).
/// Zoned timestamps use their wall-clock time.
pub fn time_attributes(log: DataFrame, columns: &ColumnNames) -> Result<DataFrame> {
    require_datetime(&log, &columns.timestamp)?;
    let ts = columns.timestamp.as_str();
    // polars numbers ISO weekdays from 1
    let weekday = col(ts).dt().weekday().cast(DataType::Int64) - lit(1i64);
    Ok(log
        .lazy()
        .with_columns([
            col(ts).dt().month().cast(DataType::Int64).alias(MONTH_COL),
            weekday.alias(WEEKDAY_COL),
            col(ts).dt().hour().cast(DataType::Int64).alias(HOUR_COL),
        ])
        .collect()?)
}
