//! Inter-event durations and their per-case cumulative and total sums.
//!
//! Rows of a case are taken in existing row order; timestamps are never
//! re-sorted. Out-of-order input produces negative durations.

use super::group::{aggregate_and_join, over_group};
use crate::config::ColumnNames;
use crate::error::{PrepError, Result};
use crate::eventlog::{contains, is_numeric, normalize_timestamps, require_column};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DURATION_COL: &str = "duration";
pub const CUMULATIVE_DURATION_COL: &str = "cumulative_duration";
pub const TOTAL_DURATION_COL: &str = "total_duration";

/// What to do with a `duration` column computed on the way to a derived column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationColumn {
    /// Keep it in the output
    #[default]
    Retain,
    /// Drop it again if this call computed it
    Temporary,
}

/// Seconds until the next event of the same case, stored on the earlier event.
/// The last event of each case gets a missing duration. An existing
/// `duration` column is reused as-is.
pub fn event_duration(log: DataFrame, columns: &ColumnNames) -> Result<DataFrame> {
    if contains(&log, DURATION_COL) {
        debug!("reusing existing duration column");
        return Ok(log);
    }
    require_column(&log, &columns.case_id)?;
    let log = normalize_timestamps(log, &columns.timestamp)?;

    let ts = columns.timestamp.as_str();
    let gap = (col(ts).shift(lit(-1)) - col(ts))
        .dt()
        .total_seconds()
        .cast(DataType::Int64);
    let log = log
        .lazy()
        .with_column(over_group(gap, &columns.case_id).alias(DURATION_COL))
        .collect()?;

    let negative = log
        .column(DURATION_COL)?
        .as_materialized_series()
        .i64()?
        .into_iter()
        .flatten()
        .filter(|&d| d < 0)
        .count();
    if negative > 0 {
        warn!(negative, "events out of chronological order within a case");
    }
    Ok(log)
}

/// Add `duration` if absent; reports whether it was computed here.
fn ensure_duration(log: DataFrame, columns: &ColumnNames) -> Result<(DataFrame, bool)> {
    let computed = !contains(&log, DURATION_COL);
    let log = event_duration(log, columns)?;
    let dtype = require_column(&log, DURATION_COL)?.dtype();
    if !is_numeric(dtype) {
        return Err(PrepError::type_mismatch(DURATION_COL, "numeric", dtype));
    }
    Ok((log, computed))
}

fn finish(log: DataFrame, computed: bool, intent: DurationColumn) -> Result<DataFrame> {
    if computed && intent == DurationColumn::Temporary {
        Ok(log.drop(DURATION_COL)?)
    } else {
        Ok(log)
    }
}

/// Per-case running sum of `duration` in row order. Missing durations stay
/// missing and are skipped by the sum.
pub fn cumulative_duration(
    log: DataFrame,
    columns: &ColumnNames,
    intent: DurationColumn,
) -> Result<DataFrame> {
    let (log, computed) = ensure_duration(log, columns)?;
    let running = over_group(col(DURATION_COL).cum_sum(false), &columns.case_id);
    let log = log
        .lazy()
        .with_column(running.alias(CUMULATIVE_DURATION_COL))
        .collect()?;
    finish(log, computed, intent)
}

/// Per-case sum of all durations, on every row of the case. A case without
/// any duration (a single event) totals zero.
pub fn total_duration(
    log: DataFrame,
    columns: &ColumnNames,
    intent: DurationColumn,
) -> Result<DataFrame> {
    let (log, computed) = ensure_duration(log, columns)?;
    let log = aggregate_and_join(
        log,
        &columns.case_id,
        col(DURATION_COL).sum(),
        TOTAL_DURATION_COL,
    )?;
    finish(log, computed, intent)
}
