//! Case-level time window filter.

use super::activity::trace_count;
use crate::config::ColumnNames;
use crate::error::Result;
use crate::eventlog::{datetime_lit, normalize_timestamps, require_column};
use chrono::NaiveDateTime;
use polars::prelude::*;
use tracing::debug;

/// Keep every case whose span, from its earliest to its latest event,
/// intersects `[start, end]` (inclusive). That covers a case starting or
/// ending inside the window as well as one running across it. Cases are
/// kept or dropped whole; the timestamp column comes back timezone-naive.
pub fn filter_by_time_window(
    log: DataFrame,
    start: NaiveDateTime,
    end: NaiveDateTime,
    columns: &ColumnNames,
) -> Result<DataFrame> {
    require_column(&log, &columns.case_id)?;
    let log = normalize_timestamps(log, &columns.timestamp)?;
    let cases_before = trace_count(&log, columns)?;

    let case = col(columns.case_id.as_str());
    let ts = columns.timestamp.as_str();
    let first = col(ts).min().over([case.clone()]);
    let last = col(ts).max().over([case.clone()]);
    let intersects = case
        .is_not_null()
        .and(first.lt_eq(datetime_lit(end)))
        .and(last.gt_eq(datetime_lit(start)));

    let kept = log.lazy().filter(intersects).collect()?;
    debug!(
        cases_before,
        cases_after = trace_count(&kept, columns)?,
        "time window filter"
    );
    Ok(kept)
}
