//! Per-case activity counts, sequence lengths and trace counts.

use super::group::{aggregate_and_join, aggregate_mapping_and_join};
use crate::config::ColumnNames;
use crate::error::Result;
use crate::eventlog::require_column;
use polars::prelude::*;
use tracing::debug;

pub const SEQUENCE_LENGTH_COL: &str = "l";
const COUNT_PREFIX: &str = "Count";

/// Name of the column written by [`activity_count`].
pub fn count_column(activity: &str) -> String {
    format!("{COUNT_PREFIX} {activity}")
}

/// Rows of the group whose activity renders as `activity`. Integer activity
/// codes compare by their decimal text.
fn occurrences(activity_col: &str, activity: &str) -> Expr {
    col(activity_col)
        .cast(DataType::String)
        .eq(lit(activity))
        .cast(DataType::Int64)
        .sum()
}

/// Occurrences of `activity` in each case, on every row of the case as
/// `Count <activity>`. Cases without the activity get 0.
pub fn activity_count(
    log: DataFrame,
    activity: &str,
    columns: &ColumnNames,
) -> Result<DataFrame> {
    require_column(&log, &columns.activity)?;
    aggregate_and_join(
        log,
        &columns.case_id,
        occurrences(&columns.activity, activity),
        &count_column(activity),
    )
}

/// One `Count <activity>` column per distinct activity, in first-seen order.
pub fn activity_counts(log: DataFrame, columns: &ColumnNames) -> Result<DataFrame> {
    let acts = require_column(&log, &columns.activity)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let mut activities: Vec<String> = Vec::new();
    for a in acts.str()?.into_iter().flatten() {
        if !activities.iter().any(|x| x == a) {
            activities.push(a.to_string());
        }
    }
    debug!(activities = activities.len(), "counting all activities");
    let aggregates = activities
        .into_iter()
        .map(|a| {
            let agg = occurrences(&columns.activity, &a);
            (a, agg)
        })
        .collect();
    aggregate_mapping_and_join(log, &columns.case_id, aggregates, COUNT_PREFIX)
}

/// Drop every case with fewer than `min_count` occurrences of `activity`.
pub fn filter_by_activity_count(
    log: DataFrame,
    activity: &str,
    min_count: usize,
    columns: &ColumnNames,
) -> Result<DataFrame> {
    let name = count_column(activity);
    let counted = activity_count(log, activity, columns)?;
    let rows_before = counted.height();
    let kept = counted
        .lazy()
        .filter(col(name.as_str()).gt_eq(lit(min_count as i64)))
        .collect()?
        .drop(&name)?;
    debug!(
        activity,
        min_count,
        rows_before,
        rows_after = kept.height(),
        "filtered by activity count"
    );
    Ok(kept)
}

/// Add `l`, the number of events in the row's case.
pub fn sequence_length(log: DataFrame, columns: &ColumnNames) -> Result<DataFrame> {
    aggregate_and_join(
        log,
        &columns.case_id,
        len().cast(DataType::Int64),
        SEQUENCE_LENGTH_COL,
    )
}

/// Number of distinct case identifiers. Rows without a case id are not a
/// trace and are not counted.
pub fn trace_count(log: &DataFrame, columns: &ColumnNames) -> Result<usize> {
    let ids = require_column(log, &columns.case_id)?
        .as_materialized_series()
        .drop_nulls();
    Ok(ids.n_unique()?)
}
