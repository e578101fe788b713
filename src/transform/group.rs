//! Per-group aggregates joined back onto every row of the log.
//!
//! Aggregates are polars expressions evaluated as window functions over the
//! group column, so row count and row order never change.

use crate::error::Result;
use crate::eventlog::require_column;
use polars::prelude::*;

/// Evaluate `expr` within each group of `group_col` and map it back to rows.
/// Rows with a missing key get null instead of forming their own group.
pub fn over_group(expr: Expr, group_col: &str) -> Expr {
    when(col(group_col).is_not_null())
        .then(expr.over([col(group_col)]))
        .otherwise(lit(NULL))
}

/// Compute `aggregate` per group of `group_col` and attach it to every row
/// as `output_name`. An existing column of that name is replaced.
pub fn aggregate_and_join(
    log: DataFrame,
    group_col: &str,
    aggregate: Expr,
    output_name: &str,
) -> Result<DataFrame> {
    require_column(&log, group_col)?;
    Ok(log
        .lazy()
        .with_column(over_group(aggregate, group_col).alias(output_name))
        .collect()?)
}

/// Like [`aggregate_and_join`], but with one aggregate per key. Each becomes
/// a column `"<output_name> <key>"`, in the given order.
pub fn aggregate_mapping_and_join<K: AsRef<str>>(
    log: DataFrame,
    group_col: &str,
    aggregates: Vec<(K, Expr)>,
    output_name: &str,
) -> Result<DataFrame> {
    require_column(&log, group_col)?;
    if aggregates.is_empty() {
        return Ok(log);
    }
    let exprs: Vec<Expr> = aggregates
        .into_iter()
        .map(|(key, agg)| {
            over_group(agg, group_col).alias(format!("{output_name} {}", key.as_ref()))
        })
        .collect();
    Ok(log.lazy().with_columns(exprs).collect()?)
}
