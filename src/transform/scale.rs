//! Z-score standardization of numeric columns over the whole log.

use crate::error::{PrepError, Result};
use crate::eventlog::{is_numeric, require_column};
use polars::prelude::*;
use tracing::warn;

/// Replace each listed column with `(x - mean) / std`, using the sample
/// standard deviation. Missing cells stay missing and do not count. A
/// constant column yields NaN or infinite values.
pub fn scale_features<S: AsRef<str>>(log: DataFrame, numeric_cols: &[S]) -> Result<DataFrame> {
    let mut log = log;
    for name in numeric_cols {
        let name = name.as_ref();
        let series = require_column(&log, name)?.as_materialized_series();
        if !is_numeric(series.dtype()) {
            return Err(PrepError::type_mismatch(name, "numeric", series.dtype()));
        }
        let mean = series.mean().unwrap_or(f64::NAN);
        let std = series.std(1).unwrap_or(f64::NAN);
        if !(std.is_finite() && std > 0.0) {
            warn!(column = name, std, "zero or undefined variance; scaled values are not finite");
        }
        let scaled = (col(name).cast(DataType::Float64) - lit(mean)) / lit(std);
        log = log.lazy().with_column(scaled.alias(name)).collect()?;
    }
    Ok(log)
}
