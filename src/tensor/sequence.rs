//! Padded (l, n, k) tensor for recurrent sequence models.
//!
//! l = longest case, n = number of cases, k = feature columns. Cases appear
//! in first-seen order; positions past a case's end are zero.

use crate::error::{PrepError, Result};
use crate::eventlog::{is_numeric, require_column};
use ndarray::Array3;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceTensor {
    /// Case identifiers, indexed by the second axis
    pub case_ids: Vec<String>,
    /// Feature names, indexed by the third axis
    pub features: Vec<String>,
    /// True length of each case
    pub lengths: Vec<usize>,
    pub data: Array3<f64>,
}

impl SequenceTensor {
    /// (l, n, k)
    pub fn shape(&self) -> (usize, usize, usize) {
        self.data.dim()
    }
}

/// Row indices of each case in first-seen order. Rows without a case id
/// belong to no case.
fn case_rows(log: &DataFrame, case_col: &str) -> Result<(Vec<String>, Vec<Vec<usize>>)> {
    let ids = require_column(log, case_col)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let mut lookup: HashMap<&str, usize> = HashMap::new();
    let mut keys: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<usize>> = Vec::new();
    for (r, id) in ids.str()?.into_iter().enumerate() {
        let Some(id) = id else { continue };
        let case = *lookup.entry(id).or_insert_with(|| {
            keys.push(id.to_string());
            rows.push(Vec::new());
            keys.len() - 1
        });
        rows[case].push(r);
    }
    Ok((keys, rows))
}

/// Reshape the log into an (l, n, k) tensor. Every column other than
/// `case_col` must be numeric; missing cells become NaN.
pub fn to_sequence_tensor(log: &DataFrame, case_col: &str) -> Result<SequenceTensor> {
    to_sequence_tensor_bounded(log, case_col, None)
}

/// As [`to_sequence_tensor`], refusing to allocate more than `max_elements`.
pub fn to_sequence_tensor_bounded(
    log: &DataFrame,
    case_col: &str,
    max_elements: Option<usize>,
) -> Result<SequenceTensor> {
    let (case_ids, rows) = case_rows(log, case_col)?;
    let features: Vec<&Column> = log
        .get_columns()
        .iter()
        .filter(|c| c.name().as_str() != case_col)
        .collect();
    if let Some(bad) = features.iter().find(|c| !is_numeric(c.dtype())) {
        return Err(PrepError::type_mismatch(
            bad.name().as_str(),
            "numeric",
            bad.dtype(),
        ));
    }

    let l = rows.iter().map(Vec::len).max().unwrap_or(0);
    let (n, k) = (case_ids.len(), features.len());
    if let Some(limit) = max_elements {
        let total = l.checked_mul(n).and_then(|x| x.checked_mul(k));
        if total.map_or(true, |t| t > limit) {
            return Err(PrepError::TensorTooLarge { l, n, k, limit });
        }
    }

    let mut data = Array3::<f64>::zeros((l, n, k));
    for (f, column) in features.iter().enumerate() {
        let values = column.as_materialized_series().cast(&DataType::Float64)?;
        let values = values.f64()?;
        for (case, case_rows) in rows.iter().enumerate() {
            for (pos, &r) in case_rows.iter().enumerate() {
                data[[pos, case, f]] = values.get(r).unwrap_or(f64::NAN);
            }
        }
    }
    debug!(l, n, k, "sequence tensor built");

    Ok(SequenceTensor {
        case_ids,
        features: features.iter().map(|c| c.name().to_string()).collect(),
        lengths: rows.iter().map(Vec::len).collect(),
        data,
    })
}
