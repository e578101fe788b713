//! One-hot expansion of categorical columns.

use crate::config::ColumnNames;
use crate::error::{PrepError, Result};
use crate::eventlog::require_column;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Which columns are treated as categorical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "value", rename_all = "snake_case")]
pub enum ColumnSelection {
    /// Exactly these columns
    Explicit(Vec<String>),
    /// Columns whose name starts with the pattern
    Prefix(String),
    /// Every column
    All,
}

impl ColumnSelection {
    /// Resolve against a log. For `Prefix` and `All` the case-id and timestamp
    /// columns are removed and the resource and activity columns are added.
    pub fn resolve(&self, log: &DataFrame, columns: &ColumnNames) -> Vec<String> {
        let names = log
            .get_column_names()
            .into_iter()
            .map(|n| n.to_string());
        let mut selected: Vec<String> = match self {
            ColumnSelection::Explicit(list) => return dedup(list.clone()),
            ColumnSelection::Prefix(pattern) => {
                names.filter(|n| n.starts_with(pattern.as_str())).collect()
            }
            ColumnSelection::All => names.collect(),
        };
        selected.retain(|n| *n != columns.case_id && *n != columns.timestamp);
        for required in [&columns.resource, &columns.activity] {
            if !selected.contains(required) {
                selected.push(required.clone());
            }
        }
        selected
    }
}

fn dedup(names: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for n in names {
        if !out.contains(&n) {
            out.push(n);
        }
    }
    out
}

/// Replace each selected text column by one 0/1 column per distinct value,
/// named `<column>_<value>`, values in sorted order. A missing value sets no
/// indicator. Selected non-text columns pass through. The result holds the
/// unselected columns in their original order, then the encoded block.
pub fn one_hot_encode(
    log: DataFrame,
    columns: &ColumnNames,
    selection: &ColumnSelection,
) -> Result<DataFrame> {
    let selected = selection.resolve(&log, columns);
    for name in &selected {
        require_column(&log, name)?;
    }

    let mut exprs: Vec<Expr> = Vec::new();
    let mut taken: HashSet<String> = HashSet::new();
    for c in log.get_columns() {
        let name = c.name().as_str();
        if !selected.iter().any(|s| s == name) {
            exprs.push(col(name));
            taken.insert(name.to_string());
        }
    }
    for name in &selected {
        let column = require_column(&log, name)?;
        if column.dtype() != &DataType::String {
            exprs.push(col(name.as_str()));
            taken.insert(name.clone());
            continue;
        }
        let series = column.as_materialized_series();
        let categories: BTreeSet<&str> = series.str()?.into_iter().flatten().collect();
        debug!(column = %name, categories = categories.len(), "one-hot encoding");
        for cat in categories {
            let encoded = format!("{name}_{cat}");
            if !taken.insert(encoded.clone()) {
                return Err(PrepError::EncodedNameClash {
                    encoded,
                    from_column: name.clone(),
                });
            }
            exprs.push(
                col(name.as_str())
                    .eq(lit(cat))
                    .cast(DataType::Int64)
                    .fill_null(lit(0i64))
                    .alias(encoded.as_str()),
            );
        }
    }
    Ok(log.lazy().select(exprs).collect()?)
}
