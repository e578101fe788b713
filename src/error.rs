//! Crate error type. Failures from table, timestamp and tensor operations all land here.

use polars::prelude::{DataType, PolarsError};
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum PrepError {
    /// A column the operation needs is not in the log.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// A column exists but holds the wrong kind of data.
    #[error("column '{column}' has type {found}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: String,
    },

    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    /// An indicator column would overwrite a column already in the log.
    #[error("one-hot column '{encoded}' from '{from_column}' collides with an existing column")]
    EncodedNameClash { encoded: String, from_column: String },

    /// Input text that could not be turned into a cell value.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("tensor of shape ({l}, {n}, {k}) exceeds the limit of {limit} elements")]
    TensorTooLarge {
        l: usize,
        n: usize,
        k: usize,
        limit: usize,
    },

    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PrepError {
    pub(crate) fn type_mismatch(
        column: impl Into<String>,
        expected: &'static str,
        found: &DataType,
    ) -> Self {
        PrepError::TypeMismatch {
            column: column.into(),
            expected,
            found: found.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PrepError>;
