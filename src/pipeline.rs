//! Transformation pipeline: log → steps in order → log or sequence tensor.

use crate::config::{ColumnNames, PrepConfig, TensorConfig};
use crate::eventlog;
use crate::error::Result;
use crate::tensor::{to_sequence_tensor_bounded, SequenceTensor};
use crate::transform::{self, ColumnSelection, DurationColumn};
use chrono::NaiveDateTime;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One pipeline stage, as written in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    FilterTimeWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    FilterActivityCount {
        activity: String,
        min_count: usize,
    },
    EventDuration,
    CumulativeDuration {
        #[serde(default)]
        duration: DurationColumn,
    },
    TotalDuration {
        #[serde(default)]
        duration: DurationColumn,
    },
    TimeAttributes,
    ActivityCount {
        activity: String,
    },
    ActivityCounts,
    SequenceLength,
    DropColumns {
        columns: Vec<String>,
    },
    FillMissing {
        column: String,
        value: f64,
    },
    OneHotEncode {
        selection: ColumnSelection,
    },
    ScaleFeatures {
        columns: Vec<String>,
    },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::FilterTimeWindow { .. } => "filter_time_window",
            Step::FilterActivityCount { .. } => "filter_activity_count",
            Step::EventDuration => "event_duration",
            Step::CumulativeDuration { .. } => "cumulative_duration",
            Step::TotalDuration { .. } => "total_duration",
            Step::TimeAttributes => "time_attributes",
            Step::ActivityCount { .. } => "activity_count",
            Step::ActivityCounts => "activity_counts",
            Step::SequenceLength => "sequence_length",
            Step::DropColumns { .. } => "drop_columns",
            Step::FillMissing { .. } => "fill_missing",
            Step::OneHotEncode { .. } => "one_hot_encode",
            Step::ScaleFeatures { .. } => "scale_features",
        }
    }

    pub fn apply(&self, log: DataFrame, columns: &ColumnNames) -> Result<DataFrame> {
        match self {
            Step::FilterTimeWindow { start, end } => {
                transform::filter_by_time_window(log, *start, *end, columns)
            }
            Step::FilterActivityCount {
                activity,
                min_count,
            } => transform::filter_by_activity_count(log, activity, *min_count, columns),
            Step::EventDuration => transform::event_duration(log, columns),
            Step::CumulativeDuration { duration } => {
                transform::cumulative_duration(log, columns, *duration)
            }
            Step::TotalDuration { duration } => transform::total_duration(log, columns, *duration),
            Step::TimeAttributes => transform::time_attributes(log, columns),
            Step::ActivityCount { activity } => transform::activity_count(log, activity, columns),
            Step::ActivityCounts => transform::activity_counts(log, columns),
            Step::SequenceLength => transform::sequence_length(log, columns),
            Step::DropColumns { columns: names } => eventlog::drop_columns(log, names.as_slice()),
            Step::FillMissing { column, value } => eventlog::fill_missing(log, column, *value),
            Step::OneHotEncode { selection } => transform::one_hot_encode(log, columns, selection),
            Step::ScaleFeatures { columns: names } => {
                transform::scale_features(log, names.as_slice())
            }
        }
    }
}

/// Runs configured steps over an event log.
pub struct LogPipeline {
    columns: ColumnNames,
    steps: Vec<Step>,
}

impl LogPipeline {
    pub fn new(columns: ColumnNames, steps: Vec<Step>) -> Self {
        Self { columns, steps }
    }

    pub fn from_config(config: &PrepConfig) -> Self {
        Self::new(config.columns.clone(), config.pipeline.clone())
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn columns(&self) -> &ColumnNames {
        &self.columns
    }

    /// Apply every step in order; the first failure aborts the run.
    pub fn run(&self, log: DataFrame) -> Result<DataFrame> {
        let mut log = log;
        for (i, step) in self.steps.iter().enumerate() {
            log = step.apply(log, &self.columns)?;
            debug!(
                stage = i,
                op = step.name(),
                rows = log.height(),
                columns = log.width(),
                "stage complete"
            );
        }
        info!(
            stages = self.steps.len(),
            rows = log.height(),
            columns = log.width(),
            "pipeline complete"
        );
        Ok(log)
    }

    /// Run the steps, then reshape into an (l, n, k) tensor.
    pub fn run_to_tensor(&self, log: DataFrame, tensor: &TensorConfig) -> Result<SequenceTensor> {
        let log = self.run(log)?;
        to_sequence_tensor_bounded(&log, &self.columns.case_id, tensor.max_elements)
    }
}
