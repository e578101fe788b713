//! Event-log preparation for conformance checking and sequence-model training.
//!
//! Modular structure:
//! - [`eventlog`] — Event logs as polars data frames, ndjson reader/writer
//! - [`transform`] — Durations, calendar features, activity counts, encoding, scaling
//! - [`tensor`] — Padded (l, n, k) sequence tensor
//! - [`pipeline`] — Config-driven chain of transformations
//! - [`config`] — Column names, steps, tensor limits, logging
//! - [`logging`] — Structured logging

pub mod config;
pub mod error;
pub mod eventlog;
pub mod logging;
pub mod pipeline;
pub mod tensor;
pub mod transform;

pub use config::{ColumnNames, PrepConfig};
pub use error::{PrepError, Result};
pub use logging::StructuredLogger;
pub use pipeline::{LogPipeline, Step};
pub use tensor::{to_sequence_tensor, SequenceTensor};
