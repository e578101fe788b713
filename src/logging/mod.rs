//! Structured logging for the preparation binary.

mod format;

pub use format::{RunSummary, StructuredLogger};
