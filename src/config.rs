//! Preparation configuration: column names, pipeline steps, tensor limits, logging.

use crate::pipeline::Step;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CASE_COL: &str = "case:concept:name";
pub const DEFAULT_ACTIVITY_COL: &str = "concept:name";
pub const DEFAULT_TIMESTAMP_COL: &str = "time:timestamp";
pub const DEFAULT_RESOURCE_COL: &str = "org:resource";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepConfig {
    /// Names of the standard event-log columns
    pub columns: ColumnNames,
    /// Transformations applied in order
    pub pipeline: Vec<Step>,
    /// Sequence tensor output
    pub tensor: TensorConfig,
    /// Logging
    pub log: LogConfig,
}

/// Standard column names, threaded through every transformation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub case_id: String,
    pub activity: String,
    pub timestamp: String,
    pub resource: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TensorConfig {
    /// Write the (l, n, k) tensor instead of the transformed log
    pub enabled: bool,
    /// Upper bound on l * n * k; `None` disables the check
    pub max_elements: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            case_id: DEFAULT_CASE_COL.to_string(),
            activity: DEFAULT_ACTIVITY_COL.to_string(),
            timestamp: DEFAULT_TIMESTAMP_COL.to_string(),
            resource: DEFAULT_RESOURCE_COL.to_string(),
        }
    }
}

impl Default for TensorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_elements: Some(1 << 30),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl PrepConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(data) => match serde_json::from_str::<PrepConfig>(&data) {
                    Ok(c) => return c,
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "invalid config; using defaults")
                    }
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "unreadable config; using defaults")
                }
            }
        }
        Self::default()
    }
}
