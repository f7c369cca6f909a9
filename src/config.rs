//! Pipeline configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! gives the standard cleaning behaviour:
//!
//! ```json
//! {
//!   "missing_category": "unknown",
//!   "normalized_suffix": "_normalized",
//!   "degenerate_range": "zero",
//!   "report_precision": 2,
//!   "infer_schema_length": null
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Value written into a normalized column when the source column's min equals its max.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegenerateRange {
    #[default]
    Zero,
    Nan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Replacement for absent categorical cells.
    pub missing_category: String,
    /// Appended to a numeric column name to form its normalized column.
    pub normalized_suffix: String,
    pub degenerate_range: DegenerateRange,
    /// Decimal places for report values.
    pub report_precision: usize,
    /// Rows scanned for CSV type inference, `None` for the whole file.
    pub infer_schema_length: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            missing_category: "unknown".to_string(),
            normalized_suffix: "_normalized".to_string(),
            degenerate_range: DegenerateRange::Zero,
            report_precision: 2,
            infer_schema_length: None,
        }
    }
}

impl PipelineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
