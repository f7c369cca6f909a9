//! datasift - CSV cleaning, descriptive statistics & text reports
//!
//! Load a comma-delimited file, clean it (deduplicate, impute, min-max
//! normalize), compute per-column statistics and write a text report.
//! A small timing demo lives in [`timing`].

pub mod config;
pub mod data;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod timing;

pub use config::{DegenerateRange, PipelineConfig};
pub use data::{ColumnKind, Table};
pub use pipeline::{Pipeline, CLEANED_KEY};
pub use stats::ColumnStats;
