//! Text Report Generator Module
//! Builds a plain-text summary of a table: overview plus statistics per numeric column.

use crate::data::Table;
use crate::stats::{ColumnStats, StatsCalculator, StatsError};
use chrono::Local;
use rayon::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Format for the report title timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("No data loaded")]
    NoData,
    #[error(transparent)]
    Stats(#[from] StatsError),
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Report generator for a loaded table
pub struct ReportGenerator;

impl ReportGenerator {
    /// Render the report and write it to `output_path`, replacing any existing file.
    pub fn write_report(
        table: &Table,
        output_path: &Path,
        precision: usize,
    ) -> Result<(), ReportError> {
        let generated_at = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let report = Self::render(table, &generated_at, precision)?;

        std::fs::write(output_path, report)?;
        info!(path = %output_path.display(), "report written");
        Ok(())
    }

    /// Render the report document.
    ///
    /// Statistics are computed in parallel, blocks are emitted in column order.
    pub fn render(
        table: &Table,
        generated_at: &str,
        precision: usize,
    ) -> Result<String, ReportError> {
        let numeric = table.numeric_columns();
        let blocks: Vec<(String, ColumnStats)> = numeric
            .par_iter()
            .map(|column| {
                StatsCalculator::column_stats(table, column).map(|stats| (column.clone(), stats))
            })
            .collect::<Result<_, _>>()?;

        let mut lines = vec![
            format!("Data Analysis Report - {generated_at}"),
            String::new(),
            "Dataset Overview:".to_string(),
            format!("Total Records: {}", table.height()),
            format!("Total Features: {}", table.width()),
        ];

        for (column, stats) in &blocks {
            lines.push(String::new());
            lines.push(format!("Statistics for {column}:"));
            for (name, value) in stats.entries() {
                lines.push(format!("{name}: {}", Self::format_value(value, precision)));
            }
        }

        Ok(lines.join("\n"))
    }

    /// Fixed-point value with `precision` decimals, `NaN` as `nan`.
    pub fn format_value(value: f64, precision: usize) -> String {
        if value.is_nan() {
            "nan".to_string()
        } else {
            format!("{value:.precision$}")
        }
    }
}
