//! Statistics Calculator Module
//! Handles descriptive statistics for a single table column.

use crate::data::{ColumnKind, Table};
use polars::prelude::PolarsError;
use serde::Serialize;
use statrs::statistics::Statistics;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("No data loaded")]
    NoData,
    #[error("Column {0} not found in data")]
    ColumnNotFound(String),
    #[error("Column {0} is not numeric")]
    NotNumeric(String),
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Descriptive statistics for one column.
///
/// A statistic that needs more observations than the column holds is `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnStats {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub skewness: f64,
}

impl Default for ColumnStats {
    fn default() -> Self {
        Self {
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            skewness: f64::NAN,
        }
    }
}

impl ColumnStats {
    /// Name/value pairs in report order.
    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("mean", self.mean),
            ("median", self.median),
            ("std", self.std),
            ("skewness", self.skewness),
        ]
    }
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute statistics for a named numeric column, ignoring absent cells.
    pub fn column_stats(table: &Table, column: &str) -> Result<ColumnStats, StatsError> {
        let values = Self::column_values(table, column)?;
        Ok(Self::compute_descriptive_stats(&values))
    }

    /// Non-absent values of a numeric column in row order.
    pub fn column_values(table: &Table, column: &str) -> Result<Vec<f64>, StatsError> {
        match table.kind(column) {
            None => Err(StatsError::ColumnNotFound(column.to_string())),
            Some(ColumnKind::Categorical) => Err(StatsError::NotNumeric(column.to_string())),
            Some(ColumnKind::Numeric) => Ok(table
                .numeric_cells(column)?
                .into_iter()
                .flatten()
                .collect()),
        }
    }

    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(values: &[f64]) -> ColumnStats {
        let n = values.len();
        if n == 0 {
            return ColumnStats::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = values.iter().mean();
        let median = Self::percentile(&sorted, 50.0);
        let std = if n > 1 { values.iter().std_dev() } else { f64::NAN };

        ColumnStats {
            mean,
            median,
            std,
            skewness: Self::skewness(values, mean),
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Adjusted Fisher-Pearson skewness `G1 = sqrt(n(n-1)) / (n-2) * m3 / m2^1.5`.
    fn skewness(values: &[f64], mean: f64) -> f64 {
        let n = values.len() as f64;
        if values.len() < 3 {
            return f64::NAN;
        }

        let m2 = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let m3 = values.iter().map(|x| (x - mean).powi(3)).sum::<f64>() / n;
        // zero variance is NaN, unlike pandas which reports 0.0
        if m2 == 0.0 {
            return f64::NAN;
        }

        let g1 = m3 / m2.powf(1.5);
        g1 * (n * (n - 1.0)).sqrt() / (n - 2.0)
    }
}
