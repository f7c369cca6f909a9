//! Data Processor Module
//! Handles data cleaning: deduplication, missing value imputation and min-max normalization.

use crate::config::{DegenerateRange, PipelineConfig};
use crate::data::{ColumnKind, Table};
use polars::prelude::*;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("No data loaded")]
    NoData,
}

/// Handles data cleaning and transformation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Run the full cleaning chain on a copy of `table`.
    ///
    /// Stages always run in the same order: deduplication, imputation, normalization.
    pub fn clean(table: &Table, config: &PipelineConfig) -> Result<Table, ProcessorError> {
        let deduped = Self::remove_duplicates(table)?;
        debug!(
            before = table.height(),
            after = deduped.height(),
            "duplicates removed"
        );

        let imputed = Self::handle_missing_values(&deduped, &config.missing_category)?;
        let normalized = Self::normalize_columns(
            &imputed,
            &config.normalized_suffix,
            config.degenerate_range,
        )?;
        debug!(columns = normalized.width(), "normalization done");

        Ok(normalized)
    }

    /// Drop rows that exactly repeat an earlier row, keeping the first one.
    ///
    /// Absent cells compare equal to each other.
    pub fn remove_duplicates(table: &Table) -> Result<Table, ProcessorError> {
        let df = table
            .dataframe()
            .clone()
            .lazy()
            .unique_stable(None, UniqueKeepStrategy::First)
            .collect()?;
        Ok(Table::from_dataframe(df)?)
    }

    /// Fill numeric gaps with the column mean and categorical gaps with `missing_category`.
    pub fn handle_missing_values(
        table: &Table,
        missing_category: &str,
    ) -> Result<Table, ProcessorError> {
        let fills: Vec<Expr> = table
            .columns()
            .into_iter()
            .map(|(name, kind)| match kind {
                ColumnKind::Numeric => {
                    col(name.as_str()).fill_null(col(name.as_str()).mean())
                }
                ColumnKind::Categorical => col(name.as_str()).fill_null(lit(missing_category)),
            })
            .collect();

        let df = table.dataframe().clone().lazy().with_columns(fills).collect()?;
        Ok(Table::from_dataframe(df)?)
    }

    /// Append `<name><suffix>` holding `(v - min) / (max - min)` for every numeric column.
    ///
    /// A column whose min equals its max gets `0.0` or `NaN` in every row, per `degenerate`.
    pub fn normalize_columns(
        table: &Table,
        suffix: &str,
        degenerate: DegenerateRange,
    ) -> Result<Table, ProcessorError> {
        let scaled: Vec<Expr> = table
            .numeric_columns()
            .iter()
            .map(|name| {
                let value = col(name.as_str());
                let min = value.clone().min();
                let range = value.clone().max() - min.clone();
                let fallback = match degenerate {
                    DegenerateRange::Zero => lit(0.0),
                    DegenerateRange::Nan => lit(f64::NAN),
                };

                when(range.clone().eq(lit(0.0)))
                    .then(fallback)
                    .otherwise((value - min) / range)
                    .alias(format!("{name}{suffix}"))
            })
            .collect();

        let df = table.dataframe().clone().lazy().with_columns(scaled).collect()?;
        Ok(Table::from_dataframe(df)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(df: PolarsResult<DataFrame>) -> Table {
        Table::from_dataframe(df.unwrap()).unwrap()
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let t = table(df!(
            "k" => &["A", "A", "B"],
            "v" => &[1.0, 1.0, 2.0]
        ));
        let deduped = DataProcessor::remove_duplicates(&t).unwrap();

        assert_eq!(
            deduped.categorical_cells("k").unwrap(),
            vec![Some("A".to_string()), Some("B".to_string())]
        );
    }

    #[test]
    fn absent_cells_match_for_deduplication() {
        let t = table(df!(
            "k" => &[Some("x"), Some("x"), Some("y")],
            "v" => &[None, None, Some(2.0)]
        ));
        let deduped = DataProcessor::remove_duplicates(&t).unwrap();

        assert_eq!(deduped.height(), 2);
        assert_eq!(deduped.numeric_cells("v").unwrap(), vec![None, Some(2.0)]);
    }

    #[test]
    fn numeric_gap_takes_column_mean() {
        let t = table(df!("v" => &[Some(2.0), None, Some(6.0)]));
        let imputed = DataProcessor::handle_missing_values(&t, "unknown").unwrap();

        assert_eq!(
            imputed.numeric_cells("v").unwrap(),
            vec![Some(2.0), Some(4.0), Some(6.0)]
        );
    }

    #[test]
    fn categorical_gap_takes_placeholder() {
        let t = table(df!("c" => &[Some("red"), None]));
        let imputed = DataProcessor::handle_missing_values(&t, "unknown").unwrap();

        assert_eq!(
            imputed.categorical_cells("c").unwrap(),
            vec![Some("red".to_string()), Some("unknown".to_string())]
        );
    }

    #[test]
    fn min_max_scaling() {
        let t = table(df!("v" => &[1.0, 2.0, 3.0]));
        let scaled =
            DataProcessor::normalize_columns(&t, "_normalized", DegenerateRange::Zero).unwrap();

        assert_eq!(scaled.column_names(), vec!["v", "v_normalized"]);
        assert_eq!(
            scaled.numeric_cells("v_normalized").unwrap(),
            vec![Some(0.0), Some(0.5), Some(1.0)]
        );
    }

    #[test]
    fn constant_column_follows_policy() {
        let t = table(df!("v" => &[5.0, 5.0]));

        let zero =
            DataProcessor::normalize_columns(&t, "_normalized", DegenerateRange::Zero).unwrap();
        assert_eq!(
            zero.numeric_cells("v_normalized").unwrap(),
            vec![Some(0.0), Some(0.0)]
        );

        let nan = DataProcessor::normalize_columns(&t, "_normalized", DegenerateRange::Nan).unwrap();
        assert!(nan
            .numeric_cells("v_normalized")
            .unwrap()
            .iter()
            .all(|v| v.is_some_and(f64::is_nan)));
    }

    #[test]
    fn clean_runs_all_stages() {
        let t = table(df!(
            "v" => &[Some(1.0), Some(1.0), None, Some(3.0)],
            "c" => &[Some("a"), Some("a"), None, Some("b")]
        ));
        let cleaned = DataProcessor::clean(&t, &PipelineConfig::default()).unwrap();

        assert_eq!(cleaned.height(), 3);
        assert_eq!(
            cleaned.numeric_cells("v").unwrap(),
            vec![Some(1.0), Some(2.0), Some(3.0)]
        );
        assert_eq!(
            cleaned.numeric_cells("v_normalized").unwrap(),
            vec![Some(0.0), Some(0.5), Some(1.0)]
        );
        assert_eq!(
            cleaned.categorical_cells("c").unwrap()[1].as_deref(),
            Some("unknown")
        );
        // source untouched
        assert_eq!(t.height(), 4);
    }
}
