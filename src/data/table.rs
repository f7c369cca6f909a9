//! Table Module
//! In-memory labeled table with a declared kind per column.

use polars::prelude::*;

/// Declared kind of a column, inferred once at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Floating point cells, absent cells are nulls.
    Numeric,
    /// Text cells, absent cells are nulls.
    Categorical,
}

impl ColumnKind {
    pub fn of(dtype: &DataType) -> Self {
        if dtype.is_primitive_numeric() {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        }
    }
}

/// A DataFrame whose columns are either `Float64` (numeric) or `String` (categorical).
///
/// Every constructor goes through [`Table::from_dataframe`], so the two physical
/// types are the only ones downstream stages ever see.
#[derive(Debug, Clone)]
pub struct Table {
    df: DataFrame,
}

impl Table {
    /// Wrap a DataFrame, casting numeric columns to `Float64` and everything else to `String`.
    ///
    /// A non-empty column with no values at all has no cell that fails to parse
    /// as a number, so it is numeric.
    pub fn from_dataframe(df: DataFrame) -> PolarsResult<Self> {
        let columns = df
            .get_columns()
            .iter()
            .map(|column| match Self::infer_kind(column) {
                ColumnKind::Numeric if column.dtype() == &DataType::Float64 => Ok(column.clone()),
                ColumnKind::Numeric => column.cast(&DataType::Float64),
                ColumnKind::Categorical if column.dtype() == &DataType::String => {
                    Ok(column.clone())
                }
                ColumnKind::Categorical => column.cast(&DataType::String),
            })
            .collect::<PolarsResult<Vec<Column>>>()?;

        Ok(Self {
            df: DataFrame::new(columns)?,
        })
    }

    fn infer_kind(column: &Column) -> ColumnKind {
        let all_absent = column.len() > 0 && column.null_count() == column.len();
        if column.dtype() == &DataType::Null || all_absent {
            ColumnKind::Numeric
        } else {
            ColumnKind::of(column.dtype())
        }
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.df.width()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.df.get_column_index(name).is_some()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Column names paired with their kind, in table order.
    pub fn columns(&self) -> Vec<(String, ColumnKind)> {
        self.df
            .get_columns()
            .iter()
            .map(|col| (col.name().to_string(), ColumnKind::of(col.dtype())))
            .collect()
    }

    pub fn kind(&self, name: &str) -> Option<ColumnKind> {
        self.df
            .column(name)
            .ok()
            .map(|col| ColumnKind::of(col.dtype()))
    }

    /// Get list of numeric column names.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns_of_kind(ColumnKind::Numeric)
    }

    /// Get list of categorical column names.
    pub fn categorical_columns(&self) -> Vec<String> {
        self.columns_of_kind(ColumnKind::Categorical)
    }

    fn columns_of_kind(&self, kind: ColumnKind) -> Vec<String> {
        self.columns()
            .into_iter()
            .filter(|(_, k)| *k == kind)
            .map(|(name, _)| name)
            .collect()
    }

    /// Cells of a numeric column, `None` marking absent values.
    pub fn numeric_cells(&self, name: &str) -> PolarsResult<Vec<Option<f64>>> {
        Ok(self.df.column(name)?.f64()?.into_iter().collect())
    }

    /// Cells of a categorical column, `None` marking absent values.
    pub fn categorical_cells(&self, name: &str) -> PolarsResult<Vec<Option<String>>> {
        Ok(self
            .df
            .column(name)?
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect())
    }
}
