//! CSV Data Loader Module
//! Handles CSV file loading and column kind inference using Polars.

use crate::data::Table;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Reads comma-delimited files with a header row into a [`Table`].
#[derive(Debug, Clone, Default)]
pub struct DataLoader {
    /// Rows scanned for type inference; `None` scans the whole file.
    infer_schema_length: Option<usize>,
}

impl DataLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_infer_schema_length(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_length = rows;
        self
    }

    /// Load a CSV file.
    ///
    /// A column is numeric when every non-empty cell parses as a number,
    /// anything else is categorical. Empty cells are loaded as absent.
    pub fn load_csv(&self, path: impl AsRef<Path>) -> Result<Table, LoaderError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoaderError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(self.infer_schema_length)
            .into_reader_with_file_handle(file)
            .finish()?;

        let table = Table::from_dataframe(df)?;
        debug!(
            path = %path.display(),
            rows = table.height(),
            columns = table.width(),
            "csv loaded"
        );
        Ok(table)
    }

    /// Write a table back out as CSV with a header row.
    pub fn save_csv(table: &Table, path: impl AsRef<Path>) -> Result<(), LoaderError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| LoaderError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut df = table.dataframe().clone();
        CsvWriter::new(file).include_header(true).finish(&mut df)?;
        Ok(())
    }
}
