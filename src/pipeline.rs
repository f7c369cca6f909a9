//! Pipeline facade
//! Owns the loaded table and the cache of derived tables, and orchestrates
//! load -> clean -> statistics -> report.
//!
//! The pipeline is either empty (nothing loaded yet) or loaded. Only a
//! successful load moves it out of the empty state, and nothing moves it back.
//! Statistics and reports always read the loaded source table, never the
//! cleaned copy.

use crate::config::PipelineConfig;
use crate::data::{DataLoader, DataProcessor, LoaderError, ProcessorError, Table};
use crate::report::{ReportError, ReportGenerator};
use crate::stats::{ColumnStats, StatsCalculator, StatsError};
use std::collections::HashMap;
use std::path::Path;
use tracing::{error, info};

/// Cache key of the table produced by [`Pipeline::clean`].
pub const CLEANED_KEY: &str = "cleaned";

/// Not synchronized: share between threads behind a `Mutex`.
#[derive(Debug, Default)]
pub struct Pipeline {
    config: PipelineConfig,
    loader: DataLoader,
    data: Option<Table>,
    processed: HashMap<String, Table>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PipelineConfig) -> Self {
        let loader = DataLoader::new().with_infer_schema_length(config.infer_schema_length);
        Self {
            config,
            loader,
            data: None,
            processed: HashMap::new(),
        }
    }

    /// Start from an in-memory table instead of a file.
    pub fn with_table(mut self, table: Table) -> Self {
        self.replace_table(table);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// The loaded source table.
    pub fn table(&self) -> Option<&Table> {
        self.data.as_ref()
    }

    /// A derived table stored by an earlier stage, e.g. [`CLEANED_KEY`].
    pub fn cached(&self, key: &str) -> Option<&Table> {
        self.processed.get(key)
    }

    /// Load a CSV file, logging and returning `false` on failure.
    ///
    /// A failed load leaves the previous table and cache as they were.
    /// The failure is reported through `tracing::error!`, so the message only
    /// reaches stderr when a subscriber is installed (the binary installs one
    /// via `logging::init`). Use [`Pipeline::try_load`] to get the error itself.
    pub fn load(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        match self.try_load(path) {
            Ok(()) => true,
            Err(e) => {
                error!(path = %path.display(), "Error loading data: {e}");
                false
            }
        }
    }

    pub fn try_load(&mut self, path: impl AsRef<Path>) -> Result<(), LoaderError> {
        let path = path.as_ref();
        let table = self.loader.load_csv(path)?;
        info!(
            path = %path.display(),
            rows = table.height(),
            columns = table.width(),
            "data loaded"
        );
        self.replace_table(table);
        Ok(())
    }

    fn replace_table(&mut self, table: Table) {
        self.data = Some(table);
        self.processed.clear();
    }

    /// Deduplicate, impute and normalize a copy of the loaded table.
    ///
    /// The result is cached under [`CLEANED_KEY`] and returned.
    pub fn clean(&mut self) -> Result<&Table, ProcessorError> {
        let data = self.data.as_ref().ok_or(ProcessorError::NoData)?;
        let cleaned = DataProcessor::clean(data, &self.config)?;
        info!(
            rows = cleaned.height(),
            columns = cleaned.width(),
            "data cleaned"
        );

        self.processed.insert(CLEANED_KEY.to_string(), cleaned);
        Ok(&self.processed[CLEANED_KEY])
    }

    /// Mean, median, sample std and skewness of one numeric column of the source table.
    pub fn statistics(&self, column: &str) -> Result<ColumnStats, StatsError> {
        let data = self.data.as_ref().ok_or(StatsError::NoData)?;
        StatsCalculator::column_stats(data, column)
    }

    /// Write the text report for the source table to `output_path`.
    pub fn generate_report(&self, output_path: impl AsRef<Path>) -> Result<(), ReportError> {
        let data = self.data.as_ref().ok_or(ReportError::NoData)?;
        ReportGenerator::write_report(data, output_path.as_ref(), self.config.report_precision)
    }
}
