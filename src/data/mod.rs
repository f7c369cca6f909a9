//! Data module - CSV loading, table model and cleaning

mod loader;
mod processor;
mod table;

pub use loader::{DataLoader, LoaderError};
pub use processor::{DataProcessor, ProcessorError};
pub use table::{ColumnKind, Table};
