//! Data module - dataset loading and filtering

mod loader;
mod processor;
mod record;
mod source;

pub use loader::{DatasetLoader, LoadError, LoadReport, LoadedDataset};
pub use processor::{DataProcessor, Scope};
pub use record::{
    parse_sales, parse_text, parse_year, FieldError, ParsedRow, RawRow, SalesRecord, DEFAULT_GENRE,
    DEFAULT_NAME, DEFAULT_PLATFORM, DEFAULT_PUBLISHER, MIN_YEAR, REQUIRED_COLUMNS,
};
pub use source::DataSource;
