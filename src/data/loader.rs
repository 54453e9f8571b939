//! CSV Dataset Loader Module
//! Reads the sales dataset with Polars and converts it into typed records.

use std::io::Cursor;
use std::time::Duration;

use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use super::record::{ParsedRow, RawRow, SalesRecord, REQUIRED_COLUMNS};
use super::source::DataSource;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("dataset unreachable at {source_name}: {reason}")]
    Unreachable { source_name: String, reason: String },
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("HTTP status {status} fetching {url}")]
    HttpStatus { status: u16, url: String },
    #[error("dataset is empty")]
    Empty,
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("dataset header is missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Counters describing what a load did to the raw rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rows_dropped: usize,
    pub numeric_fallbacks: usize,
    pub text_defaults: usize,
}

/// The working set produced by one load.
#[derive(Debug, Clone, Default)]
pub struct LoadedDataset {
    pub records: Vec<SalesRecord>,
    pub report: LoadReport,
}

/// Loads sales datasets from files or URLs.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    timeout: Duration,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl DatasetLoader {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Fetch and parse a dataset. Any failure aborts the whole load.
    pub fn load(&self, source: &DataSource) -> Result<LoadedDataset, LoadError> {
        debug!(%source, "fetching dataset");
        let bytes = source.fetch(self.timeout)?;
        let dataset = Self::parse_csv(bytes)?;

        let report = &dataset.report;
        info!(
            %source,
            rows_read = report.rows_read,
            rows_kept = report.rows_kept,
            rows_dropped = report.rows_dropped,
            numeric_fallbacks = report.numeric_fallbacks,
            text_defaults = report.text_defaults,
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// Parse CSV bytes with a header row. Every column is read as text so
    /// that numeric fallbacks are decided per cell rather than per column.
    ///
    /// Over-long rows are truncated to the header width and invalid UTF-8 is
    /// replaced, so a malformed row never fails the load.
    pub fn parse_csv(bytes: Vec<u8>) -> Result<LoadedDataset, LoadError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(LoadError::Empty);
        }

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_ignore_errors(true)
            .with_parse_options(
                CsvParseOptions::default()
                    .with_truncate_ragged_lines(true)
                    .with_encoding(CsvEncoding::LossyUtf8),
            )
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| df.column(name).is_err())
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns(missing));
        }

        let columns = REQUIRED_COLUMNS
            .iter()
            .copied()
            .map(|name| Self::text_column(&df, name))
            .collect::<Result<Vec<_>, _>>()?;

        // Row order is preserved by the indexed parallel collect.
        let rows: Vec<ParsedRow> = (0..df.height())
            .into_par_iter()
            .map(|i| {
                let cell = |c: usize| columns[c][i].as_deref();
                RawRow {
                    year: cell(0),
                    total_sales: cell(1),
                    publisher: cell(2),
                    name: cell(3),
                    genre: cell(4),
                    platform: cell(5),
                    na_sales: cell(6),
                    jp_sales: cell(7),
                    pal_sales: cell(8),
                    other_sales: cell(9),
                }
                .parse()
            })
            .collect();

        let mut report = LoadReport {
            rows_read: rows.len(),
            ..LoadReport::default()
        };
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            report.numeric_fallbacks += row.numeric_fallbacks;
            report.text_defaults += row.text_defaults;
            match row.record {
                Some(record) => records.push(record),
                None => report.rows_dropped += 1,
            }
        }
        report.rows_kept = records.len();

        Ok(LoadedDataset { records, report })
    }

    fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoadError> {
        let series = df
            .column(name)?
            .as_materialized_series()
            .cast(&DataType::String)?;
        let values = series
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect();
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::DEFAULT_GENRE;

    const HEADER: &str =
        "name,platform,year,genre,publisher,na_sales,jp_sales,pal_sales,other_sales,total_sales";

    fn csv(rows: &[&str]) -> Vec<u8> {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text.push('\n');
        text.into_bytes()
    }

    #[test]
    fn header_order_is_irrelevant() {
        let dataset =
            DatasetLoader::parse_csv(csv(&["Tetris,GB,1989,Puzzle,Nintendo,23.2,4.22,2.26,0.58,30.26"]))
                .unwrap();
        assert_eq!(dataset.records.len(), 1);
        let record = &dataset.records[0];
        assert_eq!(record.year, 1989);
        assert_eq!(record.platform, "GB");
        assert_eq!(record.total_sales, 30.26);
    }

    #[test]
    fn invalid_years_are_dropped_and_counted() {
        let dataset = DatasetLoader::parse_csv(csv(&[
            "A,PC,1979,RPG,X,0,0,0,0,1",
            "B,PC,N/A,RPG,X,0,0,0,0,1",
            "C,PC,1980,RPG,X,0,0,0,0,1",
        ]))
        .unwrap();
        assert_eq!(dataset.report.rows_read, 3);
        assert_eq!(dataset.report.rows_kept, 1);
        assert_eq!(dataset.report.rows_dropped, 2);
        assert_eq!(dataset.records[0].name, "C");
    }

    #[test]
    fn empty_cells_use_defaults() {
        let dataset = DatasetLoader::parse_csv(csv(&["Doom,PC,1993,,id,,,,,abc"])).unwrap();
        let record = &dataset.records[0];
        assert_eq!(record.genre, DEFAULT_GENRE);
        assert_eq!(record.total_sales, 0.0);
        assert_eq!(dataset.report.numeric_fallbacks, 5);
    }

    #[test]
    fn missing_columns_fail_the_load() {
        let err = DatasetLoader::parse_csv(b"name,year\nTetris,1989\n".to_vec()).unwrap_err();
        match err {
            LoadError::MissingColumns(cols) => {
                assert!(cols.contains(&"total_sales".to_string()));
                assert!(!cols.contains(&"year".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn over_long_row_is_truncated() {
        let dataset = DatasetLoader::parse_csv(csv(&[
            "A,PC,2006,RPG,X,0,0,0,0,1",
            "B,PS2,2006,Sports,EA, Inc,0,0,0,0,2",
            "C,PC,2006,RPG,X,0,0,0,0,1",
        ]))
        .unwrap();
        let names: Vec<&str> = dataset.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(dataset.records[1].publisher, "EA");
    }

    #[test]
    fn blank_input_is_empty() {
        assert!(matches!(
            DatasetLoader::parse_csv(b"  \n".to_vec()),
            Err(LoadError::Empty)
        ));
    }
}
