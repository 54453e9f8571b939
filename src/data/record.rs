//! Sales Record Module
//! Typed dataset rows and the per-field parsing rules applied at load time.

use serde::Serialize;
use thiserror::Error;

/// Records released before this year are dropped from the working set.
pub const MIN_YEAR: i32 = 1980;

pub const DEFAULT_PUBLISHER: &str = "Unknown Publisher";
pub const DEFAULT_NAME: &str = "Unknown Game";
pub const DEFAULT_GENRE: &str = "Unclassified";
pub const DEFAULT_PLATFORM: &str = "Unknown Platform";

/// Header names every dataset must carry.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "year",
    "total_sales",
    "publisher",
    "name",
    "genre",
    "platform",
    "na_sales",
    "jp_sales",
    "pal_sales",
    "other_sales",
];

/// Row-level parse failure. Substituted with a default, never surfaced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("field is empty")]
    Empty,
    #[error("not a number: {0:?}")]
    NotANumber(String),
    #[error("value out of range: {0}")]
    OutOfRange(f64),
}

/// One row of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord {
    pub year: i32,
    pub total_sales: f64,
    pub publisher: String,
    pub name: String,
    pub genre: String,
    pub platform: String,
    pub na_sales: f64,
    pub jp_sales: f64,
    pub pal_sales: f64,
    pub other_sales: f64,
}

/// Borrowed cell values for one CSV row, before any parsing.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawRow<'a> {
    pub year: Option<&'a str>,
    pub total_sales: Option<&'a str>,
    pub publisher: Option<&'a str>,
    pub name: Option<&'a str>,
    pub genre: Option<&'a str>,
    pub platform: Option<&'a str>,
    pub na_sales: Option<&'a str>,
    pub jp_sales: Option<&'a str>,
    pub pal_sales: Option<&'a str>,
    pub other_sales: Option<&'a str>,
}

/// Outcome of converting a single row.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    /// `None` when the year is missing, non-numeric or before [`MIN_YEAR`].
    pub record: Option<SalesRecord>,
    pub numeric_fallbacks: usize,
    pub text_defaults: usize,
}

impl<'a> RawRow<'a> {
    pub fn parse(&self) -> ParsedRow {
        let mut numeric_fallbacks = 0;
        let mut text_defaults = 0;

        let mut number = |raw: Option<&str>| match parse_sales(raw) {
            Ok(v) => v,
            Err(_) => {
                numeric_fallbacks += 1;
                0.0
            }
        };
        let total_sales = number(self.total_sales);
        let na_sales = number(self.na_sales);
        let jp_sales = number(self.jp_sales);
        let pal_sales = number(self.pal_sales);
        let other_sales = number(self.other_sales);

        let mut text = |raw: Option<&str>, default: &str| match parse_text(raw) {
            Ok(v) => v,
            Err(_) => {
                text_defaults += 1;
                default.to_string()
            }
        };
        let publisher = text(self.publisher, DEFAULT_PUBLISHER);
        let name = text(self.name, DEFAULT_NAME);
        let genre = text(self.genre, DEFAULT_GENRE);
        let platform = text(self.platform, DEFAULT_PLATFORM);

        let record = parse_year(self.year).ok().map(|year| SalesRecord {
            year,
            total_sales,
            publisher,
            name,
            genre,
            platform,
            na_sales,
            jp_sales,
            pal_sales,
            other_sales,
        });

        ParsedRow {
            record,
            numeric_fallbacks,
            text_defaults,
        }
    }
}

/// Parse a release year. Only whole years from [`MIN_YEAR`] on are accepted.
pub fn parse_year(raw: Option<&str>) -> Result<i32, FieldError> {
    let value = parse_number(raw)?;
    if value.fract() != 0.0 || value < f64::from(MIN_YEAR) || value > f64::from(i32::MAX) {
        return Err(FieldError::OutOfRange(value));
    }
    Ok(value as i32)
}

/// Parse a sales figure (millions of units). Negative figures are rejected.
pub fn parse_sales(raw: Option<&str>) -> Result<f64, FieldError> {
    let value = parse_number(raw)?;
    if value < 0.0 {
        return Err(FieldError::OutOfRange(value));
    }
    Ok(value)
}

/// Trim a text cell; empty cells are an error so the caller can apply its default.
pub fn parse_text(raw: Option<&str>) -> Result<String, FieldError> {
    match raw.map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(FieldError::Empty),
    }
}

fn parse_number(raw: Option<&str>) -> Result<f64, FieldError> {
    let s = raw.map(str::trim).unwrap_or_default();
    if s.is_empty() {
        return Err(FieldError::Empty);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FieldError::NotANumber(s.to_string())),
    }
}
