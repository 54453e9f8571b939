//! Data Processor Module
//! Narrows the working set to the records visible at a drill-down level.

use super::record::SalesRecord;

/// Validated record filter derived from a drill-down context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Every record.
    All,
    /// Records released in one year.
    Year(i32),
    /// Records released in one year by one publisher.
    Publisher { year: i32, publisher: String },
}

impl Scope {
    pub fn matches(&self, record: &SalesRecord) -> bool {
        match self {
            Scope::All => true,
            Scope::Year(year) => record.year == *year,
            Scope::Publisher { year, publisher } => {
                record.year == *year && record.publisher.trim() == publisher.trim()
            }
        }
    }
}

/// Handles record filtering.
pub struct DataProcessor;

impl DataProcessor {
    /// Records matching `scope`, in dataset order.
    pub fn filter<'a>(records: &'a [SalesRecord], scope: &Scope) -> Vec<&'a SalesRecord> {
        records.iter().filter(|r| scope.matches(r)).collect()
    }

    /// Distinct publishers active in `year`, in first-seen order.
    pub fn publishers_in_year(records: &[SalesRecord], year: i32) -> Vec<String> {
        let mut publishers: Vec<String> = Vec::new();
        for record in records.iter().filter(|r| r.year == year) {
            if !publishers.iter().any(|p| p == &record.publisher) {
                publishers.push(record.publisher.clone());
            }
        }
        publishers
    }

    /// Distinct release years, ascending.
    pub fn years(records: &[SalesRecord]) -> Vec<i32> {
        let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }
}
