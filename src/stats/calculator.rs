//! Summary Calculator Module
//! Rolls a filtered record set up into the genre and platform breakdowns.

use std::collections::HashMap;

use crate::charts::{CategorySummary, PieData};
use crate::data::{DataProcessor, SalesRecord, Scope};

/// Decimal places kept on platform sales totals.
pub const SALES_PRECISION: i32 = 2;

/// Insertion-ordered accumulator keyed by category.
#[derive(Debug, Default)]
pub struct Rollup {
    index: HashMap<String, usize>,
    entries: Vec<(String, f64)>,
}

impl Rollup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to `key`, registering the key on first sight.
    pub fn add(&mut self, key: &str, amount: f64) {
        let key = key.trim();
        match self.index.get(key) {
            Some(&slot) => self.entries[slot].1 += amount,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), amount));
            }
        }
    }

    /// Convert to summaries sorted by descending value.
    ///
    /// The sort is stable, so ties stay in first-encounter order.
    pub fn into_ranked(self, transform: impl Fn(f64) -> f64) -> Vec<CategorySummary> {
        let mut summaries: Vec<CategorySummary> = self
            .entries
            .into_iter()
            .map(|(category, value)| CategorySummary::new(category, transform(value)))
            .collect();
        summaries.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        summaries
    }
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Computes the chart breakdowns.
pub struct SummaryCalculator;

impl SummaryCalculator {
    /// Genre counts and platform sales for the records in `scope`.
    pub fn compute(records: &[SalesRecord], scope: &Scope) -> PieData {
        let filtered = DataProcessor::filter(records, scope);
        Self::compute_filtered(&filtered)
    }

    /// Same as [`Self::compute`] for a pre-filtered slice.
    pub fn compute_filtered(records: &[&SalesRecord]) -> PieData {
        let mut genres = Rollup::new();
        let mut platforms = Rollup::new();

        for record in records {
            genres.add(&record.genre, 1.0);
            platforms.add(&record.platform, record.total_sales);
        }

        PieData {
            genre: genres.into_ranked(|count| count),
            platform: platforms.into_ranked(|sum| round_to(sum, SALES_PRECISION)),
        }
    }
}
