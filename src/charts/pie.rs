//! Pie Chart Data Module
//! Output shapes handed to chart consumers.

use serde::{Deserialize, Serialize};

/// One slice of a categorical breakdown.
///
/// Serialized as `{"name": .., "value": ..}`, the shape pie-chart libraries expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    #[serde(rename = "name")]
    pub category: String,
    pub value: f64,
}

impl CategorySummary {
    pub fn new(category: impl Into<String>, value: f64) -> Self {
        Self {
            category: category.into(),
            value,
        }
    }
}

/// Both breakdowns produced by one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PieData {
    /// Record count per genre, descending.
    pub genre: Vec<CategorySummary>,
    /// Total sales per platform (2 decimals), descending.
    pub platform: Vec<CategorySummary>,
}

impl PieData {
    pub fn is_empty(&self) -> bool {
        self.genre.is_empty() && self.platform.is_empty()
    }
}
