//! Stats module - summary aggregation

mod calculator;

pub use calculator::{round_to, Rollup, SummaryCalculator, SALES_PRECISION};
