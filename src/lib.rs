//! Gamedata - Video Game Sales Drill-Down Aggregation
//!
//! Loads a video game sales dataset and derives the genre and platform
//! breakdowns shown at each drill-down level (year → publisher → game).

pub mod app;
pub mod charts;
pub mod config;
pub mod data;
pub mod stats;
pub mod view;
