//! Charts module - chart-ready data and decorative image lookup

mod images;
mod pie;

pub use images::{GameSelection, ImageFlavor, ImageLookup, FALLBACK_POOL_SIZE};
pub use pie::{CategorySummary, PieData};
