//! View module - drill-down context and shared chart state

mod context;
mod state;

pub use context::{ContextError, DrillDownContext, Navigator, ViewLevel};
pub use state::{ChangeListener, ChartState};
