//! Chart State Module
//! Owns the working set, the drill-down navigation and the derived summaries.

use std::fmt;

use tracing::{debug, warn};

use super::context::{ContextError, DrillDownContext, Navigator, ViewLevel};
use crate::charts::{CategorySummary, PieData};
use crate::data::{DataProcessor, SalesRecord};
use crate::stats::SummaryCalculator;

/// Callback invoked after the summaries change.
pub type ChangeListener = Box<dyn Fn(&ChartState)>;

/// Application view state.
///
/// Setters only record the change; summaries are refreshed by
/// [`ChartState::recompute`] or by the navigation methods, which call it.
#[derive(Default)]
pub struct ChartState {
    raw_data: Vec<SalesRecord>,
    navigator: Navigator,
    pie: PieData,
    listeners: Vec<ChangeListener>,
}

impl fmt::Debug for ChartState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartState")
            .field("records", &self.raw_data.len())
            .field("context", self.navigator.current())
            .field("pie", &self.pie)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ChartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a change-notification callback.
    pub fn subscribe(&mut self, listener: impl Fn(&ChartState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn raw_data(&self) -> &[SalesRecord] {
        &self.raw_data
    }

    /// Replace the working set wholesale and refresh the summaries.
    ///
    /// The context is validated first; on error nothing is replaced.
    pub fn replace_records(&mut self, records: Vec<SalesRecord>) -> Result<&PieData, ContextError> {
        self.context().scope().inspect_err(|err| {
            warn!(error = %err, "keeping previous working set: context is invalid");
        })?;
        self.raw_data = records;
        self.recompute()
    }

    pub fn context(&self) -> &DrillDownContext {
        self.navigator.current()
    }

    pub fn current_view(&self) -> ViewLevel {
        self.context().view
    }

    pub fn current_year(&self) -> Option<i32> {
        self.context().year
    }

    pub fn current_publisher(&self) -> Option<&str> {
        self.context().publisher.as_deref()
    }

    pub fn set_current_view(&mut self, view: ViewLevel) {
        self.navigator.current_mut().view = view;
    }

    pub fn set_current_year(&mut self, year: Option<i32>) {
        self.navigator.current_mut().year = year;
    }

    pub fn set_current_publisher(&mut self, publisher: Option<String>) {
        self.navigator.current_mut().publisher = publisher;
    }

    pub fn pie_data(&self) -> &PieData {
        &self.pie
    }

    pub fn genre_data(&self) -> &[CategorySummary] {
        &self.pie.genre
    }

    pub fn platform_data(&self) -> &[CategorySummary] {
        &self.pie.platform
    }

    /// Release years present in the working set.
    pub fn years(&self) -> Vec<i32> {
        DataProcessor::years(&self.raw_data)
    }

    /// Publishers active in the currently selected year.
    pub fn publishers(&self) -> Vec<String> {
        self.current_year()
            .map(|year| DataProcessor::publishers_in_year(&self.raw_data, year))
            .unwrap_or_default()
    }

    /// Re-aggregate for the current context and notify listeners.
    ///
    /// An inconsistent context fails without touching the summaries.
    pub fn recompute(&mut self) -> Result<&PieData, ContextError> {
        let scope = self.context().scope().inspect_err(|err| {
            warn!(error = %err, "refusing to aggregate with an invalid context");
        })?;

        self.pie = SummaryCalculator::compute(&self.raw_data, &scope);
        debug!(
            ?scope,
            genres = self.pie.genre.len(),
            platforms = self.pie.platform.len(),
            "summaries recomputed"
        );

        for listener in &self.listeners {
            listener(self);
        }
        Ok(&self.pie)
    }

    pub fn drill_into_year(&mut self, year: i32) -> Result<&PieData, ContextError> {
        self.navigator.drill_into_year(year)?;
        self.recompute()
    }

    pub fn drill_into_publisher(
        &mut self,
        publisher: impl Into<String>,
    ) -> Result<&PieData, ContextError> {
        self.navigator.drill_into_publisher(publisher)?;
        self.recompute()
    }

    /// Step back one level. At the root this only recomputes.
    pub fn drill_up(&mut self) -> Result<&PieData, ContextError> {
        self.navigator.drill_up();
        self.recompute()
    }

    pub fn reset(&mut self) -> Result<&PieData, ContextError> {
        self.navigator.reset();
        self.recompute()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn record(year: i32, publisher: &str, genre: &str, platform: &str, sales: f64) -> SalesRecord {
        SalesRecord {
            year,
            total_sales: sales,
            publisher: publisher.to_string(),
            name: "Game".to_string(),
            genre: genre.to_string(),
            platform: platform.to_string(),
            na_sales: 0.0,
            jp_sales: 0.0,
            pal_sales: 0.0,
            other_sales: 0.0,
        }
    }

    fn sample() -> Vec<SalesRecord> {
        vec![
            record(2005, "Nintendo", "Platform", "DS", 2.0),
            record(2006, "Nintendo", "Sports", "Wii", 5.0),
            record(2005, "Sega", "Racing", "PS2", 1.25),
        ]
    }

    #[test]
    fn listeners_fire_on_recompute() {
        let mut state = ChartState::new();
        let hits = Rc::new(Cell::new(0));
        let seen = Rc::clone(&hits);
        state.subscribe(move |s| {
            assert!(s.raw_data().len() <= 3);
            seen.set(seen.get() + 1);
        });

        state.replace_records(sample()).unwrap();
        state.drill_into_year(2005).unwrap();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn invalid_context_leaves_summaries_untouched() {
        let mut state = ChartState::new();
        state.replace_records(sample()).unwrap();
        let before = state.pie_data().clone();

        state.set_current_view(ViewLevel::Game);
        state.set_current_year(Some(2005));
        assert_eq!(state.recompute().unwrap_err(), ContextError::MissingPublisher);
        assert_eq!(state.pie_data(), &before);
    }

    #[test]
    fn invalid_context_rejects_new_records() {
        let mut state = ChartState::new();
        state.replace_records(sample()).unwrap();
        state.set_current_view(ViewLevel::Game);

        let err = state
            .replace_records(vec![record(2010, "Sony", "Racing", "PS3", 3.0)])
            .unwrap_err();
        assert_eq!(err, ContextError::MissingYear { view: ViewLevel::Game });
        assert_eq!(state.raw_data().len(), 3);
        assert_eq!(state.genre_data().len(), 3);
    }

    #[test]
    fn drilling_narrows_and_restores() {
        let mut state = ChartState::new();
        state.replace_records(sample()).unwrap();
        assert_eq!(state.genre_data().len(), 3);

        state.drill_into_year(2005).unwrap();
        assert_eq!(state.publishers(), vec!["Nintendo", "Sega"]);
        state.drill_into_publisher("Sega").unwrap();
        assert_eq!(state.platform_data(), &[CategorySummary::new("PS2", 1.25)]);

        state.drill_up().unwrap();
        assert_eq!(state.current_view(), ViewLevel::Publisher);
        assert_eq!(state.genre_data().len(), 2);

        state.reset().unwrap();
        assert_eq!(state.current_year(), None);
        assert_eq!(state.years(), vec![2005, 2006]);
    }
}
