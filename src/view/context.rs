//! Drill-Down Context Module
//! The navigation level (year → publisher → game) and its history stack.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::Scope;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("the {view} view requires a selected year")]
    MissingYear { view: ViewLevel },
    #[error("the game view requires a selected publisher")]
    MissingPublisher,
    #[error("cannot drill from the {from} view into the {to} view")]
    InvalidTransition { from: ViewLevel, to: ViewLevel },
}

/// Current drill-down level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewLevel {
    /// Whole dataset, broken down by year.
    #[default]
    Year,
    /// One year, broken down by publisher.
    Publisher,
    /// One year and publisher, broken down by game.
    Game,
}

impl fmt::Display for ViewLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewLevel::Year => "year",
            ViewLevel::Publisher => "publisher",
            ViewLevel::Game => "game",
        })
    }
}

/// Mutable view state selecting which records are aggregated.
///
/// Fields are public so callers can set them one at a time; consistency is
/// checked by [`DrillDownContext::scope`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillDownContext {
    pub view: ViewLevel,
    pub year: Option<i32>,
    pub publisher: Option<String>,
}

impl DrillDownContext {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn for_year(year: i32) -> Self {
        Self {
            view: ViewLevel::Publisher,
            year: Some(year),
            publisher: None,
        }
    }

    pub fn for_publisher(year: i32, publisher: impl Into<String>) -> Self {
        Self {
            view: ViewLevel::Game,
            year: Some(year),
            publisher: Some(publisher.into()),
        }
    }

    /// Validate the context into a record filter.
    pub fn scope(&self) -> Result<Scope, ContextError> {
        match self.view {
            ViewLevel::Year => Ok(Scope::All),
            ViewLevel::Publisher => {
                let year = self.year.ok_or(ContextError::MissingYear { view: self.view })?;
                Ok(Scope::Year(year))
            }
            ViewLevel::Game => {
                let year = self.year.ok_or(ContextError::MissingYear { view: self.view })?;
                let publisher = self
                    .publisher
                    .as_deref()
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .ok_or(ContextError::MissingPublisher)?;
                Ok(Scope::Publisher {
                    year,
                    publisher: publisher.to_string(),
                })
            }
        }
    }
}

/// Drill-down history. The current context is the top of the stack.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    current: DrillDownContext,
    history: Vec<DrillDownContext>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &DrillDownContext {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut DrillDownContext {
        &mut self.current
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Year view → publisher view for `year`.
    pub fn drill_into_year(&mut self, year: i32) -> Result<&DrillDownContext, ContextError> {
        self.expect_view(ViewLevel::Year, ViewLevel::Publisher)?;
        self.push(DrillDownContext::for_year(year));
        Ok(&self.current)
    }

    /// Publisher view → game view for `publisher` in the current year.
    pub fn drill_into_publisher(
        &mut self,
        publisher: impl Into<String>,
    ) -> Result<&DrillDownContext, ContextError> {
        self.expect_view(ViewLevel::Publisher, ViewLevel::Game)?;
        let year = self.current.year.ok_or(ContextError::MissingYear {
            view: ViewLevel::Publisher,
        })?;
        self.push(DrillDownContext::for_publisher(year, publisher));
        Ok(&self.current)
    }

    /// Return to the previous level. Returns `false` at the root.
    pub fn drill_up(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.current = DrillDownContext::root();
    }

    fn expect_view(&self, from: ViewLevel, to: ViewLevel) -> Result<(), ContextError> {
        if self.current.view == from {
            Ok(())
        } else {
            Err(ContextError::InvalidTransition {
                from: self.current.view,
                to,
            })
        }
    }

    fn push(&mut self, next: DrillDownContext) {
        let previous = std::mem::replace(&mut self.current, next);
        self.history.push(previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_requires_year_and_publisher() {
        let mut ctx = DrillDownContext {
            view: ViewLevel::Publisher,
            ..Default::default()
        };
        assert_eq!(
            ctx.scope(),
            Err(ContextError::MissingYear {
                view: ViewLevel::Publisher
            })
        );

        ctx.view = ViewLevel::Game;
        ctx.year = Some(2005);
        assert_eq!(ctx.scope(), Err(ContextError::MissingPublisher));

        ctx.publisher = Some(" EA ".to_string());
        assert_eq!(
            ctx.scope(),
            Ok(Scope::Publisher {
                year: 2005,
                publisher: "EA".to_string()
            })
        );
    }

    #[test]
    fn year_view_ignores_stale_fields() {
        let ctx = DrillDownContext {
            view: ViewLevel::Year,
            year: Some(1999),
            publisher: Some("Sega".to_string()),
        };
        assert_eq!(ctx.scope(), Ok(Scope::All));
    }

    #[test]
    fn navigation_round_trip() {
        let mut nav = Navigator::new();
        nav.drill_into_year(2006).unwrap();
        nav.drill_into_publisher("Nintendo").unwrap();
        assert_eq!(nav.current().view, ViewLevel::Game);
        assert_eq!(nav.depth(), 2);

        assert!(nav.drill_up());
        assert_eq!(nav.current(), &DrillDownContext::for_year(2006));
        assert!(nav.drill_up());
        assert_eq!(nav.current(), &DrillDownContext::root());
        assert!(!nav.drill_up());
    }

    #[test]
    fn invalid_transitions_are_rejected() {
        let mut nav = Navigator::new();
        assert_eq!(
            nav.drill_into_publisher("Sega").unwrap_err(),
            ContextError::InvalidTransition {
                from: ViewLevel::Year,
                to: ViewLevel::Game
            }
        );
        nav.drill_into_year(2001).unwrap();
        assert!(nav.drill_into_year(2002).is_err());
        nav.reset();
        assert_eq!(nav.depth(), 0);
    }
}
