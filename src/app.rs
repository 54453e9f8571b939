//! Gamedata Application
//! Owns the chart state and runs the dataset load on a background thread.

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::charts::{GameSelection, ImageLookup, PieData};
use crate::config::AppConfig;
use crate::data::{DataSource, DatasetLoader, LoadError, LoadReport, LoadedDataset};
use crate::view::{ChartState, ContextError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("no dataset load is in progress")]
    NotLoading,
    #[error("dataset load thread exited without a result")]
    LoadAborted,
}

/// Message from the background load thread.
enum LoadResult {
    Progress(String),
    Complete(LoadedDataset),
    Error(LoadError),
}

/// Top-level application object.
pub struct App {
    loader: DatasetLoader,
    state: ChartState,
    selection: GameSelection,

    // Async dataset loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_lookup(config, ImageLookup::from_entropy())
    }

    /// Build with a specific image lookup, e.g. a seeded one.
    pub fn with_lookup(config: &AppConfig, lookup: ImageLookup) -> Self {
        Self {
            loader: DatasetLoader::new(config.http_timeout()),
            state: ChartState::new(),
            selection: GameSelection::new(lookup),
            load_rx: None,
            is_loading: false,
        }
    }

    pub fn state(&self) -> &ChartState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ChartState {
        &mut self.state
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Kick off a dataset load in the background.
    ///
    /// Ignored while a previous load is still in flight.
    pub fn start_load(&mut self, source: DataSource) {
        if self.is_loading {
            warn!(%source, "dataset load already in progress");
            return;
        }

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        self.is_loading = true;

        let loader = self.loader.clone();
        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress(format!("Reading {source}...")));

            match loader.load(&source) {
                Ok(dataset) => {
                    let _ = tx.send(LoadResult::Complete(dataset));
                }
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e));
                }
            }
        });
    }

    /// Drain pending load messages without blocking.
    ///
    /// Returns `None` while the load is still running or when none was started.
    pub fn poll_load(&mut self) -> Option<Result<LoadReport, AppError>> {
        let rx = self.load_rx.take()?;

        loop {
            match rx.try_recv() {
                Ok(LoadResult::Progress(status)) => debug!(%status, "load progress"),
                Ok(LoadResult::Complete(dataset)) => return Some(self.commit(dataset)),
                Ok(LoadResult::Error(error)) => return Some(self.fail(error)),
                Err(TryRecvError::Empty) => {
                    self.load_rx = Some(rx);
                    return None;
                }
                Err(TryRecvError::Disconnected) => {
                    self.is_loading = false;
                    return Some(Err(AppError::LoadAborted));
                }
            }
        }
    }

    /// Block until the in-flight load finishes and commit its result.
    pub fn wait_for_load(&mut self) -> Result<LoadReport, AppError> {
        let rx = self.load_rx.take().ok_or(AppError::NotLoading)?;

        for message in rx.iter() {
            match message {
                LoadResult::Progress(status) => debug!(%status, "load progress"),
                LoadResult::Complete(dataset) => return self.commit(dataset),
                LoadResult::Error(error) => return self.fail(error),
            }
        }

        self.is_loading = false;
        Err(AppError::LoadAborted)
    }

    /// Load on the calling thread.
    pub fn load_blocking(&mut self, source: &DataSource) -> Result<LoadReport, AppError> {
        match self.loader.load(source) {
            Ok(dataset) => self.commit(dataset),
            Err(error) => self.fail(error),
        }
    }

    pub fn recompute(&mut self) -> Result<&PieData, AppError> {
        Ok(self.state.recompute()?)
    }

    /// Select a game and resolve its `(comment, word cloud)` images.
    pub fn select_game(&mut self, name: &str) -> (String, String) {
        self.selection.set_selected_game(name);
        (
            self.selection.comment_image(),
            self.selection.wordcloud_image(),
        )
    }

    fn commit(&mut self, dataset: LoadedDataset) -> Result<LoadReport, AppError> {
        self.is_loading = false;
        let report = dataset.report;
        self.state.replace_records(dataset.records)?;
        info!(records = report.rows_kept, "working set replaced");
        Ok(report)
    }

    fn fail(&mut self, error: LoadError) -> Result<LoadReport, AppError> {
        self.is_loading = false;
        warn!(error = %error, "dataset load failed; keeping previous working set");
        Err(error.into())
    }
}
