//! Configuration Module
//! Optional JSON settings locating the dataset.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::DataSource;

pub const DEFAULT_CONFIG_FILE: &str = "gamedata.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file at {0}")]
    Read(PathBuf),
    #[error("failed to parse JSON config: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Directory or URL prefix the dataset is served from.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_dataset_file")]
    pub dataset_file: String,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            dataset_file: default_dataset_file(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Where the dataset lives: `base_url` joined with `dataset_file`.
    pub fn dataset_source(&self) -> DataSource {
        let base = self.base_url.trim_end_matches('/');
        let file = self.dataset_file.trim_start_matches('/');
        if base.is_empty() {
            DataSource::parse(file)
        } else {
            DataSource::parse(&format!("{base}/{file}"))
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn default_base_url() -> String {
    "/gamedata/".to_string()
}

fn default_dataset_file() -> String {
    "Video_Games.csv".to_string()
}

fn default_http_timeout_secs() -> u64 {
    30
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load an explicit config file, or `gamedata.json` if present, or defaults.
    pub fn resolve(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if path.is_none() && !config_path.exists() {
            return Ok(AppConfig::default());
        }

        let content =
            fs::read_to_string(&config_path).map_err(|_| ConfigError::Read(config_path.clone()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<AppConfig, ConfigError> {
        serde_json::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }
}
