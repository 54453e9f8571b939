//! Dataset Source Module
//! Resolves where the CSV bytes come from: a local file or an HTTP(S) URL.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use super::loader::LoadError;

/// Location of a delimited text dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// Interpret a user-supplied location. Anything with an http(s) scheme is a URL.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::File(PathBuf::from(trimmed))
        }
    }

    /// Fetch the raw bytes of the resource.
    pub fn fetch(&self, timeout: Duration) -> Result<Vec<u8>, LoadError> {
        match self {
            DataSource::File(path) => std::fs::read(path).map_err(|err| LoadError::Unreachable {
                source_name: path.display().to_string(),
                reason: err.to_string(),
            }),
            DataSource::Url(url) => fetch_url(url, timeout),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

fn fetch_url(url: &str, timeout: Duration) -> Result<Vec<u8>, LoadError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|err| LoadError::Http(err.to_string()))?;

    let response = client
        .get(url)
        .send()
        .map_err(|err| LoadError::Unreachable {
            source_name: url.to_string(),
            reason: err.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    response
        .bytes()
        .map(|bytes| bytes.to_vec())
        .map_err(|err| LoadError::Http(err.to_string()))
}
