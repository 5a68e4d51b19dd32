//! JSON document loading from files and HTTP endpoints.

use crate::{Error, Result};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Loads raw JSON documents for the reader.
///
/// Implementations must read a fresh document on every call.
pub trait DocumentLoader {
    /// Reads and parses a JSON file.
    fn load_file(&self, path: &Path) -> Result<Value>;

    /// Fetches and parses a JSON document with an HTTP GET.
    fn load_url(&self, url: &str) -> Result<Value>;
}

/// Loader backed by the filesystem and a blocking HTTP client.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataLoader;

impl DataLoader {
    /// Creates a new loader.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for DataLoader {
    fn load_file(&self, path: &Path) -> Result<Value> {
        debug!("Loading data file {}", path.display());
        let file = File::open(path).map_err(|e| {
            Error::SourceUnavailable(format!("cannot open {}: {}", path.display(), e))
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            Error::SourceUnavailable(format!("cannot parse {}: {}", path.display(), e))
        })
    }

    fn load_url(&self, url: &str) -> Result<Value> {
        debug!("Requesting {}", url);
        let response = reqwest::blocking::get(url)
            .map_err(|e| Error::SourceUnavailable(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::SourceUnavailable(format!(
                "API error: {} returned {}",
                url, status
            )));
        }

        response
            .json::<Value>()
            .map_err(|e| Error::SourceUnavailable(format!("invalid response from {}: {}", url, e)))
    }
}
