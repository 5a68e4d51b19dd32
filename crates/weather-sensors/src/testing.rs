//! Shared test fixtures.

use crate::{DocumentLoader, Error, Result};
use serde_json::Value;
use std::cell::Cell;
use std::path::{Path, PathBuf};

/// Path of the bundled sample data file.
pub fn sample_data_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/data.json")
}

/// Loader returning a canned document and counting calls.
pub struct StubLoader {
    response: Option<Value>,
    calls: Cell<usize>,
}

impl StubLoader {
    /// Answers every load with `value`.
    pub fn new(value: Value) -> Self {
        Self {
            response: Some(value),
            calls: Cell::new(0),
        }
    }

    /// Fails every load like an unreachable source.
    pub fn unavailable() -> Self {
        Self {
            response: None,
            calls: Cell::new(0),
        }
    }

    /// Number of load calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn respond(&self) -> Result<Value> {
        self.calls.set(self.calls.get() + 1);
        self.response
            .clone()
            .ok_or_else(|| Error::SourceUnavailable("API error: 503".to_string()))
    }
}

impl DocumentLoader for StubLoader {
    fn load_file(&self, _path: &Path) -> Result<Value> {
        self.respond()
    }

    fn load_url(&self, _url: &str) -> Result<Value> {
        self.respond()
    }
}
