//! Acquisition sources.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Acquisition path selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    /// Local JSON data file keyed by location.
    #[default]
    File,
    /// Remote weather API endpoint.
    Api,
}

impl FromStr for SourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "file" => Ok(SourceKind::File),
            "api" => Ok(SourceKind::Api),
            _ => Err(Error::InvalidSource(s.to_string())),
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::File => write!(f, "file"),
            SourceKind::Api => write!(f, "api"),
        }
    }
}

/// Where a sensor reads its data from, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Data file path.
    File(PathBuf),
    /// API endpoint URL.
    Api(String),
}

impl Source {
    /// Builds a source from its kind name and both path parameters.
    ///
    /// Only the parameter matching the kind is used. An `api` source
    /// requires a non-empty endpoint.
    pub fn from_parts(kind: &str, file_path: &Path, api_endpoint: &str) -> Result<Self> {
        match kind.parse::<SourceKind>()? {
            SourceKind::File => Ok(Source::File(file_path.to_path_buf())),
            SourceKind::Api => {
                let endpoint = api_endpoint.trim();
                if endpoint.is_empty() {
                    return Err(Error::InvalidSource(
                        "api source requires an endpoint".to_string(),
                    ));
                }
                Ok(Source::Api(endpoint.to_string()))
            }
        }
    }

    /// Returns the source kind.
    pub fn kind(&self) -> SourceKind {
        match self {
            Source::File(_) => SourceKind::File,
            Source::Api(_) => SourceKind::Api,
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::File(path) => write!(f, "file:{}", path.display()),
            Source::Api(endpoint) => write!(f, "api:{}", endpoint),
        }
    }
}
