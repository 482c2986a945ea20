//! Catalog store
//!
//! Reads the catalog document from disk on every call. Nothing is kept
//! between requests, so edits to the file show up on the next request.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;

use super::model::Catalog;

/// Why the catalog could not be produced. Every variant maps to HTTP 500.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Data file not found")]
    Missing(#[source] io::Error),

    #[error("Error reading data file")]
    Read(#[source] io::Error),

    #[error("Error parsing data file")]
    Parse(#[from] serde_json::Error),
}

impl From<io::Error> for CatalogError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Self::Missing(err)
        } else {
            Self::Read(err)
        }
    }
}

impl CatalogError {
    /// Underlying cause, for the error log
    pub fn detail(&self) -> String {
        match self {
            Self::Missing(e) | Self::Read(e) => e.to_string(),
            Self::Parse(e) => e.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open, fully read, and parse the document
    pub async fn load(&self) -> Result<Catalog, CatalogError> {
        let bytes = fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
