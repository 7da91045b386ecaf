//! Sources the content document can be read from.
//!
//! A source only retrieves raw bytes; parsing and fallback handling live in
//! the loader. Two sources exist:
//! - `HttpSource`: GET against an `http(s)` URL
//! - `FileSource`: read from a local directory

pub mod file;
pub mod http;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{ContentBase, LoaderConfig};

// Re-export the sources
pub use file::FileSource;
pub use http::HttpSource;

/// Media type requested for the content document
pub const CONTENT_MEDIA_TYPE: &str = "application/json";

/// Reasons a content load can fail
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("content is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid content location '{location}': {reason}")]
    InvalidLocation { location: String, reason: String },
}

/// Coarse classification of a `LoadError`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailureKind {
    /// The bytes could not be retrieved
    Transport,

    /// The bytes were retrieved but are not structured data
    Parse,
}

impl LoadError {
    pub fn kind(&self) -> LoadFailureKind {
        match self {
            LoadError::Parse(_) => LoadFailureKind::Parse,
            LoadError::Request { .. }
            | LoadError::Status { .. }
            | LoadError::Read { .. }
            | LoadError::InvalidLocation { .. } => LoadFailureKind::Transport,
        }
    }
}

/// Something the content document can be fetched from
#[async_trait]
pub trait Source: Send + Sync {
    /// Human-readable source name
    fn name(&self) -> &str;

    /// Fully resolved location of the document
    fn location(&self) -> String;

    /// Retrieve the raw document bytes
    async fn fetch(&self) -> Result<Vec<u8>, LoadError>;
}

/// Build the source described by a config
pub fn source_for(config: &LoaderConfig) -> Result<Box<dyn Source>, LoadError> {
    match &config.base {
        ContentBase::Url(base) => Ok(Box::new(HttpSource::from_base(
            base,
            &config.path,
            config.timeout(),
        )?)),
        ContentBase::Dir(dir) => Ok(Box::new(FileSource::new(dir.join(&config.path)))),
    }
}
