//! The content loader.
//!
//! Performs a single fetch of the content document, masks any failure with
//! the default content, stores the result and announces completion.

use std::time::Instant;

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::store::{ContentStore, StoreError};
use crate::adapters::{self, LoadError, Source};
use crate::config::LoaderConfig;
use crate::domain::{Content, LoadOutcome};

/// Errors from the startup sequence
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("content load task did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Loads the content document from a source
pub struct ContentLoader {
    source: Box<dyn Source>,
}

impl ContentLoader {
    /// Create a loader over any source
    pub fn new(source: impl Source + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Create a loader for the source a config describes
    pub fn from_config(config: &LoaderConfig) -> Result<Self, LoadError> {
        Ok(Self {
            source: adapters::source_for(config)?,
        })
    }

    pub fn source(&self) -> &dyn Source {
        self.source.as_ref()
    }

    /// Fetch and parse, surfacing every failure
    pub async fn try_fetch(&self) -> Result<Content, LoadError> {
        let bytes = self.source.fetch().await?;
        Ok(Content::from_slice(&bytes)?)
    }

    /// Fetch and parse, substituting the default content on any failure
    pub async fn fetch_content(&self) -> Content {
        self.fetch_with_outcome().await.0
    }

    async fn fetch_with_outcome(&self) -> (Content, LoadOutcome) {
        let location = self.source.location();
        let started = Instant::now();
        debug!(source = self.source.name(), %location, "loading content");

        match self.try_fetch().await {
            Ok(content) => {
                info!(
                    %location,
                    articles = content.article_count(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    "content loaded"
                );
                (content, LoadOutcome::Loaded)
            }
            Err(e) => {
                error!(%location, kind = ?e.kind(), error = %e, "Error loading content");
                let outcome = LoadOutcome::Fallback {
                    reason: e.to_string(),
                };
                (Content::default(), outcome)
            }
        }
    }

    /// Run the startup sequence against `store`: fetch once, store the
    /// result and fire the completion notification.
    ///
    /// A store that was already loaded (or is being loaded) is left alone
    /// and no fetch happens. Dropping this future before it finishes
    /// releases the store for another load.
    pub async fn init(&self, store: &ContentStore) -> Result<LoadOutcome, StoreError> {
        let claim = store.claim()?;

        let (content, outcome) = self.fetch_with_outcome().await;
        claim.publish(content, outcome.clone())?;

        debug!(%outcome, "content-loaded notification sent");
        Ok(outcome)
    }

    /// Run the startup sequence in the background
    pub fn spawn(self, store: ContentStore) -> LoadHandle {
        let handle = tokio::spawn(async move { self.init(&store).await });
        LoadHandle { handle }
    }
}

/// Handle to a background startup sequence
#[derive(Debug)]
pub struct LoadHandle {
    handle: JoinHandle<Result<LoadOutcome, StoreError>>,
}

impl LoadHandle {
    /// Wait for the background load to finish
    pub async fn wait(self) -> Result<LoadOutcome, InitError> {
        Ok(self.handle.await??)
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
