//! Write-once holder for the loaded content.
//!
//! A `ContentStore` is cheap to clone; every clone shares the same slot.
//! Readers never block: before the load completes they see the default
//! content. Completion is announced exactly once through a `watch` channel
//! so listeners that subscribe late still observe it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use thiserror::Error;
use tokio::sync::watch;

use crate::domain::{Content, LoadOutcome};

/// Errors from writing to the store
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("content has already been loaded into this store")]
    AlreadyLoaded,
}

struct Loaded {
    content: Content,
    outcome: LoadOutcome,
}

struct Inner {
    /// Set once a load has been claimed, so only one fetch is started
    claimed: AtomicBool,
    slot: OnceLock<Loaded>,
    loaded_tx: watch::Sender<bool>,
}

/// Shared, injectable content holder
#[derive(Clone)]
pub struct ContentStore {
    inner: Arc<Inner>,
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentStore")
            .field("loaded", &self.is_loaded())
            .field("outcome", &self.outcome())
            .finish()
    }
}

impl ContentStore {
    /// Create an empty store
    pub fn new() -> Self {
        let (loaded_tx, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                claimed: AtomicBool::new(false),
                slot: OnceLock::new(),
                loaded_tx,
            }),
        }
    }

    /// Current content, or the default when nothing is loaded yet
    pub fn get(&self) -> Content {
        self.inner
            .slot
            .get()
            .map(|loaded| loaded.content.clone())
            .unwrap_or_default()
    }

    /// How the load finished, if it has
    pub fn outcome(&self) -> Option<LoadOutcome> {
        self.inner.slot.get().map(|loaded| loaded.outcome.clone())
    }

    /// Whether the completion notification has fired
    pub fn is_loaded(&self) -> bool {
        self.inner.slot.get().is_some()
    }

    /// Listen for the completion notification
    pub fn subscribe(&self) -> ContentLoaded {
        ContentLoaded {
            rx: self.inner.loaded_tx.subscribe(),
            _inner: Arc::clone(&self.inner),
        }
    }

    /// Reserve the right to load. Only the first caller succeeds.
    ///
    /// The reservation is released if the returned claim is dropped
    /// without publishing.
    pub(crate) fn claim(&self) -> Result<LoadClaim, StoreError> {
        self.inner
            .claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| StoreError::AlreadyLoaded)?;

        Ok(LoadClaim {
            store: self.clone(),
            published: false,
        })
    }

    /// Store content and fire the completion notification.
    ///
    /// Succeeds at most once per store.
    pub(crate) fn publish(&self, content: Content, outcome: LoadOutcome) -> Result<(), StoreError> {
        self.inner.claimed.store(true, Ordering::Release);
        self.inner
            .slot
            .set(Loaded { content, outcome })
            .map_err(|_| StoreError::AlreadyLoaded)?;

        self.inner.loaded_tx.send_replace(true);
        Ok(())
    }
}

/// Exclusive right to load a store, held for the duration of a fetch
#[must_use]
pub(crate) struct LoadClaim {
    store: ContentStore,
    published: bool,
}

impl LoadClaim {
    /// Publish through the claim, consuming it
    pub(crate) fn publish(mut self, content: Content, outcome: LoadOutcome) -> Result<(), StoreError> {
        self.store.publish(content, outcome)?;
        self.published = true;
        Ok(())
    }
}

impl Drop for LoadClaim {
    fn drop(&mut self) {
        // Abandoned mid-fetch: let a later load try again
        if !self.published && !self.store.is_loaded() {
            self.store.inner.claimed.store(false, Ordering::Release);
        }
    }
}

/// Listener for the one-time completion notification
pub struct ContentLoaded {
    rx: watch::Receiver<bool>,
    /// Keeps the sender alive so `wait` only resolves on a real notification
    _inner: Arc<Inner>,
}

impl std::fmt::Debug for ContentLoaded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentLoaded")
            .field("fired", &self.has_fired())
            .finish()
    }
}

impl ContentLoaded {
    /// Resolve once the content has been stored. Returns immediately if
    /// that already happened.
    ///
    /// The listener keeps the store alive, so if nothing ever loads it this
    /// never resolves.
    pub async fn wait(&mut self) {
        // The sender is owned by `_inner`, so the channel cannot close here
        let _ = self.rx.wait_for(|loaded| *loaded).await;
    }

    pub fn has_fired(&self) -> bool {
        *self.rx.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use tokio_test::{assert_pending, assert_ready};

    #[test]
    fn test_empty_store_returns_default() {
        let store = ContentStore::new();
        assert_eq!(store.get(), Content::default());
        assert!(!store.is_loaded());
        assert!(store.outcome().is_none());
    }

    #[test]
    fn test_publish_is_write_once() {
        let store = ContentStore::new();
        let first = Content::new(json!({ "articles": [{ "id": 1 }] }));
        let second = Content::new(json!({ "articles": [{ "id": 2 }] }));

        store.publish(first.clone(), LoadOutcome::Loaded).unwrap();
        assert_eq!(
            store.publish(second, LoadOutcome::Loaded),
            Err(StoreError::AlreadyLoaded)
        );

        assert_eq!(store.get(), first);
        assert_eq!(store.get(), first);
        assert_eq!(store.outcome(), Some(LoadOutcome::Loaded));
    }

    #[test]
    fn test_clones_share_slot() {
        let store = ContentStore::new();
        let reader = store.clone();

        store
            .publish(Content::new(json!({ "articles": [] , "v": 2 })), LoadOutcome::Loaded)
            .unwrap();

        assert!(reader.is_loaded());
        assert_eq!(reader.get().as_value()["v"], 2);
    }

    #[test]
    fn test_claim_only_once() {
        let store = ContentStore::new();
        let _claim = store.claim().unwrap();
        assert!(matches!(store.claim(), Err(StoreError::AlreadyLoaded)));
    }

    #[test]
    fn test_dropped_claim_is_released() {
        let store = ContentStore::new();
        drop(store.claim().unwrap());

        let claim = store.claim().unwrap();
        claim.publish(Content::default(), LoadOutcome::Loaded).unwrap();
        assert!(store.is_loaded());

        // Published claims stay taken
        assert!(matches!(store.claim(), Err(StoreError::AlreadyLoaded)));
    }

    #[tokio::test]
    async fn test_listener_outlives_store_handles() {
        let store = ContentStore::new();
        let mut listener = store.subscribe();
        drop(store);

        let waited = tokio::time::timeout(Duration::from_millis(50), listener.wait()).await;
        assert!(waited.is_err(), "wait resolved without a notification");
        assert!(!listener.has_fired());
    }

    #[tokio::test]
    async fn test_listener_fires_after_original_handle_dropped() {
        let store = ContentStore::new();
        let writer = store.clone();
        let mut listener = store.subscribe();
        drop(store);

        writer.publish(Content::default(), LoadOutcome::Loaded).unwrap();
        listener.wait().await;
        assert!(listener.has_fired());
    }

    #[test]
    fn test_listener_wakes_on_publish() {
        let store = ContentStore::new();
        let mut listener = store.subscribe();
        assert!(!listener.has_fired());

        let mut wait = tokio_test::task::spawn(listener.wait());
        assert_pending!(wait.poll());

        store.publish(Content::default(), LoadOutcome::Loaded).unwrap();
        assert!(wait.is_woken());
        assert_ready!(wait.poll());
    }

    #[tokio::test]
    async fn test_late_listener_sees_fired_notification() {
        let store = ContentStore::new();
        store
            .publish(
                Content::default(),
                LoadOutcome::Fallback {
                    reason: "offline".to_string(),
                },
            )
            .unwrap();

        let mut listener = store.subscribe();
        assert!(listener.has_fired());
        listener.wait().await;
        assert!(store.outcome().unwrap().is_fallback());
    }
}
