//! Core loading logic.
//!
//! This module contains:
//! - ContentStore: write-once holder with completion notification
//! - ContentLoader: fetch, fallback and the startup sequence

pub mod loader;
pub mod store;

// Re-export commonly used types
pub use loader::{ContentLoader, InitError, LoadHandle};
pub use store::{ContentLoaded, ContentStore, StoreError};
