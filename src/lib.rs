//! content-loader - Load a static JSON content document
//!
//! Fetches `content.json` once, keeps the result in an injectable store and
//! tells interested listeners when it is ready.
//!
//! # Architecture
//!
//! - A `Source` retrieves raw bytes (HTTP or local file)
//! - `ContentLoader` parses them, falling back to `{ "articles": [] }` on
//!   any failure
//! - `ContentStore` holds the result, written once, readable any time
//! - `ContentLoaded` resolves when the store has been populated
//!
//! # Modules
//!
//! - `adapters`: Content sources (HTTP, file)
//! - `core`: Loading logic (ContentLoader, ContentStore)
//! - `domain`: Data structures (Content, Article, LoadOutcome)
//! - `config`: Source location resolution
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```no_run
//! use content_loader::{config, ContentLoader, ContentStore};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let store = ContentStore::new();
//! let loader = ContentLoader::from_config(&config::load_config()?)?;
//!
//! let mut loaded = store.subscribe();
//! let handle = loader.spawn(store.clone());
//!
//! // Safe to read at any time; empty until the load finishes
//! let _early = store.get();
//!
//! loaded.wait().await;
//! println!("{} articles", store.get().articles().len());
//! handle.wait().await?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use adapters::{FileSource, HttpSource, LoadError, LoadFailureKind, Source};
pub use config::{ContentBase, LoaderConfig};
pub use self::core::{ContentLoaded, ContentLoader, ContentStore, InitError, LoadHandle, StoreError};
pub use domain::{Article, Content, LoadOutcome};
