//! Domain types for the content loader.
//!
//! - Content: the loaded document and its typed article view
//! - LoadOutcome: how the startup load finished

pub mod content;
pub mod outcome;

// Re-export commonly used types
pub use content::{Article, Content, ARTICLES_KEY};
pub use outcome::LoadOutcome;
