//! The loaded content document.
//!
//! `Content` is kept as an opaque JSON value so that whatever the resource
//! held is handed back exactly. `Article` is a lenient, read-only projection
//! over the `articles` sequence.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Field holding the article sequence
pub const ARTICLES_KEY: &str = "articles";

/// Structured document loaded from the content resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Content(Value);

impl Default for Content {
    /// `{ "articles": [] }`
    fn default() -> Self {
        Self(json!({ "articles": [] }))
    }
}

impl Content {
    /// Wrap an already-parsed value
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parse a raw document
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes).map(Self)
    }

    /// Borrow the underlying value
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume into the underlying value
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Raw `articles` items, or an empty slice when the field is missing
    /// or not a sequence
    pub fn raw_articles(&self) -> &[Value] {
        self.0
            .get(ARTICLES_KEY)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Typed view of the articles. Entries that are not objects are skipped.
    pub fn articles(&self) -> Vec<Article> {
        self.raw_articles()
            .iter()
            .filter_map(Value::as_object)
            .map(Article::from_object)
            .collect()
    }

    /// Number of raw items in `articles`
    pub fn article_count(&self) -> usize {
        self.raw_articles().len()
    }
}

impl From<Value> for Content {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// A single article as read from the content document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub content: String,
    pub date: String,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Article {
    fn from_object(obj: &Map<String, Value>) -> Self {
        let text = |key: &str| {
            obj.get(key)
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_default()
        };

        let tags = obj
            .get("tags")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            title: text("title"),
            content: text("content"),
            date: text("date"),
            author: text("author"),
            tags,
        }
    }
}
