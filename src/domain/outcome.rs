//! Record of how a load attempt finished.

use serde::{Deserialize, Serialize};

/// Which path the startup load took
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadOutcome {
    /// Resource fetched and parsed
    Loaded,

    /// Load failed and the default content was substituted
    Fallback {
        /// Display form of the error that was masked
        reason: String,
    },
}

impl LoadOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, LoadOutcome::Fallback { .. })
    }
}

impl std::fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadOutcome::Loaded => write!(f, "loaded"),
            LoadOutcome::Fallback { reason } => write!(f, "fallback ({})", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&LoadOutcome::Loaded).unwrap();
        assert_eq!(json, r#"{"status":"loaded"}"#);

        let fallback = LoadOutcome::Fallback {
            reason: "HTTP 404".to_string(),
        };
        let json = serde_json::to_string(&fallback).unwrap();
        assert_eq!(json, r#"{"status":"fallback","reason":"HTTP 404"}"#);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(LoadOutcome::Loaded.to_string(), "loaded");
        assert!(!LoadOutcome::Loaded.is_fallback());

        let fallback = LoadOutcome::Fallback {
            reason: "boom".to_string(),
        };
        assert_eq!(fallback.to_string(), "fallback (boom)");
        assert!(fallback.is_fallback());
    }
}
