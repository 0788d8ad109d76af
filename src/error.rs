//! Error types for loading blueprint files.

use thiserror::Error;

/// Reasons a blueprint document could not be loaded.
///
/// Either variant leaves the graph that was being replaced untouched.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The text is not well-formed JSON.
    #[error("malformed JSON: {0}")]
    Malformed(#[source] serde_json::Error),
    /// The text is JSON but not a `{ "nodes": [...], "edges": [...] }` document.
    #[error("not a blueprint document: {0}")]
    Shape(#[source] serde_json::Error),
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Data => LoadError::Shape(err),
            _ => LoadError::Malformed(err),
        }
    }
}
