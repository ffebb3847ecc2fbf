//! Error types for type classification

use thiserror::Error;

use super::types::FieldKind;

/// Errors that can occur while classifying a document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// Invalid JSON structure (not an object at root)
    #[error("Invalid JSON structure: expected object at root, found {0}")]
    InvalidStructure(String),

    /// Maximum depth exceeded
    #[error("Maximum nesting depth exceeded: {depth} > {max}")]
    MaxDepthExceeded { depth: usize, max: usize },

    /// A field was previously recorded with another type in the same index
    #[error(
        "Type conflict for field '{field}' in index '{scope}': expected {expected}, found {observed}"
    )]
    TypeConflict {
        field: String,
        scope: String,
        expected: FieldKind,
        observed: FieldKind,
    },
}

impl From<serde_json::Error> for InferenceError {
    fn from(e: serde_json::Error) -> Self {
        InferenceError::JsonParse(e.to_string())
    }
}
