//! Error types for mapping generation

use thiserror::Error;

use crate::inference::InferenceError;

/// Errors that can occur while generating a mapping
#[derive(Error, Debug)]
pub enum MappingError {
    /// Document could not be classified
    #[error(transparent)]
    Inference(#[from] InferenceError),

    /// Override list is not a list
    #[error("Invalid override list: {0}")]
    InvalidOverrideList(String),

    /// A single override entry is malformed
    #[error("Invalid override at position {position}: {reason}")]
    InvalidOverride { position: usize, reason: String },

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for mapping operations
pub type MappingResult<T> = Result<T, MappingError>;
