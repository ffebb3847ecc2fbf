//! Error types for registry operations

use thiserror::Error;

use crate::mapping::MappingError;

/// Errors that can occur in [`MappingRegistry`](super::MappingRegistry) operations
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Index is not registered
    #[error("Index not found: {0}")]
    IndexNotFound(String),

    /// Type has no mapping in the index
    #[error("Type '{type_name}' not found in index '{index}'")]
    TypeNotFound { index: String, type_name: String },

    /// Index level dynamic mapping is required but disabled
    #[error(
        "Index level dynamic mapping is disabled in index '{0}'. Enable index level dynamic mappings or use type level dynamic mappings"
    )]
    IndexLevelDynamicDisabled(String),

    /// Type level dynamic mapping is blocked by the index level flag
    #[error("Index level dynamic mappings is active in index '{0}'. Disable and try again")]
    IndexLevelDynamicActive(String),

    /// Mapping generation failed
    #[error(transparent)]
    Mapping(#[from] MappingError),
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;
