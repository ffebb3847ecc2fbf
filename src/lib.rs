//! Elasticsearch Mapper - infer type mappings from sample JSON documents
//!
//! Provides:
//! - Type classification of JSON documents, with cross-document type checks
//! - Mapping decoration with default or per-field index directives
//! - Default analyzers and filters, and settings file loading
//! - A registry of indices and their type mappings

pub mod inference;
pub mod mapping;
pub mod registry;
pub mod settings;

// Re-export commonly used types
pub use inference::{
    ClassifierConfig, FieldKind, FieldMapping, IndexMode, InferenceError, Properties,
    TypeClassifier, TypeLog, TypeLogKey,
};
pub use mapping::{
    DynamicMapping, FieldOverride, MappingError, MappingResult, TypeMapping, create_mapping,
    create_mapping_with_config, parse_overrides,
};
pub use registry::{IndexEntry, MappingRegistry, RegistryConfig, RegistryError, RegistryResult};
pub use settings::{
    AnalysisConfig, DEFAULT_INDEX_ANALYZER, DEFAULT_SEARCH_ANALYZER, IndexSettings, SettingsError,
    load_overrides, load_settings,
};
