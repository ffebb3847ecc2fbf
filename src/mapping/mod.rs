//! Mapping generation from sample documents
//!
//! This module runs the two stage pipeline:
//! - classify the document into a structural mapping (see [`crate::inference`])
//! - decorate every field with index directives, either with the default
//!   policy or from a list of [`FieldOverride`]s
//!
//! # Example
//!
//! ```rust
//! use elasticsearch_mapper::mapping::{FieldOverride, create_mapping};
//! use elasticsearch_mapper::settings::IndexSettings;
//! use serde_json::json;
//!
//! let document = json!({"name": "Bingo", "profile": {"origin": "Lagos"}});
//! let overrides = vec![FieldOverride::new("profile.origin", false)];
//!
//! let mapping = create_mapping(&document, &IndexSettings::default(), &overrides, "animals", None)?;
//! println!("{}", serde_json::to_string_pretty(&mapping)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod decorator;
mod error;
mod overrides;
mod types;

pub use decorator::{decorate_custom, decorate_default};
pub use error::{MappingError, MappingResult};
pub use overrides::{FieldOverride, parse_overrides, validate_overrides};
pub use types::{AllField, DynamicMapping, TypeMapping};

use serde_json::Value;
use tracing::debug;

use crate::inference::{ClassifierConfig, TypeClassifier, TypeLog};
use crate::settings::IndexSettings;

/// Generate the mapping of a document with the default classifier configuration
///
/// Uses the custom policy when `overrides` is non-empty, the default policy
/// otherwise. `dynamic` follows the settings' dynamic flag, absent meaning
/// disabled.
pub fn create_mapping(
    document: &Value,
    settings: &IndexSettings,
    overrides: &[FieldOverride],
    scope: &str,
    type_log: Option<&mut TypeLog>,
) -> MappingResult<TypeMapping> {
    create_mapping_with_config(
        &ClassifierConfig::default(),
        document,
        settings,
        overrides,
        scope,
        type_log,
    )
}

/// Generate the mapping of a document with a custom classifier configuration
pub fn create_mapping_with_config(
    config: &ClassifierConfig,
    document: &Value,
    settings: &IndexSettings,
    overrides: &[FieldOverride],
    scope: &str,
    type_log: Option<&mut TypeLog>,
) -> MappingResult<TypeMapping> {
    validate_overrides(overrides)?;

    let classifier = TypeClassifier::with_config(config.clone());
    let structure = classifier.classify(document, scope, type_log)?;

    let properties = if overrides.is_empty() {
        decorate_default(structure)
    } else {
        decorate_custom(structure, settings, overrides)
    };

    debug!(
        scope,
        overrides = overrides.len(),
        dynamic = settings.dynamic_enabled(),
        "Created mapping"
    );
    Ok(TypeMapping::new(properties, settings.dynamic_enabled()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{FieldKind, IndexMode, InferenceError};
    use crate::settings::{DEFAULT_INDEX_ANALYZER, DEFAULT_SEARCH_ANALYZER};
    use serde_json::json;

    #[test]
    fn test_end_to_end_default_policy() {
        let mapping = create_mapping(
            &json!({"name": "Bingo", "age": 15, "words": ["a", "b"]}),
            &IndexSettings::default(),
            &[],
            "animals",
            None,
        )
        .unwrap();

        let json = serde_json::to_value(&mapping).unwrap();
        assert_eq!(
            json,
            json!({
                "_all": {"enabled": false},
                "dynamic": "false",
                "properties": {
                    "name": {
                        "type": "string",
                        "index_analyzer": DEFAULT_INDEX_ANALYZER,
                        "search_analyzer": DEFAULT_SEARCH_ANALYZER
                    },
                    "age": {"type": "double", "index": "no"},
                    "words": {
                        "type": "string",
                        "index_analyzer": DEFAULT_INDEX_ANALYZER,
                        "search_analyzer": DEFAULT_SEARCH_ANALYZER
                    }
                }
            })
        );
    }

    #[test]
    fn test_dynamic_flag() {
        let doc = json!({"a": 1});
        let mut settings = IndexSettings::default();

        settings.dynamic = Some(true);
        let mapping = create_mapping(&doc, &settings, &[], "s", None).unwrap();
        assert_eq!(mapping.dynamic, DynamicMapping::Enabled);

        settings.dynamic = Some(false);
        let mapping = create_mapping(&doc, &settings, &[], "s", None).unwrap();
        assert_eq!(mapping.dynamic, DynamicMapping::Disabled);

        settings.dynamic = None;
        let mapping = create_mapping(&doc, &settings, &[], "s", None).unwrap();
        assert_eq!(mapping.dynamic, DynamicMapping::Disabled);
    }

    #[test]
    fn test_override_rerooting() {
        let mapping = create_mapping(
            &json!({"p": {"q": "v"}}),
            &IndexSettings::default(),
            &[FieldOverride::new("p.q", false)],
            "s",
            None,
        )
        .unwrap();

        assert_eq!(
            mapping.field("p.q").and_then(|n| n.index),
            Some(IndexMode::NotAnalyzed)
        );
        assert_eq!(mapping.field("p").map(|n| n.kind), Some(FieldKind::Object));
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let err = create_mapping(
            &json!({"a": "x"}),
            &IndexSettings::default(),
            &[FieldOverride::new("a..b", true)],
            "s",
            None,
        )
        .unwrap_err();
        assert!(matches!(err, MappingError::InvalidOverride { position: 0, .. }));
    }

    #[test]
    fn test_conflict_returns_no_mapping() {
        let mut log = TypeLog::new();
        let settings = IndexSettings::default();

        create_mapping(&json!({"a": "x"}), &settings, &[], "s", Some(&mut log)).unwrap();
        let err =
            create_mapping(&json!({"a": 5}), &settings, &[], "s", Some(&mut log)).unwrap_err();

        assert!(matches!(
            err,
            MappingError::Inference(InferenceError::TypeConflict {
                expected: FieldKind::String,
                observed: FieldKind::Double,
                ..
            })
        ));
    }
}
