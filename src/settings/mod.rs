//! Index settings: analyzers, filters and the dynamic mapping flag
//!
//! The defaults work for most schemas: string fields are indexed with an
//! edge n-gram analyzer (minimum token length 3, maximum 15) and searched
//! with a whitespace analyzer. Dynamic mapping is disabled. More analyzers and
//! filters can be merged in with [`IndexSettings::merge`].

mod loader;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub use loader::{SettingsError, load_overrides, load_settings};

/// Index-time analyzer attached to tokenized string fields by default
pub const DEFAULT_INDEX_ANALYZER: &str = "edgeNGram_analyzer";

/// Search-time analyzer attached to tokenized string fields by default
pub const DEFAULT_SEARCH_ANALYZER: &str = "whitespace_analyzer";

/// Filter used by the default index analyzer
pub const DEFAULT_FILTER: &str = "edgeNGram_filter";

/// Named analyzer and filter definitions
///
/// Definitions are kept as opaque JSON; only their names matter here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default)]
    pub filter: BTreeMap<String, Value>,
    #[serde(default)]
    pub analyzer: BTreeMap<String, Value>,
}

/// Settings of one index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSettings {
    /// Index level dynamic mapping flag; absent means type level control
    #[serde(
        rename = "index.mapper.dynamic",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dynamic: Option<bool>,
    #[serde(default)]
    pub analysis: Analysis,
}

/// Extra analyzers and filters to register
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub filters: BTreeMap<String, Value>,
    #[serde(default)]
    pub analyzers: BTreeMap<String, Value>,
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter definition
    pub fn with_filter(mut self, name: impl Into<String>, definition: Value) -> Self {
        self.filters.insert(name.into(), definition);
        self
    }

    /// Add an analyzer definition
    pub fn with_analyzer(mut self, name: impl Into<String>, definition: Value) -> Self {
        self.analyzers.insert(name.into(), definition);
        self
    }
}

impl Default for IndexSettings {
    fn default() -> Self {
        let mut analysis = Analysis::default();
        analysis.filter.insert(
            DEFAULT_FILTER.to_string(),
            json!({
                "type": "edgeNGram",
                "min_gram": 3,
                "max_gram": 15,
                "token_chars": ["letter", "digit", "punctuation", "symbol"]
            }),
        );
        analysis.analyzer.insert(
            DEFAULT_INDEX_ANALYZER.to_string(),
            json!({
                "type": "custom",
                "tokenizer": "standard",
                "filter": ["lowercase", "asciifolding", DEFAULT_FILTER]
            }),
        );
        analysis.analyzer.insert(
            DEFAULT_SEARCH_ANALYZER.to_string(),
            json!({
                "type": "custom",
                "tokenizer": "whitespace",
                "filter": ["lowercase", "asciifolding"]
            }),
        );

        Self {
            dynamic: Some(false),
            analysis,
        }
    }
}

impl IndexSettings {
    /// Settings without any analyzer, filter or dynamic flag
    pub fn empty() -> Self {
        Self {
            dynamic: None,
            analysis: Analysis::default(),
        }
    }

    /// Whether the dynamic flag is present and set
    pub fn dynamic_enabled(&self) -> bool {
        self.dynamic.unwrap_or(false)
    }

    pub fn has_analyzer(&self, name: &str) -> bool {
        self.analysis.analyzer.contains_key(name)
    }

    pub fn has_filter(&self, name: &str) -> bool {
        self.analysis.filter.contains_key(name)
    }

    /// Register extra filters and analyzers, replacing same-named ones
    pub fn merge(&mut self, config: AnalysisConfig) {
        self.analysis.filter.extend(config.filters);
        self.analysis.analyzer.extend(config.analyzers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = IndexSettings::default();
        assert_eq!(settings.dynamic, Some(false));
        assert!(!settings.dynamic_enabled());
        assert!(settings.has_analyzer(DEFAULT_INDEX_ANALYZER));
        assert!(settings.has_analyzer(DEFAULT_SEARCH_ANALYZER));
        assert!(settings.has_filter(DEFAULT_FILTER));
        assert_eq!(settings.analysis.filter[DEFAULT_FILTER]["min_gram"], 3);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(IndexSettings::default()).unwrap();
        assert_eq!(json["index.mapper.dynamic"], false);
        assert_eq!(
            json["analysis"]["analyzer"]["whitespace_analyzer"]["tokenizer"],
            "whitespace"
        );

        let json = serde_json::to_value(IndexSettings::empty()).unwrap();
        assert!(json.get("index.mapper.dynamic").is_none());
    }

    #[test]
    fn test_missing_dynamic_flag_deserializes_as_none() {
        let settings: IndexSettings =
            serde_json::from_str(r#"{"analysis": {"analyzer": {"a": {}}}}"#).unwrap();
        assert_eq!(settings.dynamic, None);
        assert!(settings.has_analyzer("a"));
        assert!(settings.analysis.filter.is_empty());
    }

    #[test]
    fn test_merge() {
        let mut settings = IndexSettings::default();
        settings.merge(
            AnalysisConfig::new()
                .with_analyzer("keyword_lower", json!({"tokenizer": "keyword"}))
                .with_filter(DEFAULT_FILTER, json!({"type": "edgeNGram", "min_gram": 2})),
        );

        assert!(settings.has_analyzer("keyword_lower"));
        assert!(settings.has_analyzer(DEFAULT_INDEX_ANALYZER));
        assert_eq!(settings.analysis.filter[DEFAULT_FILTER]["min_gram"], 2);
    }
}
