//! Configuration for type classification

use serde::{Deserialize, Serialize};

/// How fields are keyed in a [`TypeLog`](super::TypeLog)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeLogKey {
    /// Bare field name; `a.name` and `b.name` share one entry
    #[default]
    FieldName,
    /// Full dotted path from the document root
    DottedPath,
}

/// Configuration for type classification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassifierConfig {
    /// Classify ISO-8601 date and date-time strings as `date`
    pub detect_dates: bool,

    /// Maximum nesting depth for objects and arrays
    pub max_depth: usize,

    /// Key used for type log entries
    pub log_key: TypeLogKey,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            detect_dates: true,
            max_depth: 32,
            log_key: TypeLogKey::FieldName,
        }
    }
}

impl ClassifierConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> ClassifierConfigBuilder {
        ClassifierConfigBuilder::default()
    }
}

/// Builder for ClassifierConfig
#[derive(Debug, Default)]
pub struct ClassifierConfigBuilder {
    config: ClassifierConfig,
}

impl ClassifierConfigBuilder {
    /// Enable or disable date detection
    pub fn detect_dates(mut self, detect: bool) -> Self {
        self.config.detect_dates = detect;
        self
    }

    /// Set the maximum nesting depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Set how type log entries are keyed
    pub fn log_key(mut self, key: TypeLogKey) -> Self {
        self.config.log_key = key;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ClassifierConfig {
        self.config
    }
}
