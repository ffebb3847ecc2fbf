//! Structural type classification of JSON documents

use serde_json::{Map, Value};
use tracing::{debug, trace};

use super::config::{ClassifierConfig, TypeLogKey};
use super::dates::is_date_string;
use super::error::InferenceError;
use super::type_log::TypeLog;
use super::types::{FieldKind, FieldMapping, Properties};

/// Key excluded from classification at every level
pub const ID_FIELD: &str = "_id";

/// Classifies every field of a document into a bare structural mapping
#[derive(Debug, Clone, Default)]
pub struct TypeClassifier {
    config: ClassifierConfig,
}

impl TypeClassifier {
    /// Create a classifier with default configuration
    pub fn new() -> Self {
        Self::with_config(ClassifierConfig::default())
    }

    /// Create a classifier with custom configuration
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a parsed document
    ///
    /// When `type_log` is given, every field is checked against the types
    /// recorded for `scope` and unseen fields are recorded. The first conflict
    /// aborts the whole document.
    pub fn classify(
        &self,
        document: &Value,
        scope: &str,
        type_log: Option<&mut TypeLog>,
    ) -> Result<Properties, InferenceError> {
        let Value::Object(fields) = document else {
            return Err(InferenceError::InvalidStructure(
                value_type_name(document).to_string(),
            ));
        };

        let mut walk = Walk {
            classifier: self,
            scope,
            type_log,
        };
        let properties = walk.classify_object(fields, "", 0)?;

        debug!(scope, fields = properties.len(), "Classified document");
        Ok(properties)
    }

    /// Parse and classify a JSON string
    pub fn classify_json(
        &self,
        json: &str,
        scope: &str,
        type_log: Option<&mut TypeLog>,
    ) -> Result<Properties, InferenceError> {
        let document: Value = serde_json::from_str(json)?;
        self.classify(&document, scope, type_log)
    }

    /// Kind of a single value, without descending into containers
    pub fn kind_of(&self, value: &Value) -> FieldKind {
        match value {
            // Arrays are typed by their first element
            Value::Array(items) => match items.first() {
                None => FieldKind::Unknown,
                Some(Value::Object(_)) => FieldKind::Nested,
                Some(Value::Array(_)) => FieldKind::Unknown,
                Some(first) => self.scalar_kind(first),
            },
            Value::Object(_) => FieldKind::Object,
            other => self.scalar_kind(other),
        }
    }

    fn scalar_kind(&self, value: &Value) -> FieldKind {
        match value {
            Value::String(s) if self.config.detect_dates && is_date_string(s) => FieldKind::Date,
            Value::String(_) => FieldKind::String,
            Value::Number(_) => FieldKind::Double,
            Value::Bool(_) => FieldKind::Boolean,
            Value::Null => FieldKind::Null,
            Value::Array(_) => FieldKind::Unknown,
            Value::Object(_) => FieldKind::Object,
        }
    }
}

/// State of one classification pass
struct Walk<'a> {
    classifier: &'a TypeClassifier,
    scope: &'a str,
    type_log: Option<&'a mut TypeLog>,
}

impl Walk<'_> {
    fn classify_object(
        &mut self,
        fields: &Map<String, Value>,
        prefix: &str,
        depth: usize,
    ) -> Result<Properties, InferenceError> {
        let max_depth = self.classifier.config.max_depth;
        if depth > max_depth {
            return Err(InferenceError::MaxDepthExceeded {
                depth,
                max: max_depth,
            });
        }

        let mut properties = Properties::new();
        for (key, value) in fields {
            if key == ID_FIELD {
                continue;
            }
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };
            let node = self.classify_field(key, &path, value, depth)?;
            properties.insert(key.clone(), node);
        }
        Ok(properties)
    }

    fn classify_field(
        &mut self,
        key: &str,
        path: &str,
        value: &Value,
        depth: usize,
    ) -> Result<FieldMapping, InferenceError> {
        let kind = self.classifier.kind_of(value);
        trace!(field = path, %kind, "Classified field");

        // Record before descending so that a nested field reusing this name
        // is checked against it
        if let Some(log) = self.type_log.as_deref_mut() {
            let log_key = match self.classifier.config.log_key {
                TypeLogKey::FieldName => key,
                TypeLogKey::DottedPath => path,
            };
            log.record(self.scope, log_key, kind)?;
        }

        let node = match (kind, value) {
            (FieldKind::Object, Value::Object(fields)) => {
                FieldMapping::container(kind, self.classify_object(fields, path, depth + 1)?)
            }
            (FieldKind::Nested, Value::Array(items)) => {
                let properties = match items.first() {
                    Some(Value::Object(fields)) => self.classify_object(fields, path, depth + 1)?,
                    _ => Properties::new(),
                };
                FieldMapping::container(kind, properties)
            }
            _ => FieldMapping::leaf(kind),
        };
        Ok(node)
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
