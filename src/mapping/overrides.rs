//! Per-field override records

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{MappingError, MappingResult};

/// User-supplied indexing directive for one field
///
/// `field` is a dotted path from the document root, e.g. `owners.profile.gender`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldOverride {
    pub field: String,
    pub tokenize: bool,
    /// Index-time analyzer name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    /// Search-time analyzer name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl FieldOverride {
    /// Create an override without explicit analyzers
    pub fn new(field: impl Into<String>, tokenize: bool) -> Self {
        Self {
            field: field.into(),
            tokenize,
            index: None,
            search: None,
        }
    }

    /// Set the index-time analyzer
    pub fn with_index_analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.index = Some(analyzer.into());
        self
    }

    /// Set the search-time analyzer
    pub fn with_search_analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.search = Some(analyzer.into());
        self
    }

    /// Check the field path and analyzer names
    pub fn validate(&self) -> Result<(), String> {
        if self.field.is_empty() {
            return Err("empty field path".to_string());
        }
        if self.field.split('.').any(str::is_empty) {
            return Err(format!("empty segment in field path '{}'", self.field));
        }
        if self.index.as_deref() == Some("") {
            return Err(format!("empty index analyzer for '{}'", self.field));
        }
        if self.search.as_deref() == Some("") {
            return Err(format!("empty search analyzer for '{}'", self.field));
        }
        Ok(())
    }

    /// First segment of the field path
    pub fn first_segment(&self) -> &str {
        self.field.split('.').next().unwrap_or_default()
    }

    /// Copy of this override relative to its first segment
    ///
    /// `owners.profile.gender` becomes `profile.gender`. Returns `None` when
    /// the path has a single segment.
    pub fn rerooted(&self) -> Option<FieldOverride> {
        let (_, rest) = self.field.split_once('.')?;
        Some(FieldOverride {
            field: rest.to_string(),
            ..self.clone()
        })
    }
}

/// Validate every override of a list
pub fn validate_overrides(overrides: &[FieldOverride]) -> MappingResult<()> {
    for (position, entry) in overrides.iter().enumerate() {
        entry
            .validate()
            .map_err(|reason| MappingError::InvalidOverride { position, reason })?;
    }
    Ok(())
}

/// Parse an untyped override list
///
/// Every entry must be an object with a string `field`, a boolean `tokenize`
/// and optional string `index` / `search`. Unknown keys are rejected.
pub fn parse_overrides(value: &Value) -> MappingResult<Vec<FieldOverride>> {
    let Value::Array(entries) = value else {
        return Err(MappingError::InvalidOverrideList(format!(
            "expected a list, found {}",
            match value {
                Value::Null => "null",
                Value::Bool(_) => "a boolean",
                Value::Number(_) => "a number",
                Value::String(_) => "a string",
                Value::Object(_) => "an object",
                Value::Array(_) => "a list",
            }
        )));
    };

    let overrides = entries
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            serde_json::from_value::<FieldOverride>(entry.clone()).map_err(|e| {
                MappingError::InvalidOverride {
                    position,
                    reason: e.to_string(),
                }
            })
        })
        .collect::<MappingResult<Vec<_>>>()?;

    validate_overrides(&overrides)?;
    Ok(overrides)
}
