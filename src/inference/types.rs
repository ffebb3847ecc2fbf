//! Field classifications and mapping nodes

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field name → mapping node, ordered by field name
pub type Properties = BTreeMap<String, FieldMapping>;

/// Classification of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// ISO-8601 date or date-time string
    Date,
    /// Plain JSON object
    Object,
    /// Array whose first element is an object
    Nested,
    /// Any number (integer and float are not distinguished)
    Double,
    /// Any other string
    String,
    /// Boolean value
    Boolean,
    /// JSON null
    Null,
    /// Empty array, or an array whose first element is itself an array
    Unknown,
}

impl FieldKind {
    /// Name used in the mapping document
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Date => "date",
            FieldKind::Object => "object",
            FieldKind::Nested => "nested",
            FieldKind::Double => "double",
            FieldKind::String => "string",
            FieldKind::Boolean => "boolean",
            FieldKind::Null => "null",
            FieldKind::Unknown => "unknown",
        }
    }

    /// Whether nodes of this kind carry `properties`
    pub fn is_container(&self) -> bool {
        matches!(self, FieldKind::Object | FieldKind::Nested)
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Index directive attached to a field that is not tokenized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexMode {
    /// Field is not indexed at all
    No,
    /// Field is indexed verbatim, without analysis
    NotAnalyzed,
}

impl std::fmt::Display for IndexMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexMode::No => write!(f, "no"),
            IndexMode::NotAnalyzed => write!(f, "not_analyzed"),
        }
    }
}

/// A node in a type mapping
///
/// The classifier only fills `kind` and `properties`; the decorator adds the
/// index directives and analyzer names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<IndexMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_analyzer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_analyzer: Option<String>,
}

impl FieldMapping {
    /// Create a leaf node
    pub fn leaf(kind: FieldKind) -> Self {
        Self {
            kind,
            properties: None,
            index: None,
            index_analyzer: None,
            search_analyzer: None,
        }
    }

    /// Create an `object` or `nested` node
    pub fn container(kind: FieldKind, properties: Properties) -> Self {
        debug_assert!(kind.is_container());
        Self {
            properties: Some(properties),
            ..Self::leaf(kind)
        }
    }

    /// Whether analyzers are attached to this node
    pub fn is_analyzed(&self) -> bool {
        self.index_analyzer.is_some() || self.search_analyzer.is_some()
    }

    /// Look up a descendant by dotted path, e.g. `owners.profile.gender`
    pub fn get_path<'a>(properties: &'a Properties, path: &str) -> Option<&'a FieldMapping> {
        let mut segments = path.split('.');
        let mut node = properties.get(segments.next()?)?;
        for segment in segments {
            node = node.properties.as_ref()?.get(segment)?;
        }
        Some(node)
    }
}
