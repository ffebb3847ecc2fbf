//! Final mapping document

use serde::{Deserialize, Serialize};

use crate::inference::{FieldMapping, Properties};

/// The `_all` catch-all field setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllField {
    pub enabled: bool,
}

/// Type level dynamic mapping flag, serialized as `"true"` / `"false"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DynamicMapping {
    #[serde(rename = "true")]
    Enabled,
    #[default]
    #[serde(rename = "false")]
    Disabled,
}

impl From<bool> for DynamicMapping {
    fn from(enabled: bool) -> Self {
        if enabled {
            DynamicMapping::Enabled
        } else {
            DynamicMapping::Disabled
        }
    }
}

impl std::fmt::Display for DynamicMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DynamicMapping::Enabled => write!(f, "true"),
            DynamicMapping::Disabled => write!(f, "false"),
        }
    }
}

/// Mapping of one document type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeMapping {
    #[serde(rename = "_all")]
    pub all: AllField,
    pub dynamic: DynamicMapping,
    pub properties: Properties,
}

impl TypeMapping {
    /// Wrap decorated properties; `_all` is always disabled
    pub fn new(properties: Properties, dynamic: bool) -> Self {
        Self {
            all: AllField { enabled: false },
            dynamic: dynamic.into(),
            properties,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic == DynamicMapping::Enabled
    }

    /// Rewrite the dynamic flag in place
    pub fn set_dynamic(&mut self, enabled: bool) {
        self.dynamic = enabled.into();
    }

    /// Look up a field by dotted path
    pub fn field(&self, path: &str) -> Option<&FieldMapping> {
        FieldMapping::get_path(&self.properties, path)
    }
}
