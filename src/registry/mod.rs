//! Registry of indices, their settings and their type mappings
//!
//! [`MappingRegistry`] is an explicit, caller-owned object: create one per
//! set of indices you manage. It hands each index's settings to the mapping
//! engine and keeps the generated mappings and the type log of every index.
//!
//! # Example
//!
//! ```rust
//! use elasticsearch_mapper::registry::MappingRegistry;
//! use serde_json::json;
//!
//! let mut registry = MappingRegistry::new();
//! registry.map_from_doc("animals", "dog", &json!({"name": "Bingo", "age": 15}), &[])?;
//!
//! assert_eq!(registry.index_count(), 1);
//! assert!(registry.get_single_mapping("animals", "dog")?.is_some());
//!
//! // A later document may not change the type of a known field
//! assert!(registry.map_from_doc("animals", "cat", &json!({"age": "old"}), &[]).is_err());
//! # Ok::<(), elasticsearch_mapper::registry::RegistryError>(())
//! ```

mod error;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

pub use error::{RegistryError, RegistryResult};

use crate::inference::{ClassifierConfig, TypeLog};
use crate::mapping::{FieldOverride, TypeMapping, create_mapping_with_config};
use crate::settings::{AnalysisConfig, IndexSettings};

/// Configuration for a [`MappingRegistry`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistryConfig {
    /// Classifier configuration used for every document
    pub classifier: ClassifierConfig,
    /// Reject documents whose field types conflict with earlier documents of
    /// the same index
    pub check_type_consistency: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            check_type_consistency: true,
        }
    }
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the classifier configuration
    pub fn with_classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = classifier;
        self
    }

    /// Enable/disable cross-document type checks
    pub fn with_type_consistency(mut self, enabled: bool) -> Self {
        self.check_type_consistency = enabled;
        self
    }
}

/// A registered index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub settings: IndexSettings,
    pub mappings: BTreeMap<String, TypeMapping>,
}

/// Registry of indices and their type mappings
#[derive(Debug, Clone, Default)]
pub struct MappingRegistry {
    config: RegistryConfig,
    base_settings: IndexSettings,
    indices: BTreeMap<String, IndexEntry>,
    type_log: TypeLog,
}

impl MappingRegistry {
    /// Create a registry with default settings and configuration
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a registry with a custom configuration
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            base_settings: IndexSettings::default(),
            indices: BTreeMap::new(),
            type_log: TypeLog::new(),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register extra filters and analyzers for indices created afterwards
    pub fn configure(&mut self, config: AnalysisConfig) {
        debug!(
            filters = config.filters.len(),
            analyzers = config.analyzers.len(),
            "Registering analysis definitions"
        );
        self.base_settings.merge(config);
    }

    /// Settings new indices start from
    pub fn default_settings(&self) -> &IndexSettings {
        &self.base_settings
    }

    /// Replace the settings new indices start from
    pub fn set_default_settings(&mut self, settings: IndexSettings) {
        self.base_settings = settings;
    }

    /// Register an index, resetting it if it already exists
    pub fn create_index(&mut self, name: &str) -> &IndexEntry {
        info!(index = name, "Creating index");
        self.type_log.clear_scope(name);
        self.indices.insert(
            name.to_string(),
            IndexEntry {
                settings: self.base_settings.clone(),
                mappings: BTreeMap::new(),
            },
        );
        &self.indices[name]
    }

    pub fn get_index(&self, name: &str) -> Option<&IndexEntry> {
        self.indices.get(name)
    }

    /// Number of registered indices
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Type log of all indices
    pub fn type_log(&self) -> &TypeLog {
        &self.type_log
    }

    /// Reset to a clean state
    pub fn clear(&mut self) {
        self.base_settings = IndexSettings::default();
        self.indices.clear();
        self.type_log.clear();
    }

    /// Generate a mapping from `document` and store it as `type_name` in `index`
    ///
    /// A missing index is created once the document maps successfully. Every
    /// document mapped into an index is checked against the field types of
    /// earlier documents of that index, unless type consistency checks are
    /// disabled. A failed document leaves the registry and its type log
    /// unchanged.
    pub fn map_from_doc(
        &mut self,
        index: &str,
        type_name: &str,
        document: &Value,
        overrides: &[FieldOverride],
    ) -> RegistryResult<&TypeMapping> {
        let settings = self
            .indices
            .get(index)
            .map_or(&self.base_settings, |entry| &entry.settings);

        let mapping = if self.config.check_type_consistency {
            let mut log = self.type_log.clone();
            if !self.indices.contains_key(index) {
                log.clear_scope(index);
            }
            let mapping = create_mapping_with_config(
                &self.config.classifier,
                document,
                settings,
                overrides,
                index,
                Some(&mut log),
            )?;
            self.type_log = log;
            mapping
        } else {
            create_mapping_with_config(
                &self.config.classifier,
                document,
                settings,
                overrides,
                index,
                None,
            )?
        };

        if !self.indices.contains_key(index) {
            info!(index, "Creating index");
            self.indices.insert(
                index.to_string(),
                IndexEntry {
                    settings: self.base_settings.clone(),
                    mappings: BTreeMap::new(),
                },
            );
        }
        let entry = self.entry_mut(index)?;

        info!(
            index,
            type_name,
            fields = mapping.properties.len(),
            "Stored mapping"
        );
        entry.mappings.insert(type_name.to_string(), mapping);
        Ok(&entry.mappings[type_name])
    }

    /// All mappings of an index
    pub fn get_mappings(&self, index: &str) -> RegistryResult<&BTreeMap<String, TypeMapping>> {
        Ok(&self.entry(index)?.mappings)
    }

    /// Mapping of one type, `None` if the type was never mapped
    pub fn get_single_mapping(
        &self,
        index: &str,
        type_name: &str,
    ) -> RegistryResult<Option<&TypeMapping>> {
        Ok(self.get_mappings(index)?.get(type_name))
    }

    /// Turn on index level dynamic mapping control
    ///
    /// Sets the index's dynamic flag to `status` unless the flag is already
    /// present. Existing mappings are not rewritten.
    pub fn enable_index_level_dynamic_mappings(
        &mut self,
        index: &str,
        status: bool,
    ) -> RegistryResult<()> {
        let entry = self.entry_mut(index)?;
        if entry.settings.dynamic.is_none() {
            entry.settings.dynamic = Some(status);
        }
        Ok(())
    }

    /// Turn off index level dynamic mapping control
    ///
    /// Dynamic mapping is then configured per type with
    /// [`type_dynamic_mapping`](Self::type_dynamic_mapping).
    pub fn disable_index_level_dynamic_mappings(&mut self, index: &str) -> RegistryResult<()> {
        self.entry_mut(index)?.settings.dynamic = None;
        Ok(())
    }

    /// Set dynamic mapping for an index and every type mapped in it
    pub fn dynamic_mapping(&mut self, index: &str, status: bool) -> RegistryResult<()> {
        let entry = self.entry_mut(index)?;
        if entry.settings.dynamic.is_none() {
            return Err(RegistryError::IndexLevelDynamicDisabled(index.to_string()));
        }

        entry.settings.dynamic = Some(status);
        for mapping in entry.mappings.values_mut() {
            mapping.set_dynamic(status);
        }
        debug!(index, status, "Updated index level dynamic mapping");
        Ok(())
    }

    /// Set dynamic mapping for one type
    ///
    /// Only allowed while index level dynamic mapping control is off.
    pub fn type_dynamic_mapping(
        &mut self,
        index: &str,
        type_name: &str,
        status: bool,
    ) -> RegistryResult<()> {
        let entry = self.entry_mut(index)?;
        if entry.settings.dynamic.is_some() {
            return Err(RegistryError::IndexLevelDynamicActive(index.to_string()));
        }

        let mapping =
            entry
                .mappings
                .get_mut(type_name)
                .ok_or_else(|| RegistryError::TypeNotFound {
                    index: index.to_string(),
                    type_name: type_name.to_string(),
                })?;
        mapping.set_dynamic(status);
        debug!(index, type_name, status, "Updated type level dynamic mapping");
        Ok(())
    }

    fn entry(&self, index: &str) -> RegistryResult<&IndexEntry> {
        self.indices
            .get(index)
            .ok_or_else(|| RegistryError::IndexNotFound(index.to_string()))
    }

    fn entry_mut(&mut self, index: &str) -> RegistryResult<&mut IndexEntry> {
        self.indices
            .get_mut(index)
            .ok_or_else(|| RegistryError::IndexNotFound(index.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_and_count() {
        let mut registry = MappingRegistry::new();
        registry.create_index("Animals");
        assert_eq!(registry.index_count(), 1);

        let entry = registry.get_index("Animals").unwrap();
        assert!(entry.mappings.is_empty());
        assert_eq!(entry.settings, IndexSettings::default());
        assert!(registry.get_index("Plants").is_none());
    }

    #[test]
    fn test_clear() {
        let mut registry = MappingRegistry::new();
        registry.configure(AnalysisConfig::new().with_analyzer("extra", json!({})));
        registry
            .map_from_doc("animals", "dog", &json!({"name": "Bingo"}), &[])
            .unwrap();

        registry.clear();
        assert_eq!(registry.index_count(), 0);
        assert!(registry.type_log().is_empty());
        assert!(!registry.default_settings().has_analyzer("extra"));
    }

    #[test]
    fn test_failed_document_keeps_type_log() {
        let mut registry = MappingRegistry::new();
        registry
            .map_from_doc("animals", "dog", &json!({"a": "x"}), &[])
            .unwrap();

        // "Zed" is visited and recorded before "a" conflicts
        let result = registry.map_from_doc("animals", "cat", &json!({"Zed": true, "a": 5}), &[]);
        assert!(result.is_err());
        assert_eq!(registry.type_log().records("animals").len(), 1);
        assert!(registry.get_single_mapping("animals", "cat").unwrap().is_none());
    }

    #[test]
    fn test_failed_document_creates_no_index() {
        let mut registry = MappingRegistry::new();

        let result = registry.map_from_doc("animals", "dog", &json!([1, 2]), &[]);
        assert!(matches!(result, Err(RegistryError::Mapping(_))));
        assert_eq!(registry.index_count(), 0);
        assert!(registry.get_index("animals").is_none());

        registry
            .map_from_doc("animals", "dog", &json!({"name": "Bingo"}), &[])
            .unwrap();
        assert_eq!(registry.index_count(), 1);
    }

    #[test]
    fn test_recreating_index_resets_it() {
        let mut registry = MappingRegistry::new();
        registry
            .map_from_doc("animals", "dog", &json!({"a": "x"}), &[])
            .unwrap();
        registry.create_index("animals");

        assert!(registry.get_mappings("animals").unwrap().is_empty());
        registry
            .map_from_doc("animals", "dog", &json!({"a": 5}), &[])
            .unwrap();
    }
}
