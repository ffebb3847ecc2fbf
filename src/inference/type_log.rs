//! Per-index record of observed field types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::InferenceError;
use super::types::FieldKind;

/// A field key and the type first observed for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRecord {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
}

/// Record of field types seen per index scope
///
/// The caller owns the log and passes it to every classification that should
/// be checked against earlier documents of the same scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeLog {
    scopes: BTreeMap<String, Vec<TypeRecord>>,
}

impl TypeLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Type recorded for `key` in `scope`, if any
    pub fn recorded(&self, scope: &str, key: &str) -> Option<FieldKind> {
        self.scopes
            .get(scope)?
            .iter()
            .find(|r| r.key == key)
            .map(|r| r.kind)
    }

    /// Record `kind` for `key`, or check it against the existing record
    ///
    /// Fails with [`InferenceError::TypeConflict`] when `key` already has a
    /// different type in `scope`. A matching record is left untouched.
    pub fn record(&mut self, scope: &str, key: &str, kind: FieldKind) -> Result<(), InferenceError> {
        let records = self.scopes.entry(scope.to_string()).or_default();

        match records.iter().find(|r| r.key == key) {
            Some(existing) if existing.kind != kind => Err(InferenceError::TypeConflict {
                field: key.to_string(),
                scope: scope.to_string(),
                expected: existing.kind,
                observed: kind,
            }),
            Some(_) => Ok(()),
            None => {
                records.push(TypeRecord {
                    key: key.to_string(),
                    kind,
                });
                Ok(())
            }
        }
    }

    /// Records of a scope in the order they were first observed
    pub fn records(&self, scope: &str) -> &[TypeRecord] {
        self.scopes.get(scope).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Drop all records of one scope
    pub fn clear_scope(&mut self, scope: &str) {
        self.scopes.remove(scope);
    }

    /// Drop all records
    pub fn clear(&mut self) {
        self.scopes.clear();
    }

    /// Number of scopes with at least one record
    pub fn scope_count(&self) -> usize {
        self.scopes.values().filter(|r| !r.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.scope_count() == 0
    }
}
