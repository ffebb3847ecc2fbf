//! Attaching index directives and analyzers to a structural mapping

use tracing::{trace, warn};

use super::overrides::FieldOverride;
use crate::inference::{FieldKind, FieldMapping, IndexMode, Properties};
use crate::settings::{DEFAULT_INDEX_ANALYZER, DEFAULT_SEARCH_ANALYZER, IndexSettings};

/// Decorate with the default policy
///
/// Every string field is tokenized with the default index and search
/// analyzers, containers are descended into and every other field is not
/// indexed.
pub fn decorate_default(properties: Properties) -> Properties {
    properties
        .into_iter()
        .map(|(name, node)| (name, default_node(node)))
        .collect()
}

fn default_node(mut node: FieldMapping) -> FieldMapping {
    match node.kind {
        FieldKind::String => {
            node.index_analyzer = Some(DEFAULT_INDEX_ANALYZER.to_string());
            node.search_analyzer = Some(DEFAULT_SEARCH_ANALYZER.to_string());
        }
        FieldKind::Object | FieldKind::Nested => {
            node.properties = node.properties.map(decorate_default);
        }
        _ => node.index = Some(IndexMode::No),
    }
    node
}

/// Decorate with a user-supplied override list
///
/// String fields without an override are not indexed. Overrides for fields
/// below a container are matched by their dotted path.
pub fn decorate_custom(
    properties: Properties,
    settings: &IndexSettings,
    overrides: &[FieldOverride],
) -> Properties {
    properties
        .into_iter()
        .map(|(name, node)| {
            let node = custom_node(&name, node, settings, overrides);
            (name, node)
        })
        .collect()
}

fn custom_node(
    name: &str,
    mut node: FieldMapping,
    settings: &IndexSettings,
    overrides: &[FieldOverride],
) -> FieldMapping {
    match node.kind {
        FieldKind::String => match overrides.iter().find(|o| o.field == name) {
            None => node.index = Some(IndexMode::No),
            Some(o) if !o.tokenize => node.index = Some(IndexMode::NotAnalyzed),
            Some(o) => {
                node.index_analyzer = Some(resolve_analyzer(
                    settings,
                    name,
                    o.index.as_deref(),
                    DEFAULT_INDEX_ANALYZER,
                ));
                node.search_analyzer = Some(resolve_analyzer(
                    settings,
                    name,
                    o.search.as_deref(),
                    DEFAULT_SEARCH_ANALYZER,
                ));
            }
        },
        FieldKind::Object | FieldKind::Nested => {
            let inner: Vec<FieldOverride> = overrides
                .iter()
                .filter(|o| o.first_segment() == name)
                .filter_map(FieldOverride::rerooted)
                .collect();
            trace!(field = name, overrides = inner.len(), "Descending into container");
            node.properties = node
                .properties
                .map(|p| decorate_custom(p, settings, &inner));
        }
        _ => node.index = Some(IndexMode::No),
    }
    node
}

/// Requested analyzer if registered, the default otherwise
fn resolve_analyzer(
    settings: &IndexSettings,
    field: &str,
    requested: Option<&str>,
    default: &str,
) -> String {
    match requested {
        Some(analyzer) if settings.has_analyzer(analyzer) => analyzer.to_string(),
        Some(analyzer) => {
            warn!(
                field,
                analyzer, default, "Analyzer not registered, using default"
            );
            default.to_string()
        }
        None => default.to_string(),
    }
}
