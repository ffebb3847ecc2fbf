//! Loading settings and override lists from files
//!
//! The format is picked from the file extension: `.json`, `.yaml`/`.yml` or
//! `.toml`.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::IndexSettings;
use crate::mapping::{FieldOverride, MappingError, parse_overrides};

/// Errors that can occur while loading configuration files
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read the file
    #[error("Failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content does not parse
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Unknown file extension
    #[error("Unsupported file format: {0} (expected .json, .yaml, .yml or .toml)")]
    UnsupportedFormat(PathBuf),

    /// Override list is malformed
    #[error(transparent)]
    InvalidOverrides(#[from] MappingError),
}

#[derive(Debug, Clone, Copy)]
enum FileFormat {
    Json,
    Yaml,
    Toml,
}

impl FileFormat {
    fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("json") => Ok(FileFormat::Json),
            Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
            Some("toml") => Ok(FileFormat::Toml),
            _ => Err(SettingsError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

fn read_file<T: DeserializeOwned>(path: &Path) -> Result<T, SettingsError> {
    let format = FileFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_error = |message: String| SettingsError::Parse {
        path: path.to_path_buf(),
        message,
    };

    debug!(path = %path.display(), ?format, "Loading configuration file");
    match format {
        FileFormat::Json => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string())),
        FileFormat::Yaml => serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string())),
        FileFormat::Toml => toml::from_str(&content).map_err(|e| parse_error(e.to_string())),
    }
}

/// Load index settings from a file
pub fn load_settings(path: impl AsRef<Path>) -> Result<IndexSettings, SettingsError> {
    read_file(path.as_ref())
}

/// Load a field override list from a file
///
/// The file holds either a bare list or a table with an `overrides` list. TOML
/// only supports the latter (`[[overrides]]`).
pub fn load_overrides(path: impl AsRef<Path>) -> Result<Vec<FieldOverride>, SettingsError> {
    let value: Value = read_file(path.as_ref())?;
    let list = match value {
        Value::Object(mut table) if table.contains_key("overrides") => {
            table.remove("overrides").unwrap_or(Value::Null)
        }
        other => other,
    };
    Ok(parse_overrides(&list)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_settings_json() {
        let file = write_temp(
            ".json",
            r#"{"index.mapper.dynamic": true, "analysis": {"analyzer": {"custom_a": {}}}}"#,
        );
        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.dynamic, Some(true));
        assert!(settings.has_analyzer("custom_a"));
    }

    #[test]
    fn test_load_settings_yaml() {
        let file = write_temp(
            ".yaml",
            "analysis:\n  analyzer:\n    custom_a:\n      tokenizer: keyword\n",
        );
        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.dynamic, None);
        assert!(settings.has_analyzer("custom_a"));
    }

    #[test]
    fn test_load_settings_toml() {
        let file = write_temp(
            ".toml",
            "\"index.mapper.dynamic\" = true\n\n[analysis.analyzer.custom_a]\ntokenizer = \"keyword\"\n",
        );
        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.dynamic, Some(true));
        assert!(settings.has_analyzer("custom_a"));
        assert!(settings.analysis.filter.is_empty());
    }

    #[test]
    fn test_load_overrides_yaml() {
        let file = write_temp(
            ".yml",
            "- field: a.b\n  tokenize: false\n- field: name\n  tokenize: true\n  search: custom_a\n",
        );
        let overrides = load_overrides(file.path()).unwrap();
        assert_eq!(
            overrides,
            vec![
                FieldOverride::new("a.b", false),
                FieldOverride::new("name", true).with_search_analyzer("custom_a"),
            ]
        );
    }

    #[test]
    fn test_load_overrides_json_list() {
        let file = write_temp(
            ".json",
            r#"[{"field": "profile.origin", "tokenize": true, "index": "custom_a"}]"#,
        );
        let overrides = load_overrides(file.path()).unwrap();
        assert_eq!(
            overrides,
            vec![FieldOverride::new("profile.origin", true).with_index_analyzer("custom_a")]
        );
    }

    #[test]
    fn test_load_overrides_toml() {
        let file = write_temp(
            ".toml",
            "[[overrides]]\nfield = \"profile.origin\"\ntokenize = true\nindex = \"custom_a\"\n",
        );
        let overrides = load_overrides(file.path()).unwrap();
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides[0].field, "profile.origin");
        assert_eq!(overrides[0].index.as_deref(), Some("custom_a"));
    }

    #[test]
    fn test_load_overrides_rejects_malformed() {
        let file = write_temp(".json", r#"[{"field": "name"}]"#);
        let err = load_overrides(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidOverrides(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_temp(".ini", "a=b");
        assert!(matches!(
            load_settings(file.path()),
            Err(SettingsError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_settings("/nonexistent/settings.json"),
            Err(SettingsError::Io { .. })
        ));
    }
}
