//! Map command implementation

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use elasticsearch_mapper::inference::{ClassifierConfig, TypeLogKey};
use elasticsearch_mapper::registry::{MappingRegistry, RegistryConfig};
use elasticsearch_mapper::settings::{load_overrides, load_settings};
use serde_json::Value;
use tracing::info;

use crate::output::{OutputFormat, render, write_output};

/// Arguments for the `map` command
#[derive(Debug, Args)]
pub struct MapArgs {
    /// Sample JSON documents (`-` reads from stdin)
    #[arg(required = true)]
    pub documents: Vec<String>,

    /// Index settings file (.json, .yaml, .yml or .toml)
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Field override list file (.json, .yaml, .yml or .toml)
    #[arg(long)]
    pub overrides: Option<PathBuf>,

    /// Index the documents are mapped into
    #[arg(short, long, default_value = "default")]
    pub index: String,

    /// Type name for every document (defaults to each file's stem)
    #[arg(short = 't', long = "type")]
    pub type_name: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Output file (stdout if not provided)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip the cross-document field type check
    #[arg(long)]
    pub no_type_check: bool,

    /// Key the field type check by dotted path instead of field name
    #[arg(long)]
    pub key_by_path: bool,

    /// Treat ISO-8601 date strings as plain strings
    #[arg(long)]
    pub no_date_detection: bool,
}

/// Load input content from file or stdin
fn load_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        Ok(content)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))
    }
}

fn type_name_for(input: &str, explicit: Option<&str>) -> String {
    if let Some(name) = explicit {
        return name.to_string();
    }
    Path::new(input)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| *s != "-")
        .unwrap_or("doc")
        .to_string()
}

/// Handle the `map` command
pub fn handle_map(args: &MapArgs) -> Result<()> {
    let classifier = ClassifierConfig::builder()
        .detect_dates(!args.no_date_detection)
        .log_key(if args.key_by_path {
            TypeLogKey::DottedPath
        } else {
            TypeLogKey::FieldName
        })
        .build();
    let config = RegistryConfig::new()
        .with_classifier(classifier)
        .with_type_consistency(!args.no_type_check);

    let mut registry = MappingRegistry::with_config(config);
    if let Some(path) = &args.settings {
        registry.set_default_settings(load_settings(path)?);
    }
    registry.create_index(&args.index);

    let overrides = match &args.overrides {
        Some(path) => load_overrides(path)?,
        None => Vec::new(),
    };

    for input in &args.documents {
        let document: Value = serde_json::from_str(&load_input(input)?)
            .with_context(|| format!("{} is not valid JSON", input))?;
        let type_name = type_name_for(input, args.type_name.as_deref());

        registry
            .map_from_doc(&args.index, &type_name, &document, &overrides)
            .with_context(|| format!("Failed to map {}", input))?;
        info!(document = %input, type_name = %type_name, "Mapped document");
    }

    let mappings = registry.get_mappings(&args.index)?;
    write_output(&render(mappings, args.format)?, args.output.as_deref())
}
