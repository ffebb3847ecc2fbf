//! Defaults command implementation

use anyhow::Result;
use clap::Args;
use elasticsearch_mapper::settings::IndexSettings;

use crate::output::{OutputFormat, render, write_output};

/// Arguments for the `defaults` command
#[derive(Debug, Args)]
pub struct DefaultsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Print the built-in index settings
pub fn handle_defaults(args: &DefaultsArgs) -> Result<()> {
    write_output(&render(&IndexSettings::default(), args.format)?, None)
}
