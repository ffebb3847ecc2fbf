//! es-mapper: infer Elasticsearch mappings from sample documents

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::defaults::{DefaultsArgs, handle_defaults};
use commands::map::{MapArgs, handle_map};

/// Infer Elasticsearch type mappings from sample JSON documents
#[derive(Parser, Debug)]
#[command(name = "es-mapper")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Infer Elasticsearch type mappings from sample JSON documents", long_about = None)]
struct Cli {
    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate mappings from one or more documents
    Map(MapArgs),
    /// Print the default index settings
    Defaults(DefaultsArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG takes precedence over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Command::Map(args) => handle_map(args),
        Command::Defaults(args) => handle_defaults(args),
    }
}
