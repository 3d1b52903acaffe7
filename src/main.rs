//! Build Configuration Resolver
//!
//! Prints the fully resolved configuration for a project.

use anyhow::{Context, Result};
use buildconf::cli::Cli;
use buildconf::logging;
use clap::Parser;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log, cli.verbose)?;

    let raw = cli.raw_config().context("failed to load configuration")?;
    let resolved = cli
        .resolver()
        .resolve(&raw)
        .context("failed to resolve configuration")?;

    info!(
        root = %resolved.root_dir().display(),
        mode = resolved.mode().unwrap_or("none"),
        "resolved configuration"
    );

    let output = if cli.compact {
        serde_json::to_string(&resolved)?
    } else {
        serde_json::to_string_pretty(&resolved)?
    };
    println!("{output}");
    Ok(())
}
