//! CLI definitions for the `buildconf` inspection tool.
//!
//! The tool loads an optional config file, resolves it and prints the result,
//! which is handy when a build behaves differently than its config suggests.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Mode, RawConfig, Resolver};
use crate::error::LoadError;
use crate::logging::LogTarget;

/// Resolve a project configuration and print it as JSON
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project root (overrides `rootDir` from the config file)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Path to a JSON or YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Rendering mode: universal, spa (single-page) or static
    #[arg(short, long, value_parser = parse_mode)]
    pub mode: Option<Mode>,

    /// Resolve with production defaults regardless of NODE_ENV
    #[arg(long)]
    pub production: bool,

    /// Print the JSON on a single line
    #[arg(long)]
    pub compact: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2")]
    pub log: LogTarget,
}

impl Cli {
    /// Build the raw configuration described by the arguments.
    pub fn raw_config(&self) -> Result<RawConfig, LoadError> {
        let mut raw = match &self.config {
            Some(path) => RawConfig::load(path)?,
            None => RawConfig::new(),
        };
        if let Some(root) = &self.root {
            raw = raw.with("rootDir", root.to_string_lossy().into_owned());
        }
        if let Some(mode) = self.mode {
            raw = raw.with_mode(mode);
        }
        Ok(raw)
    }

    /// Build the resolver described by the arguments.
    pub fn resolver(&self) -> Resolver {
        let resolver = Resolver::new();
        if self.production {
            resolver.with_production(true)
        } else {
            resolver
        }
    }
}

fn parse_mode(name: &str) -> Result<Mode, String> {
    Mode::from_name(name)
        .ok_or_else(|| format!("unknown mode '{name}' (expected universal, spa or static)"))
}
