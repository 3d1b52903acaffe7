//! Log output selection for the `buildconf` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the binary. `RUST_LOG` takes precedence over the `--verbose` level.

use anyhow::{Context, Result};
use std::convert::Infallible;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Off,
    Stdout,
    Stderr,
    /// Append to a file, without ANSI colors.
    File(PathBuf),
}

impl FromStr for LogTarget {
    type Err = Infallible;

    /// `0`/`off`, `1`/`stdout`, `2`/`stderr`, anything else is a filename.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "0" | "off" => LogTarget::Off,
            "1" | "stdout" => LogTarget::Stdout,
            "2" | "stderr" => LogTarget::Stderr,
            filename => LogTarget::File(PathBuf::from(filename)),
        })
    }
}

/// Install the global subscriber.
pub fn init(target: &LogTarget, verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    match target {
        LogTarget::Off => {}
        LogTarget::Stdout => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter())
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogTarget::Stderr => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter())
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter())
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_targets() {
        assert_eq!("0".parse::<LogTarget>().unwrap(), LogTarget::Off);
        assert_eq!("off".parse::<LogTarget>().unwrap(), LogTarget::Off);
        assert_eq!("1".parse::<LogTarget>().unwrap(), LogTarget::Stdout);
        assert_eq!("stderr".parse::<LogTarget>().unwrap(), LogTarget::Stderr);
        assert_eq!(
            "resolve.log".parse::<LogTarget>().unwrap(),
            LogTarget::File(PathBuf::from("resolve.log"))
        );
    }

    #[test]
    fn test_off_installs_nothing() {
        assert!(init(&LogTarget::Off, true).is_ok());
    }
}
