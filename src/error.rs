//! Error types for configuration loading and resolution.
//!
//! Normalization and merging are total over arbitrary shapes, so the only
//! resolution failures are filesystem probes that could not answer. A probe
//! failure is never folded into "not found".

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while resolving a configuration.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// An existence check could not be completed (permission denied, I/O error).
    #[error("failed to probe {}: {source}", .path.display())]
    Probe {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No `rootDir` was given and the working directory is unavailable.
    #[error("failed to determine the current working directory: {0}")]
    CurrentDir(#[source] io::Error),
}

impl ResolveError {
    pub fn probe(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Probe {
            path: path.into(),
            source,
        }
    }
}

/// Failure while reading a configuration document from disk or a string.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document parsed, but its top level is not a key/value mapping.
    #[error("config root must be a mapping, found {found}")]
    NotAMapping { found: &'static str },

    #[error("unsupported config format for {} (expected .json, .yaml or .yml)", .path.display())]
    UnsupportedFormat { path: PathBuf },
}

/// Result type for resolution.
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_error_message_names_path() {
        let err = ResolveError::probe(
            "/proj/store",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let message = err.to_string();
        assert!(message.contains("/proj/store"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn test_not_a_mapping_message() {
        let err = LoadError::NotAMapping { found: "array" };
        assert_eq!(err.to_string(), "config root must be a mapping, found array");
    }
}
