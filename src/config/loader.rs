//! Reading raw configuration documents.
//!
//! A config file is JSON or YAML, chosen by extension. Its top level must be a
//! mapping; below that anything goes and is left for resolution to interpret.

use serde_json::Value;
use std::path::Path;
use tracing::debug;

use super::types::RawConfig;
use crate::error::LoadError;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Format implied by a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(ConfigFormat::Json),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            _ => None,
        }
    }
}

impl RawConfig {
    /// Parse a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_document(value)
    }

    /// Parse a YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self, LoadError> {
        let value: Value = serde_yaml::from_str(content)?;
        Self::from_document(value)
    }

    /// Read a config file, picking the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), ?format, "loading config file");

        match format {
            ConfigFormat::Json => Self::from_json_str(&content),
            ConfigFormat::Yaml => Self::from_yaml_str(&content),
        }
    }

    fn from_document(value: Value) -> Result<Self, LoadError> {
        match value {
            Value::Object(tree) => Ok(Self::from(tree)),
            // `~` or an empty YAML document
            Value::Null => Ok(Self::new()),
            other => Err(LoadError::NotAMapping {
                found: kind_of(&other),
            }),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}
