//! Style-pipeline (PostCSS) resolution.
//!
//! The `build.postcss` option is tri-state:
//! 1. `false` disables the pipeline; nothing else is applied
//! 2. `true` defers to a config file found by external tooling. Also forced
//!    when such a file exists in `srcDir` or `rootDir`
//! 3. a plugin list or settings object is merged over the default plugins

use serde_json::{Map, Value, json};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ResolveError, ResolveResult};
use crate::probe::Probe;

/// Config filenames recognized by external style tooling, in search order.
pub const CONFIG_FILES: [&str; 5] = [
    "postcss.config.js",
    ".postcssrc.js",
    ".postcssrc",
    ".postcssrc.json",
    ".postcssrc.yaml",
];

/// Plugins applied when settings are given inline.
pub const DEFAULT_PLUGINS: [&str; 3] = ["postcss-import", "postcss-url", "postcss-cssnext"];

/// Typed view of a resolved `build.postcss` value.
#[derive(Debug, Clone, PartialEq)]
pub enum StylePipeline {
    Disabled,
    /// Use the config discovered by external tooling.
    Discover,
    Settings(Map<String, Value>),
}

impl StylePipeline {
    /// Interpret a `build.postcss` value. Unrecognized shapes yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(false) => Some(StylePipeline::Disabled),
            Value::Bool(true) => Some(StylePipeline::Discover),
            Value::Object(settings) => Some(StylePipeline::Settings(settings.clone())),
            Value::Array(plugins) => {
                let mut settings = Map::new();
                settings.insert("plugins".to_string(), Value::Array(plugins.clone()));
                Some(StylePipeline::Settings(settings))
            }
            _ => None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, StylePipeline::Disabled)
    }
}

/// Find the first style config file, searching `dirs` in order.
pub fn find_config(probe: &dyn Probe, dirs: &[&Path]) -> ResolveResult<Option<PathBuf>> {
    for dir in dirs {
        for file in CONFIG_FILES {
            let candidate = dir.join(file);
            if probe
                .exists(&candidate)
                .map_err(|e| ResolveError::probe(&candidate, e))?
            {
                return Ok(Some(candidate));
            }
        }
    }
    Ok(None)
}

/// Resolve `build.postcss` in place.
///
/// `search_dirs` is normally `[srcDir, rootDir]`.
pub fn resolve_style_pipeline(
    build: &mut Map<String, Value>,
    search_dirs: &[&Path],
    probe: &dyn Probe,
) -> ResolveResult<()> {
    if build.get("postcss") == Some(&Value::Bool(false)) {
        debug!("style pipeline disabled");
        return Ok(());
    }

    if let Some(found) = find_config(probe, search_dirs)? {
        debug!(config = %found.display(), "style pipeline config discovered");
        build.insert("postcss".to_string(), Value::Bool(true));
        return Ok(());
    }

    let source_map = build
        .get("cssSourceMap")
        .cloned()
        .unwrap_or(Value::Bool(true));

    if let Some(value) = build.get_mut("postcss") {
        let current = match std::mem::take(value) {
            Value::Array(plugins) => json!({ "plugins": plugins }),
            other => other,
        };
        *value = match current {
            Value::Object(settings) => Value::Object(with_defaults(settings, source_map)),
            other => other,
        };
    }
    Ok(())
}

/// Shallow merge: top-level keys of `settings` replace the defaults.
fn with_defaults(settings: Map<String, Value>, source_map: Value) -> Map<String, Value> {
    let plugins: Map<String, Value> = DEFAULT_PLUGINS
        .iter()
        .map(|name| (name.to_string(), json!({})))
        .collect();

    let mut merged = Map::new();
    merged.insert("sourceMap".to_string(), source_map);
    merged.insert("plugins".to_string(), Value::Object(plugins));
    for (key, value) in settings {
        merged.insert(key, value);
    }
    merged
}
