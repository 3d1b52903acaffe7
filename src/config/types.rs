//! Input and output configuration types.

use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

use super::modes::ModeSelector;
use super::normalize::ROUTER_BASE_SPECIFIED;
use super::style::StylePipeline;

/// Sparse, user-authored configuration.
///
/// Holds an arbitrarily shaped tree plus an optional mode selector. Resolution
/// only borrows it; the resolver works on its own copy.
#[derive(Debug, Clone, Default)]
pub struct RawConfig {
    tree: Map<String, Value>,
    mode: Option<ModeSelector>,
}

impl RawConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a tree. A non-object value yields an empty configuration.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(tree) => Self::from(tree),
            _ => Self::default(),
        }
    }

    /// Set a top-level option.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.tree.insert(key.into(), value.into());
        self
    }

    /// Choose the mode with a selector instead of the tree's `mode` option.
    pub fn with_mode(mut self, selector: impl Into<ModeSelector>) -> Self {
        self.mode = Some(selector.into());
        self
    }

    pub fn tree(&self) -> &Map<String, Value> {
        &self.tree
    }

    pub fn mode_selector(&self) -> Option<&ModeSelector> {
        self.mode.as_ref()
    }

    pub(crate) fn into_parts(self) -> (Map<String, Value>, Option<ModeSelector>) {
        (self.tree, self.mode)
    }
}

impl From<Map<String, Value>> for RawConfig {
    fn from(tree: Map<String, Value>) -> Self {
        Self { tree, mode: None }
    }
}

impl From<Value> for RawConfig {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl From<ResolvedConfig> for RawConfig {
    fn from(resolved: ResolvedConfig) -> Self {
        Self::from(resolved.tree)
    }
}

/// `render.ssr` after mode presets are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderSsr {
    Enabled,
    Disabled,
    /// Pages are pre-rendered at generate time.
    Static,
}

/// Fully resolved configuration.
///
/// Every recognized option is present and every directory is absolute.
/// Unrecognized options are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedConfig {
    tree: Map<String, Value>,
}

impl ResolvedConfig {
    pub(crate) fn new(tree: Map<String, Value>) -> Self {
        Self { tree }
    }

    /// Top-level option by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.tree.get(key)
    }

    /// Nested option by JSON pointer, e.g. `/build/filenames/app`.
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        let rest = pointer.strip_prefix('/')?;
        let (head, tail) = match rest.split_once('/') {
            Some((head, tail)) => (head, Some(tail)),
            None => (rest, None),
        };
        let head = head.replace("~1", "/").replace("~0", "~");
        let value = self.tree.get(&head)?;
        match tail {
            Some(tail) => value.pointer(&format!("/{tail}")),
            None => Some(value),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.tree
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.tree)
    }

    fn path(&self, key: &str) -> &Path {
        Path::new(self.tree.get(key).and_then(Value::as_str).unwrap_or_default())
    }

    fn flag(&self, pointer: &str) -> Option<bool> {
        self.pointer(pointer).and_then(Value::as_bool)
    }

    pub fn root_dir(&self) -> &Path {
        self.path("rootDir")
    }

    pub fn src_dir(&self) -> &Path {
        self.path("srcDir")
    }

    pub fn build_dir(&self) -> &Path {
        self.path("buildDir")
    }

    pub fn modules_dir(&self) -> &Path {
        self.path("modulesDir")
    }

    pub fn app_template_path(&self) -> &Path {
        self.path("appTemplatePath")
    }

    /// The mode name as resolved, even if no preset matched it.
    pub fn mode(&self) -> Option<&str> {
        self.tree.get("mode").and_then(Value::as_str)
    }

    pub fn dev(&self) -> bool {
        self.flag("/dev").unwrap_or(false)
    }

    pub fn debug(&self) -> bool {
        self.flag("/debug").unwrap_or(false)
    }

    pub fn store(&self) -> bool {
        self.flag("/store").unwrap_or(false)
    }

    /// `None` when no mode preset supplied a value.
    pub fn build_ssr(&self) -> Option<bool> {
        self.flag("/build/ssr")
    }

    pub fn render_ssr(&self) -> Option<RenderSsr> {
        match self.pointer("/render/ssr")? {
            Value::Bool(true) => Some(RenderSsr::Enabled),
            Value::Bool(false) => Some(RenderSsr::Disabled),
            Value::String(s) if s == "static" => Some(RenderSsr::Static),
            _ => None,
        }
    }

    pub fn style_pipeline(&self) -> Option<StylePipeline> {
        self.pointer("/build/postcss")
            .and_then(StylePipeline::from_value)
    }

    pub fn public_path(&self) -> Option<&str> {
        self.pointer("/build/publicPath").and_then(Value::as_str)
    }

    pub fn router_base(&self) -> Option<&str> {
        self.pointer("/router/base").and_then(Value::as_str)
    }

    /// Whether `router.base` came from the user rather than the defaults.
    pub fn router_base_specified(&self) -> bool {
        self.flag(&format!("/{ROUTER_BASE_SPECIFIED}"))
            .unwrap_or(false)
    }

    pub fn router_middleware(&self) -> Vec<&str> {
        self.pointer("/router/middleware")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}
