//! The resolution pipeline.
//!
//! Stages run in a fixed order, each on the output of the previous one:
//! 1. Copy the input and evaluate the mode selector
//! 2. Normalize shorthand, default `dev` from the environment
//! 3. Seed the tree with the default tree
//! 4. Resolve directories and the app template
//! 5. Public path, state store and style pipeline adjustments
//! 6. Default `debug` to `dev`
//! 7. Apply the mode preset, then the default tree as the last fallback
//!
//! The only I/O is read-only existence checks through a [`Probe`].

use regex_lite::Regex;
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

use super::defaults::{DEFAULT_PUBLIC_PATH, default_tree};
use super::merge::fill_defaults;
use super::modes::{Mode, empty_preset};
use super::normalize::normalize;
use super::style::resolve_style_pipeline;
use super::types::{RawConfig, ResolvedConfig};
use crate::error::{ResolveError, ResolveResult};
use crate::paths::{ProjectDirs, path_value};
use crate::probe::{FsProbe, Probe};

/// Environment variable that selects production defaults.
pub const ENV_VAR: &str = "NODE_ENV";

/// Conventional state-store directory under `srcDir`.
pub const STORE_DIR: &str = "store";

static ABSOLUTE_URL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^(https?:)?//").ok());

/// Resolves raw configurations.
///
/// Holds no per-resolution state, so one resolver can serve any number of
/// projects from any number of threads.
#[derive(Clone)]
pub struct Resolver {
    probe: Arc<dyn Probe>,
    cwd: Option<PathBuf>,
    production: bool,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("cwd", &self.cwd)
            .field("production", &self.production)
            .finish_non_exhaustive()
    }
}

impl Resolver {
    /// Resolver backed by the real filesystem and the process environment.
    pub fn new() -> Self {
        Self {
            probe: Arc::new(FsProbe),
            cwd: None,
            production: production_from_env(),
        }
    }

    pub fn with_probe(mut self, probe: impl Probe + 'static) -> Self {
        self.probe = Arc::new(probe);
        self
    }

    /// Directory used when `rootDir` is absent or relative.
    ///
    /// A relative `cwd` is taken against the process working directory.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Override the `NODE_ENV` reading.
    pub fn with_production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    pub fn is_production(&self) -> bool {
        self.production
    }

    /// Resolve `raw` into a complete configuration.
    ///
    /// `raw` is never modified. Fails only when a filesystem probe fails.
    pub fn resolve(&self, raw: &RawConfig) -> ResolveResult<ResolvedConfig> {
        let (mut tree, selector) = raw.clone().into_parts();

        let selected = selector.map(|selector| {
            let mode = selector.select();
            tree.insert("mode".to_string(), Value::String(mode.name().to_string()));
            mode
        });

        normalize(&mut tree);
        if is_unset(tree.get("dev")) {
            tree.insert("dev".to_string(), Value::Bool(!self.production));
        }
        fill_defaults(&mut tree, default_tree());

        let cwd = match &self.cwd {
            Some(cwd) if cwd.is_absolute() => cwd.clone(),
            Some(cwd) => std::path::absolute(cwd).map_err(ResolveError::CurrentDir)?,
            None => std::env::current_dir().map_err(ResolveError::CurrentDir)?,
        };
        let dirs = ProjectDirs::resolve(&tree, &cwd);
        dirs.write_to(&mut tree);

        let template_override = dirs.template_override();
        let template = if self.exists(&template_override)? {
            debug!(template = %template_override.display(), "using app template override");
            template_override
        } else {
            dirs.default_template()
        };
        tree.insert("appTemplatePath".to_string(), path_value(&template));

        let dev = tree.get("dev").cloned().unwrap_or(Value::Bool(false));
        if dev == Value::Bool(true) {
            reset_remote_public_path(&mut tree);
        }

        self.detect_store(&mut tree, &dirs.src_dir)?;

        if let Some(Value::Object(build)) = tree.get_mut("build") {
            resolve_style_pipeline(
                build,
                &[dirs.src_dir.as_path(), dirs.root_dir.as_path()],
                self.probe.as_ref(),
            )?;
        }

        if is_unset(tree.get("debug")) {
            tree.insert("debug".to_string(), dev);
        }

        let mode = selected.or_else(|| mode_from_tree(&tree));
        let preset = mode.map_or_else(empty_preset, Mode::preset);
        fill_defaults(&mut tree, preset);
        fill_defaults(&mut tree, default_tree());

        debug!(
            root = %dirs.root_dir.display(),
            mode = mode.map(Mode::name).unwrap_or("none"),
            "configuration resolved"
        );
        Ok(ResolvedConfig::new(tree))
    }

    fn exists(&self, path: &Path) -> ResolveResult<bool> {
        self.probe
            .exists(path)
            .map_err(|e| ResolveError::probe(path, e))
    }

    /// Enable the store when `srcDir/store` exists, unless explicitly disabled.
    fn detect_store(&self, tree: &mut Map<String, Value>, src_dir: &Path) -> ResolveResult<()> {
        if tree.get("store") != Some(&Value::Bool(false)) {
            let store_dir = src_dir.join(STORE_DIR);
            if self.exists(&store_dir)? {
                debug!(dir = %store_dir.display(), "store directory found, enabling store");
                tree.insert("store".to_string(), Value::Bool(true));
            }
        }
        if is_unset(tree.get("store")) {
            tree.insert("store".to_string(), Value::Bool(false));
        }
        Ok(())
    }
}

/// Resolve with the real filesystem and process environment.
pub fn resolve(raw: &RawConfig) -> ResolveResult<ResolvedConfig> {
    Resolver::new().resolve(raw)
}

fn production_from_env() -> bool {
    std::env::var(ENV_VAR).is_ok_and(|value| value == "production")
}

fn is_unset(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Absolute public URLs point at a CDN and are not served in development.
fn reset_remote_public_path(tree: &mut Map<String, Value>) {
    let Some(Value::Object(build)) = tree.get_mut("build") else {
        return;
    };
    let remote = build
        .get("publicPath")
        .and_then(Value::as_str)
        .is_some_and(|path| {
            ABSOLUTE_URL
                .as_ref()
                .is_some_and(|url| url.is_match(path))
        });
    if remote {
        debug!("ignoring absolute publicPath in development");
        build.insert(
            "publicPath".to_string(),
            Value::String(DEFAULT_PUBLIC_PATH.to_string()),
        );
    }
}

fn mode_from_tree(tree: &Map<String, Value>) -> Option<Mode> {
    match tree.get("mode") {
        Some(Value::String(name)) => {
            let mode = Mode::from_name(name);
            if mode.is_none() {
                warn!(mode = %name, "unknown mode, no preset applied");
            }
            mode
        }
        other => {
            warn!(mode = ?other, "mode is not a name, no preset applied");
            None
        }
    }
}
