//! Directory resolution against the project root.
//!
//! Pure path arithmetic: `.` and `..` are folded lexically and nothing here
//! touches the filesystem. Existence checks live in [`crate::probe`].

use serde_json::{Map, Value};
use std::path::{Component, Path, PathBuf};

use crate::config::defaults::{DEFAULT_BUILD_DIR, DEFAULT_MODULES_DIR};

/// Template used when the project has no `app.html` override.
pub const BUILD_TEMPLATE: &str = "views/app.template.html";

/// Conventional template override under `srcDir`.
pub const APP_TEMPLATE_OVERRIDE: &str = "app.html";

/// The absolute directories of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDirs {
    pub root_dir: PathBuf,
    pub src_dir: PathBuf,
    pub modules_dir: PathBuf,
    pub build_dir: PathBuf,
}

impl ProjectDirs {
    /// Resolve the four directories from a tree, in dependency order.
    ///
    /// Non-string or empty values count as absent.
    pub fn resolve(tree: &Map<String, Value>, cwd: &Path) -> Self {
        let root_dir = match non_empty(tree, "rootDir") {
            Some(root) => resolve(cwd, root),
            None => normalize(cwd),
        };
        let src_dir = match non_empty(tree, "srcDir") {
            Some(src) => resolve(&root_dir, src),
            None => root_dir.clone(),
        };
        let modules_dir = resolve(
            &root_dir,
            non_empty(tree, "modulesDir").unwrap_or(DEFAULT_MODULES_DIR),
        );
        let build_dir = normalize(
            &root_dir.join(non_empty(tree, "buildDir").unwrap_or(DEFAULT_BUILD_DIR)),
        );

        Self {
            root_dir,
            src_dir,
            modules_dir,
            build_dir,
        }
    }

    /// Template path used when `srcDir` has no override.
    pub fn default_template(&self) -> PathBuf {
        self.build_dir.join(BUILD_TEMPLATE)
    }

    /// Location of the user's template override.
    pub fn template_override(&self) -> PathBuf {
        self.src_dir.join(APP_TEMPLATE_OVERRIDE)
    }

    /// Write the directories back into the tree as strings.
    pub fn write_to(&self, tree: &mut Map<String, Value>) {
        tree.insert("rootDir".to_string(), path_value(&self.root_dir));
        tree.insert("srcDir".to_string(), path_value(&self.src_dir));
        tree.insert("modulesDir".to_string(), path_value(&self.modules_dir));
        tree.insert("buildDir".to_string(), path_value(&self.build_dir));
    }
}

fn non_empty<'a>(tree: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    tree.get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

/// Resolve `path` against `base`. An absolute `path` wins.
pub fn resolve(base: &Path, path: impl AsRef<Path>) -> PathBuf {
    normalize(&base.join(path))
}

/// Convert a path to a JSON string value.
pub fn path_value(path: &Path) -> Value {
    Value::String(path.to_string_lossy().into_owned())
}

/// Fold `.` and `..` components without consulting the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                components.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                // `..` above the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
        }
    }

    if components.is_empty() {
        return PathBuf::from(".");
    }
    components.iter().collect()
}
