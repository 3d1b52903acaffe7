//! Integration tests for configuration resolution against a real filesystem.
//!
//! Each test lays out a project in a temp directory and resolves with the
//! default filesystem probe:
//! - Path absoluteness and root-relative resolution
//! - Feature detection (template override, store, style config)
//! - Fixed-point and non-mutation guarantees

use buildconf::config::{
    Mode, ModeSelector, RawConfig, RenderSsr, Resolver, StylePipeline, default_tree,
};
use serde_json::json;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

/// Resolver with a fixed environment and working directory.
fn resolver(cwd: &Path) -> Resolver {
    Resolver::new().with_cwd(cwd).with_production(false)
}

/// Raw config rooted at `root`.
fn rooted(root: &Path) -> RawConfig {
    RawConfig::new().with("rootDir", root.to_string_lossy().into_owned())
}

#[test]
fn test_paths_are_absolute() {
    let temp = TempDir::new().unwrap();
    let raw = rooted(temp.path())
        .with("srcDir", "client/../client")
        .with("buildDir", "out")
        .with("modulesDir", "deps");

    let config = resolver(temp.path()).resolve(&raw).unwrap();

    for dir in [
        config.root_dir(),
        config.src_dir(),
        config.build_dir(),
        config.modules_dir(),
    ] {
        assert!(dir.is_absolute(), "{} is not absolute", dir.display());
        assert!(dir.starts_with(temp.path()));
    }
    assert_eq!(config.src_dir(), temp.path().join("client"));
    assert_eq!(config.build_dir(), temp.path().join("out"));
    assert_eq!(config.modules_dir(), temp.path().join("deps"));
}

#[test]
fn test_empty_config_has_every_option() {
    let temp = TempDir::new().unwrap();
    let config = resolver(temp.path()).resolve(&RawConfig::new()).unwrap();

    let keys = [
        "mode",
        "dev",
        "debug",
        "rootDir",
        "srcDir",
        "buildDir",
        "modulesDir",
        "build",
        "generate",
        "env",
        "head",
        "plugins",
        "css",
        "modules",
        "layouts",
        "serverMiddleware",
        "ErrorPage",
        "loading",
        "transition",
        "router",
        "render",
        "watchers",
    ];
    for key in keys {
        assert!(config.get(key).is_some(), "missing option {key}");
    }
    assert_eq!(config.get("ErrorPage"), Some(&json!(null)));

    for pointer in [
        "/build/filenames/app",
        "/generate/minify",
        "/head/meta",
        "/router/fallback",
        "/render/http2/push",
        "/render/etag",
    ] {
        assert!(config.pointer(pointer).is_some(), "missing option {pointer}");
    }
    assert_eq!(config.mode(), Some("universal"));
    assert_eq!(config.root_dir(), temp.path());
}

#[test]
fn test_relative_root_against_cwd() {
    let temp = TempDir::new().unwrap();
    let raw = RawConfig::new().with("rootDir", "site");

    let config = resolver(temp.path()).resolve(&raw).unwrap();
    assert_eq!(config.root_dir(), temp.path().join("site"));
    assert_eq!(config.build_dir(), temp.path().join("site").join(".nuxt"));
}

#[test]
fn test_app_template_override_detected() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("app.html"), "<html>{{ APP }}</html>").unwrap();

    let config = resolver(temp.path())
        .resolve(&rooted(temp.path()).with("srcDir", "src"))
        .unwrap();
    assert_eq!(config.app_template_path(), src.join("app.html"));
}

#[test]
fn test_store_directory_enables_store() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("store")).unwrap();

    let config = resolver(temp.path()).resolve(&rooted(temp.path())).unwrap();
    assert!(config.store());

    let config = resolver(temp.path())
        .resolve(&rooted(temp.path()).with("store", false))
        .unwrap();
    assert!(!config.store());
}

#[test]
fn test_style_config_in_root_forces_discovery() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".postcssrc.json"), "{}").unwrap();

    let raw = rooted(temp.path())
        .with("srcDir", "src")
        .with("build", json!({"postcss": ["autoprefixer"]}));
    let config = resolver(temp.path()).resolve(&raw).unwrap();
    assert_eq!(config.style_pipeline(), Some(StylePipeline::Discover));
}

#[test]
fn test_style_disable_wins_over_discovery() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("postcss.config.js"), "module.exports = {}").unwrap();

    let raw = rooted(temp.path()).with("build", json!({"postcss": false}));
    let config = resolver(temp.path()).resolve(&raw).unwrap();
    assert_eq!(config.pointer("/build/postcss"), Some(&json!(false)));
}

#[test]
fn test_style_defaults_without_config_file() {
    let temp = TempDir::new().unwrap();
    let raw = rooted(temp.path()).with("build", json!({"cssSourceMap": false}));

    let config = resolver(temp.path()).resolve(&raw).unwrap();
    assert_eq!(
        config.pointer("/build/postcss"),
        Some(&json!({
            "sourceMap": false,
            "plugins": {
                "postcss-import": {},
                "postcss-url": {},
                "postcss-cssnext": {}
            }
        }))
    );
}

#[test]
fn test_router_base_specified() {
    let temp = TempDir::new().unwrap();
    let raw = rooted(temp.path()).with("router", json!({"base": "/app/"}));

    let config = resolver(temp.path()).resolve(&raw).unwrap();
    assert_eq!(config.router_base(), Some("/app/"));
    assert!(config.router_base_specified());
    assert_eq!(
        config.pointer("/router/linkActiveClass"),
        Some(&json!("nuxt-link-active"))
    );
}

#[test]
fn test_user_values_win_at_depth() {
    let temp = TempDir::new().unwrap();
    let raw = rooted(temp.path()).with(
        "generate",
        json!({"minify": {"collapseWhitespace": false}, "routes": ["/about"]}),
    );

    let config = resolver(temp.path()).resolve(&raw).unwrap();
    assert_eq!(
        config.pointer("/generate/minify/collapseWhitespace"),
        Some(&json!(false))
    );
    assert_eq!(
        config.pointer("/generate/minify/minifyCSS"),
        Some(&json!(true))
    );
    assert_eq!(config.pointer("/generate/routes"), Some(&json!(["/about"])));
    assert_eq!(config.pointer("/generate/dir"), Some(&json!("dist")));
}

#[test]
fn test_static_mode_from_selector() {
    let temp = TempDir::new().unwrap();
    let raw = rooted(temp.path()).with_mode(ModeSelector::deferred(|| Mode::Static));

    let config = resolver(temp.path()).resolve(&raw).unwrap();
    assert_eq!(config.build_ssr(), Some(true));
    assert_eq!(config.render_ssr(), Some(RenderSsr::Static));
}

#[test]
fn test_resolution_is_a_fixed_point() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("store")).unwrap();
    fs::write(temp.path().join("app.html"), "<html></html>").unwrap();

    let resolver = resolver(temp.path());
    let raw = rooted(temp.path())
        .with("mode", "spa")
        .with("transition", "fade")
        .with("loading", true)
        .with("router", json!({"middleware": "auth"}))
        .with("build", json!({"postcss": {"plugins": {"autoprefixer": {}}}}));

    let once = resolver.resolve(&raw).unwrap();
    let twice = resolver.resolve(&RawConfig::from(once.clone())).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_inputs_and_defaults_not_mutated() {
    let temp = TempDir::new().unwrap();
    let defaults_before = default_tree().clone();
    let raw = rooted(temp.path())
        .with("transition", "fade")
        .with("router", json!({"middleware": "auth"}))
        .with("loading", true);
    let raw_before = raw.tree().clone();

    resolver(temp.path()).resolve(&raw).unwrap();

    assert_eq!(raw.tree(), &raw_before);
    assert_eq!(default_tree(), &defaults_before);
    assert_eq!(Mode::Spa.preset(), &json!({"build": {"ssr": false}, "render": {"ssr": false}}));
}

#[test]
fn test_concurrent_resolution() {
    let temp = TempDir::new().unwrap();
    let resolver = Arc::new(resolver(temp.path()));

    let handles: Vec<_> = ["universal", "spa", "static"]
        .into_iter()
        .map(|mode| {
            let resolver = Arc::clone(&resolver);
            let raw = rooted(temp.path()).with("mode", mode);
            thread::spawn(move || resolver.resolve(&raw).unwrap())
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results[0].render_ssr(), Some(RenderSsr::Enabled));
    assert_eq!(results[1].render_ssr(), Some(RenderSsr::Disabled));
    assert_eq!(results[2].render_ssr(), Some(RenderSsr::Static));
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_is_an_error() {
    use buildconf::error::ResolveError;
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let src = temp.path().join("locked");
    fs::create_dir_all(&src).unwrap();
    fs::set_permissions(&src, fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores permission bits, so there is nothing to observe
    let denied = fs::read_dir(&src).is_err();
    let result = resolver(temp.path()).resolve(&rooted(temp.path()).with("srcDir", "locked"));
    fs::set_permissions(&src, fs::Permissions::from_mode(0o755)).unwrap();

    if denied {
        assert!(matches!(result, Err(ResolveError::Probe { .. })));
    } else {
        assert!(result.is_ok());
    }
}
