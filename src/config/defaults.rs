//! Built-in default tree.
//!
//! Every supported option and its default value. Options whose default is
//! "unset" (`debug`, `build.ssr`, `render.ssr`) are left out so later layers
//! can fill them.

use serde_json::{Value, json};
use std::sync::LazyLock;

/// Build directory name, relative to `rootDir`.
pub const DEFAULT_BUILD_DIR: &str = ".nuxt";

/// Modules directory name, relative to `rootDir`.
pub const DEFAULT_MODULES_DIR: &str = "node_modules";

/// Public path for built assets.
pub const DEFAULT_PUBLIC_PATH: &str = "/_nuxt/";

static DEFAULT_TREE: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "mode": "universal",
        "buildDir": DEFAULT_BUILD_DIR,
        "build": {
            "analyze": false,
            "extractCSS": false,
            "cssSourceMap": true,
            "publicPath": DEFAULT_PUBLIC_PATH,
            "filenames": {
                "css": "common.[contenthash].css",
                "manifest": "manifest.[hash].js",
                "vendor": "vendor.[chunkhash].js",
                "app": "app.[chunkhash].js",
                "chunk": "[name].[chunkhash].js"
            },
            "vendor": [],
            "plugins": [],
            "babel": {},
            "postcss": {},
            "templates": [],
            "watch": [],
            "devMiddleware": {},
            "hotMiddleware": {}
        },
        "generate": {
            "dir": "dist",
            "routes": [],
            "concurrency": 500,
            "interval": 0,
            "minify": {
                "collapseBooleanAttributes": true,
                "collapseWhitespace": true,
                "decodeEntities": true,
                "minifyCSS": true,
                "minifyJS": true,
                "processConditionalComments": true,
                "removeAttributeQuotes": false,
                "removeComments": false,
                "removeEmptyAttributes": true,
                "removeOptionalTags": true,
                "removeRedundantAttributes": true,
                "removeScriptTypeAttributes": false,
                "removeStyleLinkTypeAttributes": false,
                "removeTagWhitespace": false,
                "sortAttributes": true,
                "sortClassName": false,
                "trimCustomFragments": true,
                "useShortDoctype": true
            }
        },
        "env": {},
        "head": {
            "meta": [],
            "link": [],
            "style": [],
            "script": []
        },
        "plugins": [],
        "css": [],
        "modules": [],
        "layouts": {},
        "serverMiddleware": [],
        "ErrorPage": null,
        "loading": {
            "color": "black",
            "failedColor": "red",
            "height": "2px",
            "duration": 5000
        },
        "transition": {
            "name": "page",
            "mode": "out-in"
        },
        "router": {
            "mode": "history",
            "base": "/",
            "routes": [],
            "middleware": [],
            "linkActiveClass": "nuxt-link-active",
            "linkExactActiveClass": "nuxt-link-exact-active",
            "extendRoutes": null,
            "scrollBehavior": null,
            "fallback": false
        },
        "render": {
            "bundleRenderer": {},
            "resourceHints": true,
            "http2": {
                "push": false
            },
            "static": {},
            "gzip": {
                "threshold": 0
            },
            // Weak etags are faster for responses over 5KB
            "etag": {
                "weak": true
            }
        },
        "watchers": {
            "webpack": {},
            "chokidar": {}
        }
    })
});

/// The process-wide default tree. Only a shared reference is handed out.
pub fn default_tree() -> &'static Value {
    &DEFAULT_TREE
}
