//! Shorthand normalization.
//!
//! Rewrites the shorthand shapes users are allowed to write into their
//! canonical form before any defaults are merged. Anything not recognized is
//! left alone.

use serde_json::{Map, Value, json};
use tracing::debug;

/// Marker recording that `router.base` came from the user rather than the defaults.
pub const ROUTER_BASE_SPECIFIED: &str = "_routerBaseSpecified";

/// Normalize a cloned tree in place.
pub fn normalize(tree: &mut Map<String, Value>) {
    // `loading: true` means "use the default indicator"
    if tree.get("loading") == Some(&Value::Bool(true)) {
        tree.remove("loading");
    }

    if let Some(Value::Object(router)) = tree.get_mut("router")
        && let Some(Value::String(middleware)) = router.get("middleware")
    {
        let wrapped = Value::Array(vec![Value::String(middleware.clone())]);
        router.insert("middleware".to_string(), wrapped);
    }

    // A boolean marker from an earlier resolution is kept; anything else is recomputed
    if !matches!(tree.get(ROUTER_BASE_SPECIFIED), Some(Value::Bool(_))) {
        let specified = matches!(
            tree.get("router").and_then(|router| router.get("base")),
            Some(Value::String(_))
        );
        if specified {
            debug!("router base supplied by user");
        }
        tree.insert(ROUTER_BASE_SPECIFIED.to_string(), Value::Bool(specified));
    }

    if let Some(Value::String(name)) = tree.get("transition") {
        let expanded = json!({ "name": name });
        tree.insert("transition".to_string(), expanded);
    }
}
