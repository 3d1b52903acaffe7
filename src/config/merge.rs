//! Deep default-merge for configuration trees.
//!
//! The partial tree always wins; the base only fills gaps. Objects are merged
//! recursively, arrays and scalars are atomic.

use serde_json::{Map, Value};

/// Fill the gaps of `partial` from `base`, returning the merged tree.
///
/// - A key present in `partial` keeps its value, recursing when both sides are objects
/// - A key missing from `partial`, or set to null, takes a clone of `base`'s value
/// - Arrays are never concatenated: an array in `partial` replaces the base array
///
/// `base` is only borrowed, so shared defaults and presets cannot be modified.
///
/// # Example
/// ```
/// use serde_json::json;
/// use buildconf::config::merge_defaults;
///
/// let base = json!({
///     "router": { "mode": "history", "base": "/" },
///     "css": ["main.css"]
/// });
/// let partial = json!({
///     "router": { "base": "/app/" },
///     "css": []
/// });
/// let result = merge_defaults(partial, &base);
/// assert_eq!(result, json!({
///     "router": { "base": "/app/", "mode": "history" },
///     "css": []
/// }));
/// ```
pub fn merge_defaults(partial: Value, base: &Value) -> Value {
    match (partial, base) {
        (Value::Object(mut partial_map), Value::Object(base_map)) => {
            fill_map(&mut partial_map, base_map);
            Value::Object(partial_map)
        }
        // Null means "not specified"
        (Value::Null, base) => base.clone(),
        (partial, _) => partial,
    }
}

/// In-place form of [`merge_defaults`] for a top-level tree.
///
/// A non-object `base` has nothing to contribute and leaves `tree` as is.
pub fn fill_defaults(tree: &mut Map<String, Value>, base: &Value) {
    if let Value::Object(base_map) = base {
        fill_map(tree, base_map);
    }
}

fn fill_map(partial: &mut Map<String, Value>, base: &Map<String, Value>) {
    for (key, base_value) in base {
        match partial.get_mut(key) {
            Some(existing) => {
                let value = std::mem::take(existing);
                *existing = merge_defaults(value, base_value);
            }
            None => {
                partial.insert(key.clone(), base_value.clone());
            }
        }
    }
}
