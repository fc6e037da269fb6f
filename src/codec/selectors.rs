//! Conversions between `key: value` string lists (form layer) and maps (document).

use serde_json::{Map, Value};

/// Keys whose values are string lists in forms and maps in documents.
pub const SELECTOR_KEYS: &[&str] = &["labels", "annotations", "labelSelectors", "annotationSelectors"];

/// `["app: web"]` -> `{"app": "web"}`. Splits on the first `sep`.
pub fn arr_to_obj_by_sep<S: AsRef<str>>(items: &[S], sep: &str, remove_all_spaces: bool) -> Map<String, Value> {
    items
        .iter()
        .map(|item| {
            let item = if remove_all_spaces {
                item.as_ref().chars().filter(|c| !c.is_whitespace()).collect()
            } else {
                item.as_ref().to_string()
            };
            match item.split_once(sep) {
                Some((k, v)) => (k.to_string(), Value::String(v.to_string())),
                None => (item, Value::String(String::new())),
            }
        })
        .collect()
}

/// `{"app": "web"}` -> `["app: web"]` with `sep = ": "`.
pub fn obj_to_arr_by_sep(map: &Map<String, Value>, sep: &str) -> Vec<String> {
    map.iter()
        .map(|(k, v)| match v {
            Value::String(s) => format!("{}{}{}", k, sep, s),
            other => format!("{}{}{}", k, sep, other),
        })
        .collect()
}

/// Recursively turns selector maps back into `key: value` lists.
pub(crate) fn restore_selector_arrays(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, v)| {
                    let v = match v {
                        Value::Object(inner) if SELECTOR_KEYS.contains(&key.as_str()) => Value::Array(
                            obj_to_arr_by_sep(&inner, ": ")
                                .into_iter()
                                .map(Value::String)
                                .collect(),
                        ),
                        other => restore_selector_arrays(other),
                    };
                    (key, v)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(restore_selector_arrays).collect()),
        other => other,
    }
}
