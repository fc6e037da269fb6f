use crate::codec::selectors::{SELECTOR_KEYS, arr_to_obj_by_sep};
use crate::workflow::ExperimentKind;
use serde_json::{Map, Value};

/// Drops empty values from a document tree and reshapes form-layer lists.
///
/// Runs bottom-up: `null`, `""`, and collections that end up empty are removed;
/// `{key0: {key, value}, key1: ...}` pair lists collapse into a map (or a list of
/// `[key, value]` pairs when the values are lists); string lists under the
/// selector keys become `key: value` maps. An experiment's parameter object
/// (`podChaos`, ...) is required by the document and stays as `{}`.
pub(crate) fn prune(value: Value) -> Option<Value> {
    prune_entry(None, value)
}

fn prune_entry(key: Option<&str>, value: Value) -> Option<Value> {
    let value = match value {
        Value::Null => return None,
        Value::String(s) if s.is_empty() => return None,
        Value::Array(items) => {
            let items: Vec<Value> = items.into_iter().filter_map(|v| prune_entry(None, v)).collect();
            if items.is_empty() {
                return None;
            }
            Value::Array(items)
        }
        Value::Object(map) => {
            let map: Map<String, Value> = map
                .into_iter()
                .filter_map(|(k, v)| prune_entry(Some(k.as_str()), v).map(|v| (k, v)))
                .collect();
            if map.is_empty() {
                return key
                    .and_then(ExperimentKind::from_field_name)
                    .map(|_| Value::Object(map));
            }
            collapse_pair_list(map)
        }
        other => other,
    };

    match (key, value) {
        (Some(k), Value::Array(items)) if SELECTOR_KEYS.contains(&k) => Some(selectors_to_map(items)),
        (_, value) => Some(value),
    }
}

fn collapse_pair_list(map: Map<String, Value>) -> Value {
    let Some(first) = map.get("key0") else {
        return Value::Object(map);
    };

    let string_values = first.get("value").is_some_and(Value::is_string);
    if string_values {
        let pairs: Map<String, Value> = map
            .into_iter()
            .filter_map(|(_, pair)| {
                let key = pair.get("key")?.as_str()?.to_string();
                let value = pair.get("value")?.clone();
                Some((key, value))
            })
            .collect();
        Value::Object(pairs)
    } else {
        let groups = map
            .into_iter()
            .map(|(_, pair)| {
                let key = pair.get("key").cloned().unwrap_or(Value::Null);
                let values = pair
                    .get("value")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default();
                Value::Array(
                    values
                        .into_iter()
                        .map(|v| Value::Array(vec![key.clone(), v]))
                        .collect(),
                )
            })
            .collect();
        Value::Array(groups)
    }
}

fn selectors_to_map(items: Vec<Value>) -> Value {
    if !items.iter().all(Value::is_string) {
        return Value::Array(items);
    }
    let strings: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
    Value::Object(arr_to_obj_by_sep(&strings, ":", true))
}
