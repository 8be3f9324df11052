//! Recursive helpers over JSON object trees: merge, clone, path access and
//! flatten/unflatten.

use serde_json::{Map, Value};

/// Indices above this are stored as object keys instead of padding an array.
const MAX_ARRAY_INDEX: usize = 1 << 16;

/// Recursively combines `left` and `right`.
///
/// Arrays under the same key are concatenated, objects are merged key by key,
/// and any other conflict resolves to the value from `right`. Neither input
/// is modified.
pub fn deep_merge(left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Object(l), Value::Object(r)) => {
            let mut merged = l.clone();
            for (key, r_value) in r {
                let value = match merged.get(key) {
                    Some(l_value) => deep_merge(l_value, r_value),
                    None => r_value.clone(),
                };
                merged.insert(key.clone(), value);
            }
            Value::Object(merged)
        }
        (Value::Array(l), Value::Array(r)) => {
            Value::Array(l.iter().chain(r.iter()).cloned().collect())
        }
        (_, r) => r.clone(),
    }
}

/// Structural copy of the whole tree. Every `Value` is plain data, so there is
/// no opaque-reference case to handle.
pub fn deep_clone(value: &Value) -> Value {
    value.clone()
}

/// Collapses a nested structure into a single-level map keyed by
/// `separator`-joined paths. Array elements use their index as the segment.
/// Empty objects and arrays are kept as leaf values so that
/// [`unflatten_object`] can restore them.
pub fn flatten_object(value: &Value, separator: &str) -> Map<String, Value> {
    let mut out = Map::new();
    flatten_into(value, None, separator, &mut out);
    out
}

/// `None` is the root; `Some("")` is a real empty-string key.
fn join_path(prefix: Option<&str>, segment: &str, separator: &str) -> String {
    match prefix {
        None => segment.to_string(),
        Some(prefix) => format!("{}{}{}", prefix, separator, segment),
    }
}

fn flatten_into(
    value: &Value,
    prefix: Option<&str>,
    separator: &str,
    out: &mut Map<String, Value>,
) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                let path = join_path(prefix, key, separator);
                flatten_into(child, Some(&path), separator, out);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                let path = join_path(prefix, &index.to_string(), separator);
                flatten_into(child, Some(&path), separator, out);
            }
        }
        Value::Object(_) | Value::Array(_) if prefix.is_none() => {}
        leaf => {
            out.insert(prefix.unwrap_or_default().to_string(), leaf.clone());
        }
    }
}

/// Rebuilds a nested object from `separator`-joined keys. A path segment that
/// is followed by a numeric segment becomes an array.
pub fn unflatten_object(flat: &Map<String, Value>, separator: &str) -> Value {
    let mut root = Value::Object(Map::new());
    for (key, value) in flat {
        let segments: Vec<&str> = key.split(separator).collect();
        insert_at(&mut root, &segments, value.clone());
    }
    root
}

fn insert_at(target: &mut Value, segments: &[&str], value: Value) {
    match segments.split_first() {
        None => *target = value,
        Some((head, rest)) => insert_at(child_slot(target, head), rest, value),
    }
}

/// Only plain ASCII digit runs are indices; `"+1"` or `""` stay object keys.
fn digit_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse::<usize>().ok()
}

fn parse_index(segment: &str) -> Option<usize> {
    digit_index(segment).filter(|index| *index <= MAX_ARRAY_INDEX)
}

/// Returns the slot for `segment` inside `target`, first turning `target`
/// into a container that can hold it.
fn child_slot<'a>(target: &'a mut Value, segment: &str) -> &'a mut Value {
    let index = parse_index(segment);

    let as_object = match (&*target, index) {
        (Value::Array(items), None) => Some(
            items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v.clone()))
                .collect::<Map<String, Value>>(),
        ),
        _ => None,
    };
    if let Some(map) = as_object {
        *target = Value::Object(map);
    } else if !target.is_object() && !target.is_array() {
        *target = match index {
            Some(_) => Value::Array(Vec::new()),
            None => Value::Object(Map::new()),
        };
    }

    match (target, index) {
        (Value::Array(items), Some(i)) => {
            if items.len() <= i {
                items.resize(i + 1, Value::Null);
            }
            &mut items[i]
        }
        (Value::Object(map), _) => map.entry(segment.to_string()).or_insert(Value::Null),
        // normalized above: arrays only remain when `index` is Some
        (slot, _) => slot,
    }
}

/// Looks up a dot-separated path. Numeric segments index into arrays.
pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => digit_index(segment).and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Writes `value` at a dot-separated path, creating intermediate objects or
/// arrays as needed, and returns the same `target` it was given.
pub fn set_path<'a>(target: &'a mut Value, path: &str, value: Value) -> &'a mut Value {
    if path.is_empty() {
        *target = value;
        return target;
    }
    let segments: Vec<&str> = path.split('.').collect();
    insert_at(target, &segments, value);
    target
}

pub fn pick(object: &Map<String, Value>, keys: &[String]) -> Map<String, Value> {
    keys.iter()
        .filter_map(|key| object.get(key).map(|v| (key.clone(), v.clone())))
        .collect()
}

pub fn omit(object: &Map<String, Value>, keys: &[String]) -> Map<String, Value> {
    object
        .iter()
        .filter(|(key, _)| !keys.contains(key))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// `null`, `""`, `[]` and `{}` are empty.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

pub fn deep_equal(a: &Value, b: &Value) -> bool {
    a == b
}
