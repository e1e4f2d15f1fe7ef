#![deny(missing_docs)]

//! # JSON Pointer Utilities
//!
//! Parsing, reading and writing JSON-Pointer-style paths into a `serde_json::Value` tree.
//!
//! A path is an ordered list of string segments; array indices are numeric-string segments.

use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// A location inside a document tree.
pub type Path = Vec<String>;

/// Escapes a single segment for use inside a JSON pointer (`~` -> `~0`, `/` -> `~1`).
pub fn escape_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Decodes a JSON Pointer segment (handles `~1`, `~0` and percent-encoding).
pub fn unescape_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}

/// Parses a pointer such as `#/components/schemas/User` into its segments.
///
/// The leading `#` segment and any empty segments are dropped, so `""`, `"#"`
/// and `"#/"` all yield an empty path.
pub fn parse_pointer(pointer: &str) -> Path {
    pointer
        .split('/')
        .enumerate()
        .filter(|(idx, segment)| !(*idx == 0 && *segment == "#"))
        .filter(|(_, segment)| !segment.is_empty())
        .map(|(_, segment)| unescape_segment(segment))
        .collect()
}

/// Renders a path back into a local reference string (`#/a/b`).
pub fn to_pointer<S: AsRef<str>>(path: &[S]) -> String {
    let mut out = String::from("#");
    for segment in path {
        out.push('/');
        out.push_str(&escape_segment(segment.as_ref()));
    }
    out
}

/// Reads the value at `path`.
///
/// Returns `None` as soon as a segment is missing or an intermediate value is a
/// scalar (including `null`).
pub fn get_by_path<'a, S: AsRef<str>>(doc: &'a Value, path: &[S]) -> Option<&'a Value> {
    path.iter()
        .try_fold(doc, |current, segment| child(current, segment.as_ref()))
}

/// Mutable variant of [`get_by_path`].
pub fn get_by_path_mut<'a, S: AsRef<str>>(
    doc: &'a mut Value,
    path: &[S],
) -> Option<&'a mut Value> {
    path.iter().try_fold(doc, |current, segment| {
        let segment = segment.as_ref();
        match current {
            Value::Object(map) => map.get_mut(segment),
            Value::Array(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(move |idx| items.get_mut(idx)),
            _ => None,
        }
    })
}

/// Walks `path`, creating every missing node on the way, and returns the deepest node.
///
/// A missing node is created as an array when its own segment is a non-negative
/// integer and as a map otherwise. Existing nodes are never replaced. Returns
/// `None` when an existing scalar sits on the path and nothing can be created below it.
pub fn create_path_from_segments<'a, S: AsRef<str>>(
    doc: &'a mut Value,
    path: &[S],
) -> Option<&'a mut Value> {
    let mut current = doc;
    for segment in path {
        let segment = segment.as_ref();
        current = match current {
            Value::Object(map) => map
                .entry(segment.to_string())
                .or_insert_with(|| empty_container_for(segment)),
            Value::Array(items) => {
                let idx = segment.parse::<usize>().ok()?;
                if idx >= items.len() {
                    items.resize(idx + 1, Value::Null);
                }
                let slot = &mut items[idx];
                if slot.is_null() {
                    *slot = empty_container_for(segment);
                }
                slot
            }
            _ => return None,
        };
    }
    Some(current)
}

/// Writes `value` at `path`, creating intermediate maps as needed.
///
/// Returns `false` when the value could not be placed (empty path, or a scalar blocks the way).
pub fn set_value_at_path<S: AsRef<str>>(doc: &mut Value, path: &[S], value: Value) -> bool {
    let Some((last, parents)) = path.split_last() else {
        return false;
    };

    let mut current = doc;
    for segment in parents {
        current = match current {
            Value::Object(map) => map
                .entry(segment.as_ref().to_string())
                .or_insert_with(|| Value::Object(Map::new())),
            _ => return false,
        };
    }

    match current {
        Value::Object(map) => {
            map.insert(last.as_ref().to_string(), value);
            true
        }
        Value::Array(items) => match last.as_ref().parse::<usize>() {
            Ok(idx) if idx < items.len() => {
                items[idx] = value;
                true
            }
            Ok(idx) if idx == items.len() => {
                items.push(value);
                true
            }
            _ => false,
        },
        _ => false,
    }
}

/// Follows a chain of local `$ref` nodes starting at `value` and returns the final target.
///
/// Returns `value` itself when it is not a reference. Returns `None` for dangling,
/// external or cyclic chains.
pub fn get_resolved_ref<'a>(doc: &'a Value, value: &'a Value) -> Option<&'a Value> {
    let mut seen = HashSet::new();
    let mut current = value;
    while let Some(reference) = current.get("$ref").and_then(Value::as_str) {
        if !reference.starts_with('#') || !seen.insert(reference) {
            return None;
        }
        current = get_by_path(doc, &parse_pointer(reference))?;
    }
    Some(current)
}

fn child<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|idx| items.get(idx)),
        _ => None,
    }
}

fn empty_container_for(segment: &str) -> Value {
    if segment.parse::<usize>().is_ok() {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}
