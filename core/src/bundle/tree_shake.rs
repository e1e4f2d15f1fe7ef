//! Reachability pass dropping hoisted content nothing points to.

use super::references::is_local_ref;
use super::{EXTERNAL_KEY, EXTERNAL_URLS_KEY};
use crate::pointer::{get_by_path, parse_pointer, Path};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Removes every part of the `x-ext` area unreachable from the rest of the document.
///
/// Each referenced sub-path of a hoisted document is kept, along with anything
/// it references in turn. A target inside an array keeps the outermost such
/// array whole so indices stay valid. `x-ext-urls` entries whose key is gone
/// are removed; empty reserved areas are removed entirely.
pub fn tree_shake(document: &mut Value) {
    if document.get(EXTERNAL_KEY).is_none() {
        return;
    }

    let kept: HashSet<Path> = reachable_paths(document).into_iter().collect();
    let ancestors: HashSet<&[String]> = kept
        .iter()
        .flat_map(|path| (1..path.len()).map(move |len| &path[..len]))
        .collect();

    let mut path = vec![EXTERNAL_KEY.to_string()];
    let shaken = document
        .get(EXTERNAL_KEY)
        .and_then(|external| copy_kept(external, &mut path, &kept, &ancestors));

    let Some(root) = document.as_object_mut() else {
        return;
    };
    match shaken {
        Some(external) => {
            root.insert(EXTERNAL_KEY.to_string(), external);
        }
        None => {
            root.remove(EXTERNAL_KEY);
        }
    }

    let remaining: HashSet<String> = root
        .get(EXTERNAL_KEY)
        .and_then(Value::as_object)
        .map(|external| external.keys().cloned().collect())
        .unwrap_or_default();

    let urls_empty = match root.get_mut(EXTERNAL_URLS_KEY) {
        Some(Value::Object(urls)) => {
            urls.retain(|key, _| remaining.contains(key));
            urls.is_empty()
        }
        _ => false,
    };
    if urls_empty {
        root.remove(EXTERNAL_URLS_KEY);
    }
}

/// Copies the kept parts of `value`, visiting keys in document order.
fn copy_kept(
    value: &Value,
    path: &mut Path,
    kept: &HashSet<Path>,
    ancestors: &HashSet<&[String]>,
) -> Option<Value> {
    if kept.contains(path.as_slice()) {
        return Some(value.clone());
    }
    if !ancestors.contains(path.as_slice()) {
        return None;
    }

    match value {
        Value::Object(map) => {
            let mut copy = Map::new();
            for (key, child) in map {
                path.push(key.clone());
                if let Some(child) = copy_kept(child, path, kept, ancestors) {
                    copy.insert(key.clone(), child);
                }
                path.pop();
            }
            Some(Value::Object(copy))
        }
        _ => Some(value.clone()),
    }
}

/// Collects the `x-ext` paths reachable from the document body.
fn reachable_paths(document: &Value) -> Vec<Path> {
    let mut kept: Vec<Path> = Vec::new();
    let mut seen: HashSet<Path> = HashSet::new();
    let mut pending: Vec<Path> = Vec::new();

    if let Some(root) = document.as_object() {
        for (key, value) in root {
            if key != EXTERNAL_KEY && key != EXTERNAL_URLS_KEY {
                collect_external_targets(document, value, &mut pending);
            }
        }
    }

    while let Some(target) = pending.pop() {
        if !seen.insert(target.clone()) {
            continue;
        }
        if let Some(value) = get_by_path(document, &target) {
            collect_external_targets(document, value, &mut pending);
            kept.push(target);
        }
    }

    kept
}

fn collect_external_targets(document: &Value, value: &Value, out: &mut Vec<Path>) {
    match value {
        Value::Object(map) => {
            if let Some(reference) = map.get("$ref").and_then(Value::as_str) {
                if is_local_ref(reference) {
                    let path = parse_pointer(reference);
                    if path.len() >= 2 && path[0] == EXTERNAL_KEY {
                        out.push(widen_to_array(document, path));
                    }
                }
            }
            map.values()
                .for_each(|child| collect_external_targets(document, child, out));
        }
        Value::Array(items) => items
            .iter()
            .for_each(|item| collect_external_targets(document, item, out)),
        _ => {}
    }
}

/// Cuts `path` at the first array found below the hoisted document key.
fn widen_to_array(document: &Value, mut path: Path) -> Path {
    let cut = (2..path.len()).find(|&len| {
        get_by_path(document, &path[..len]).is_some_and(Value::is_array)
    });
    if let Some(len) = cut {
        path.truncate(len);
    }
    path
}
