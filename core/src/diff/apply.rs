//! Applying a difference list to a document.

use super::{DiffType, Difference};
use crate::error::{AppError, AppResult};
use crate::pointer::{get_by_path_mut, to_pointer};
use indexmap::IndexMap;
use serde_json::Value;

/// Applies `diffs` to `document` in order.
///
/// Array element removals are postponed until every other change is written,
/// then done per array from the highest index down, so the indices recorded
/// by [`diff`](super::diff) stay valid.
///
/// # Errors
///
/// [`AppError::InvalidChanges`] when a parent node is missing or cannot hold
/// the change, or when the document root is deleted. Changes before the failing
/// one have already been written.
pub fn apply(document: &mut Value, diffs: &[Difference]) -> AppResult<()> {
    let mut removals: IndexMap<Vec<String>, Vec<usize>> = IndexMap::new();

    for change in diffs {
        let Some((last, parents)) = change.path.split_last() else {
            match change.kind {
                DiffType::Delete => {
                    return Err(AppError::InvalidChanges(
                        "the document root cannot be deleted".to_string(),
                    ))
                }
                _ => *document = change.changes.clone(),
            }
            continue;
        };

        let parent = get_by_path_mut(document, parents).ok_or_else(|| {
            AppError::InvalidChanges(format!("no parent node for {}", to_pointer(&change.path)))
        })?;

        match (change.kind, parent) {
            (DiffType::Delete, Value::Object(map)) => {
                map.shift_remove(last.as_str());
            }
            (DiffType::Delete, Value::Array(_)) => {
                let idx = parse_index(last, &change.path)?;
                removals.entry(parents.to_vec()).or_default().push(idx);
            }
            (_, Value::Object(map)) => {
                map.insert(last.clone(), change.changes.clone());
            }
            (_, Value::Array(items)) => {
                let idx = parse_index(last, &change.path)?;
                match idx.cmp(&items.len()) {
                    std::cmp::Ordering::Less => items[idx] = change.changes.clone(),
                    std::cmp::Ordering::Equal => items.push(change.changes.clone()),
                    std::cmp::Ordering::Greater => {
                        return Err(AppError::InvalidChanges(format!(
                            "index out of bounds at {}",
                            to_pointer(&change.path)
                        )))
                    }
                }
            }
            _ => {
                return Err(AppError::InvalidChanges(format!(
                    "parent of {} is not a container",
                    to_pointer(&change.path)
                )))
            }
        }
    }

    for (path, mut indices) in removals {
        indices.sort_unstable_by(|a, b| b.cmp(a));
        indices.dedup();
        if let Some(Value::Array(items)) = get_by_path_mut(document, &path) {
            for idx in indices {
                if idx < items.len() {
                    items.remove(idx);
                }
            }
        }
    }

    Ok(())
}

fn parse_index(segment: &str, path: &[String]) -> AppResult<usize> {
    segment.parse::<usize>().map_err(|_| {
        AppError::InvalidChanges(format!("'{segment}' is not an array index in {}", to_pointer(path)))
    })
}
