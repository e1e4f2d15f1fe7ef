//! Merging two difference lists computed against the same base document.

use super::trie::Trie;
use super::{values_equal, DiffType, Difference};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Changes from the first list paired with the changes from the second list they clash with.
pub type Conflict = (Vec<Difference>, Vec<Difference>);

/// Outcome of [`merge`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeResult {
    /// Changes safe to apply: surviving first-list changes, then second-list changes.
    pub diffs: Vec<Difference>,
    /// Clashing groups, first-list anchored groups before second-list anchored ones.
    pub conflicts: Vec<Conflict>,
}

/// Merges `first` and `second`, separating compatible changes from conflicting ones.
///
/// * Two deletes on the same branch keep only the shallower one.
/// * A delete and an add/update inside the deleted branch conflict.
/// * Two adds/updates on the same path merge when their values never disagree
///   on a shared key, and conflict otherwise.
/// * Adds/updates on nested but different paths conflict.
///
/// Conflicts on the same change are grouped together.
pub fn merge(first: &[Difference], second: &[Difference]) -> MergeResult {
    let mut index = Trie::new();
    for (idx, change) in first.iter().enumerate() {
        index.add_path(&change.path, idx);
    }

    let mut skip_first: HashSet<usize> = HashSet::new();
    let mut skip_second: HashSet<usize> = HashSet::new();
    let mut merged: HashMap<usize, Value> = HashMap::new();
    let mut first_conflicts: IndexMap<usize, Conflict> = IndexMap::new();
    let mut second_conflicts: IndexMap<usize, Conflict> = IndexMap::new();

    for (idx2, change2) in second.iter().enumerate() {
        let mut related = Vec::new();
        index.find_match(&change2.path, |idx1| related.push(*idx1));

        for idx1 in related {
            let change1 = &first[idx1];
            match (change1.kind, change2.kind) {
                (DiffType::Delete, DiffType::Delete) => {
                    if change1.path.len() > change2.path.len() {
                        skip_first.insert(idx1);
                    } else {
                        skip_second.insert(idx2);
                    }
                }
                (_, DiffType::Delete) => {
                    skip_first.insert(idx1);
                    skip_second.insert(idx2);
                    second_conflicts
                        .entry(idx2)
                        .or_insert_with(|| (Vec::new(), vec![change2.clone()]))
                        .0
                        .push(change1.clone());
                }
                (DiffType::Add | DiffType::Update, _)
                    if change1.path == change2.path
                        && !has_key_collisions(&change1.changes, &change2.changes) =>
                {
                    let base = merged.remove(&idx1).unwrap_or_else(|| change1.changes.clone());
                    merged.insert(idx1, merge_values(base, &change2.changes));
                    skip_second.insert(idx2);
                }
                _ => {
                    skip_first.insert(idx1);
                    skip_second.insert(idx2);
                    first_conflicts
                        .entry(idx1)
                        .or_insert_with(|| (vec![change1.clone()], Vec::new()))
                        .1
                        .push(change2.clone());
                }
            }
        }
    }

    let surviving_first = first
        .iter()
        .enumerate()
        .filter(|(idx, _)| !skip_first.contains(idx))
        .map(|(idx, change)| match merged.remove(&idx) {
            Some(changes) => Difference {
                changes,
                ..change.clone()
            },
            None => change.clone(),
        });
    let diffs = surviving_first
        .chain(
            second
                .iter()
                .enumerate()
                .filter(|(idx, _)| !skip_second.contains(idx))
                .map(|(_, change)| change.clone()),
        )
        .collect();

    MergeResult {
        diffs,
        conflicts: first_conflicts
            .into_values()
            .chain(second_conflicts.into_values())
            .collect(),
    }
}

/// Whether two values disagree on any shared key (or differ outright as scalars).
fn has_key_collisions(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Object(left), Value::Object(right)) => left.iter().any(|(key, value)| {
            right
                .get(key)
                .is_some_and(|other| has_key_collisions(value, other))
        }),
        (Value::Array(left), Value::Array(right)) => left
            .iter()
            .zip(right)
            .any(|(value, other)| has_key_collisions(value, other)),
        _ => !values_equal(a, b),
    }
}

/// Deep union of two collision-free values.
fn merge_values(base: Value, incoming: &Value) -> Value {
    match (base, incoming) {
        (Value::Object(mut left), Value::Object(right)) => {
            for (key, value) in right {
                match left.get_mut(key) {
                    Some(existing) => *existing = merge_values(existing.take(), value),
                    None => {
                        left.insert(key.clone(), value.clone());
                    }
                }
            }
            Value::Object(left)
        }
        (Value::Array(mut left), Value::Array(right)) => {
            for (idx, value) in right.iter().enumerate() {
                match left.get_mut(idx) {
                    Some(existing) => *existing = merge_values(existing.take(), value),
                    None => left.push(value.clone()),
                }
            }
            Value::Array(left)
        }
        (base, _) => base,
    }
}
