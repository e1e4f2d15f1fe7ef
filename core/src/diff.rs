#![deny(missing_docs)]

//! # Diff Calculation
//!
//! Compares two JSON documents and produces the ordered list of edits turning
//! the first into the second.
//!
//! Maps and arrays are walked over the union of their keys (arrays by index,
//! so reordering shows up as positional updates). Differences in kind are
//! reported as a single `update` at the node where they start.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

/// Conflict-aware merging of two difference lists.
pub mod merge;

/// Applying a difference list to a document.
pub mod apply;

/// Path-indexed store for difference records.
pub mod trie;

pub use apply::apply;
pub use merge::{merge, Conflict, MergeResult};
pub use trie::Trie;

/// Kind of a single edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffType {
    /// The path only exists in the new document.
    Add,
    /// The path exists in both documents with different values.
    Update,
    /// The path only exists in the old document.
    Delete,
}

/// One edit between two documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difference {
    /// Location of the edit.
    pub path: Vec<String>,
    /// New value for `add` / `update`, removed value for `delete`.
    pub changes: Value,
    /// Edit kind.
    #[serde(rename = "type")]
    pub kind: DiffType,
}

impl Difference {
    /// Creates a record.
    pub fn new<S: Into<String>>(
        kind: DiffType,
        path: impl IntoIterator<Item = S>,
        changes: Value,
    ) -> Self {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            changes,
            kind,
        }
    }
}

impl Display for DiffType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiffType::Add => write!(f, "add"),
            DiffType::Update => write!(f, "update"),
            DiffType::Delete => write!(f, "delete"),
        }
    }
}

impl Display for Difference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, crate::pointer::to_pointer(&self.path))
    }
}

/// Computes the edits turning `old` into `new`.
///
/// Every disagreeing location yields exactly one record, in walk order: keys of
/// `old` first, then keys only present in `new`.
pub fn diff(old: &Value, new: &Value) -> Vec<Difference> {
    let mut out = Vec::new();
    let mut path = Vec::new();
    diff_into(Some(old), Some(new), &mut path, &mut out);
    out
}

fn diff_into(
    old: Option<&Value>,
    new: Option<&Value>,
    path: &mut Vec<String>,
    out: &mut Vec<Difference>,
) {
    let (old, new) = match (old, new) {
        (None, None) => return,
        (None, Some(added)) => {
            out.push(Difference::new(DiffType::Add, path.iter().cloned(), added.clone()));
            return;
        }
        (Some(removed), None) => {
            out.push(Difference::new(
                DiffType::Delete,
                path.iter().cloned(),
                removed.clone(),
            ));
            return;
        }
        (Some(old), Some(new)) => (old, new),
    };

    match (old, new) {
        (Value::Object(left), Value::Object(right)) => {
            let right_only = right.keys().filter(|key| !left.contains_key(*key));
            let keys: Vec<&String> = left.keys().chain(right_only).collect();
            for key in keys {
                path.push(key.clone());
                diff_into(left.get(key), right.get(key), path, out);
                path.pop();
            }
        }
        (Value::Array(left), Value::Array(right)) => {
            for idx in 0..left.len().max(right.len()) {
                path.push(idx.to_string());
                diff_into(left.get(idx), right.get(idx), path, out);
                path.pop();
            }
        }
        _ => {
            if !values_equal(old, new) {
                out.push(Difference::new(
                    DiffType::Update,
                    path.iter().cloned(),
                    new.clone(),
                ));
            }
        }
    }
}

/// Structural equality where numbers compare by value (`1 == 1.0`).
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .all(|(key, value)| y.get(key).is_some_and(|other| values_equal(value, other)))
        }
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| values_equal(l, r))
        }
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_identical_documents() {
        let doc = json!({ "a": [1, { "b": null }], "c": "x" });
        assert!(diff(&doc, &doc).is_empty());
    }

    #[test]
    fn test_add_update_delete() {
        let old = json!({ "info": { "title": "A", "version": "1" }, "gone": true });
        let new = json!({ "info": { "title": "B", "version": "1", "summary": "s" } });

        assert_eq!(
            diff(&old, &new),
            vec![
                Difference::new(DiffType::Update, ["info", "title"], json!("B")),
                Difference::new(DiffType::Add, ["info", "summary"], json!("s")),
                Difference::new(DiffType::Delete, ["gone"], json!(true)),
            ]
        );
    }

    #[test]
    fn test_kind_change_is_single_update() {
        let old = json!({ "a": { "deep": 1 }, "b": [1], "c": null });
        let new = json!({ "a": "flat", "b": { "0": 1 }, "c": {} });

        assert_eq!(
            diff(&old, &new),
            vec![
                Difference::new(DiffType::Update, ["a"], json!("flat")),
                Difference::new(DiffType::Update, ["b"], json!({ "0": 1 })),
                Difference::new(DiffType::Update, ["c"], json!({})),
            ]
        );
    }

    #[test]
    fn test_arrays_compare_by_position() {
        let old = json!({ "tags": ["a", "b", "c"] });
        let new = json!({ "tags": ["b", "a"] });

        assert_eq!(
            diff(&old, &new),
            vec![
                Difference::new(DiffType::Update, ["tags", "0"], json!("b")),
                Difference::new(DiffType::Update, ["tags", "1"], json!("a")),
                Difference::new(DiffType::Delete, ["tags", "2"], json!("c")),
            ]
        );
    }

    #[test]
    fn test_numbers_compare_by_value() {
        assert!(diff(&json!({ "n": 1 }), &json!({ "n": 1.0 })).is_empty());
        assert_eq!(diff(&json!({ "n": 1 }), &json!({ "n": 2 })).len(), 1);
    }

    #[test]
    fn test_root_replacement() {
        assert_eq!(
            diff(&json!(1), &json!("x")),
            vec![Difference::new(DiffType::Update, Vec::<String>::new(), json!("x"))]
        );
    }

    #[test]
    fn test_serializes_with_type_field() {
        let record = Difference::new(DiffType::Delete, ["a"], json!(1));
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({ "path": ["a"], "changes": 1, "type": "delete" })
        );
        assert_eq!(record.to_string(), "delete #/a");
    }
}
