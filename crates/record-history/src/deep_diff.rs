//! Structural diff of two JSON documents.
//!
//! Differences are reported under dotted paths (`baz.qux`). Objects and
//! arrays are both walked as keyed containers, arrays by decimal index, so
//! an element moving inside an array shows up as per-index changes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A field present only in the right-hand document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddedEntry {
    pub new: Value,
}

/// A field present only in the left-hand document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemovedEntry {
    pub old: Value,
}

/// A field present in both documents with different values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangedEntry {
    pub old: Value,
    pub new: Value,
}

/// Added/removed/changed decomposition keyed by dotted path.
///
/// Every path lands in at most one of the three maps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffResult {
    pub added: BTreeMap<String, AddedEntry>,
    pub removed: BTreeMap<String, RemovedEntry>,
    pub changed: BTreeMap<String, ChangedEntry>,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Total number of reported paths.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.added.contains_key(path)
            || self.removed.contains_key(path)
            || self.changed.contains_key(path)
    }
}

/// Computes the structural difference from `left` to `right`.
///
/// When the documents differ and either one is a scalar there are no keys
/// to walk, so the whole document is reported as changed under the empty
/// path.
pub fn deep_diff(left: &Value, right: &Value) -> DiffResult {
    let mut diffs = DiffResult::default();
    if left == right {
        return diffs;
    }
    if is_container(left) && is_container(right) {
        diff_containers(left, right, "", &mut diffs);
    } else {
        diffs.changed.insert(
            String::new(),
            ChangedEntry {
                old: left.clone(),
                new: right.clone(),
            },
        );
    }
    diffs
}

fn diff_containers(left: &Value, right: &Value, path: &str, diffs: &mut DiffResult) {
    let left_keys = keys(left);
    let right_keys = keys(right);

    for key in &left_keys {
        let full_key = join_path(path, key);
        let old = child(left, key);

        match (old, child(right, key)) {
            (Some(old), Some(new)) => {
                if old == new {
                    continue;
                }
                if is_container(old) && is_container(new) {
                    diff_containers(old, new, &full_key, diffs);
                } else {
                    diffs.changed.insert(
                        full_key,
                        ChangedEntry {
                            old: old.clone(),
                            new: new.clone(),
                        },
                    );
                }
            }
            (Some(old), None) => {
                diffs
                    .removed
                    .insert(full_key, RemovedEntry { old: old.clone() });
            }
            _ => {}
        }
    }

    for key in &right_keys {
        if child(left, key).is_some() {
            continue;
        }
        if let Some(new) = child(right, key) {
            diffs
                .added
                .insert(join_path(path, key), AddedEntry { new: new.clone() });
        }
    }
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

fn keys(value: &Value) -> Vec<String> {
    match value {
        Value::Object(map) => map.keys().cloned().collect(),
        Value::Array(items) => (0..items.len()).map(|i| i.to_string()).collect(),
        _ => Vec::new(),
    }
}

fn child<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key),
        // Only canonical indices match, so the object key "01" never
        // lines up with array index 1.
        Value::Array(items) => key
            .parse::<usize>()
            .ok()
            .filter(|index| index.to_string() == key)
            .and_then(|index| items.get(index)),
        _ => None,
    }
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identical_documents_have_no_differences() {
        let doc = json!({
            "foo": "bar",
            "nested": { "list": [1, 2, { "deep": null }], "flag": true },
            "n": 1.5
        });
        assert!(deep_diff(&doc, &doc.clone()).is_empty());
        assert!(deep_diff(&json!({}), &json!({})).is_empty());
        assert!(deep_diff(&json!("x"), &json!("x")).is_empty());
    }

    #[test]
    fn nested_added_removed_and_changed_fields() {
        let left = json!({
            "foo": "bar",
            "baz": { "qux": true, "quux": true },
            "tobedeleted": true
        });
        let right = json!({
            "new": true,
            "foo": "updated",
            "baz": { "qux": "deep update" }
        });

        let diff = deep_diff(&left, &right);

        assert_eq!(diff.added.len(), 1);
        assert_eq!(diff.added["new"], AddedEntry { new: json!(true) });

        assert_eq!(diff.removed.len(), 2);
        assert_eq!(diff.removed["tobedeleted"], RemovedEntry { old: json!(true) });
        assert_eq!(diff.removed["baz.quux"], RemovedEntry { old: json!(true) });

        assert_eq!(diff.changed.len(), 2);
        assert_eq!(
            diff.changed["foo"],
            ChangedEntry {
                old: json!("bar"),
                new: json!("updated")
            }
        );
        assert_eq!(
            diff.changed["baz.qux"],
            ChangedEntry {
                old: json!(true),
                new: json!("deep update")
            }
        );
    }

    #[test]
    fn serialized_shape_matches_wire_format() {
        let diff = deep_diff(
            &json!({ "a": 1, "gone": 2 }),
            &json!({ "a": 3, "fresh": 4 }),
        );
        let value = serde_json::to_value(&diff).unwrap();
        assert_eq!(
            value,
            json!({
                "added": { "fresh": { "new": 4 } },
                "removed": { "gone": { "old": 2 } },
                "changed": { "a": { "old": 1, "new": 3 } }
            })
        );
    }

    #[test]
    fn type_mismatch_is_a_change_not_a_recursion() {
        let diff = deep_diff(
            &json!({ "field": { "inner": 1 } }),
            &json!({ "field": "flat" }),
        );
        assert_eq!(diff.len(), 1);
        assert_eq!(diff.changed["field"].old, json!({ "inner": 1 }));
        assert_eq!(diff.changed["field"].new, json!("flat"));
    }

    #[test]
    fn null_is_a_value_not_an_absence() {
        let diff = deep_diff(&json!({ "a": null }), &json!({ "a": 0 }));
        assert!(diff.changed.contains_key("a"));

        let diff = deep_diff(&json!({}), &json!({ "a": null }));
        assert_eq!(diff.added["a"].new, Value::Null);
    }

    #[test]
    fn arrays_are_compared_by_index() {
        let diff = deep_diff(
            &json!({ "tags": ["a", "b", "c"] }),
            &json!({ "tags": ["b", "c"] }),
        );
        assert_eq!(diff.changed["tags.0"].old, json!("a"));
        assert_eq!(diff.changed["tags.0"].new, json!("b"));
        assert_eq!(diff.changed["tags.1"].old, json!("b"));
        assert_eq!(diff.changed["tags.1"].new, json!("c"));
        assert_eq!(diff.removed["tags.2"].old, json!("c"));
        assert!(diff.added.is_empty());
    }

    #[test]
    fn array_and_object_are_walked_by_key() {
        let diff = deep_diff(
            &json!({ "x": ["zero"] }),
            &json!({ "x": { "0": "zero", "01": "other" } }),
        );
        assert!(diff.changed.is_empty());
        assert!(diff.removed.is_empty());
        assert_eq!(diff.added["x.01"].new, json!("other"));
    }

    #[test]
    fn equal_nested_subtrees_are_skipped() {
        let shared = json!({ "deep": { "deeper": [1, 2, 3] } });
        let diff = deep_diff(
            &json!({ "same": shared.clone(), "other": 1 }),
            &json!({ "same": shared, "other": 2 }),
        );
        assert_eq!(diff.len(), 1);
        assert!(!diff.contains_path("same"));
        assert!(!diff.contains_path("same.deep"));
    }

    #[test]
    fn every_path_lands_in_exactly_one_bucket() {
        let left = json!({ "a": 1, "b": { "c": 2, "d": 3 }, "e": [1, 2] });
        let right = json!({ "a": 1, "b": { "c": 5, "f": 6 }, "e": [1], "g": 7 });
        let diff = deep_diff(&left, &right);

        let mut seen = std::collections::BTreeSet::new();
        for path in diff
            .added
            .keys()
            .chain(diff.removed.keys())
            .chain(diff.changed.keys())
        {
            assert!(seen.insert(path.clone()), "{path} reported twice");
        }
        assert_eq!(
            seen.into_iter().collect::<Vec<_>>(),
            vec!["b.c", "b.d", "b.f", "e.1", "g"]
        );
    }

    #[test]
    fn scalar_documents_are_changed_at_the_root() {
        let diff = deep_diff(&json!(1), &json!({ "a": 1 }));
        assert_eq!(diff.len(), 1);
        assert_eq!(diff.changed[""].old, json!(1));
        assert_eq!(diff.changed[""].new, json!({ "a": 1 }));
    }
}
