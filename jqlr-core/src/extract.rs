//! # Nested Field Extractor
//!
//! Walks a Jira issue record (an arbitrarily nested JSON object) and collects
//! the values of a fixed set of target keys into a flat, positional sequence.
//!
//! Keys are matched by name irrespective of depth. A *container* key is
//! descended into, a *leaf* key has its value collected, and every other key
//! is ignored. With the default targets, `summary` is found one level down
//! under `fields` and the reporter's `displayName` two levels down under
//! `fields.reporter`, while the issue `key` sits at the top level.
//!
//! The result carries no labels: position is the only identifier, and the
//! position is the depth-first encounter order. Callers that need to know
//! which leaf produced a value use [`extract_matches`] instead.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Keys whose values are descended into by default
pub const DEFAULT_CONTAINER_KEYS: &[&str] = &["fields", "reporter"];

/// Keys whose values are collected by default
pub const DEFAULT_LEAF_KEYS: &[&str] = &["key", "summary", "displayName"];

/// Errors raised when an issue record breaks the extractor's input contract
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
  #[error("issue record is {0}, expected an object")]
  RecordNotObject(&'static str),
  #[error("container key '{key}' holds {found}, expected an object")]
  ContainerNotObject { key: String, found: &'static str },
}

/// Order in which the keys of each object are visited
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum KeyOrder {
  /// The order the keys appear in the response document
  #[default]
  Document,
  /// Lexicographic key order, as if the document had been re-serialized with
  /// sorted keys
  Sorted,
}

/// The set of key names the extractor reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTargets {
  containers: Vec<String>,
  leaves: Vec<String>,
}

impl Default for FieldTargets {
  fn default() -> Self {
    Self::new(DEFAULT_CONTAINER_KEYS.iter().copied(), DEFAULT_LEAF_KEYS.iter().copied())
  }
}

impl FieldTargets {
  /// Create a target set from container and leaf key names.
  ///
  /// A name listed as both is treated as a container.
  pub fn new<C, L>(containers: C, leaves: L) -> Self
  where
    C: IntoIterator,
    C::Item: Into<String>,
    L: IntoIterator,
    L::Item: Into<String>,
  {
    Self {
      containers: containers.into_iter().map(Into::into).collect(),
      leaves: leaves.into_iter().map(Into::into).collect(),
    }
  }

  /// Container key names
  pub fn containers(&self) -> &[String] {
    &self.containers
  }

  /// Leaf key names
  pub fn leaves(&self) -> &[String] {
    &self.leaves
  }

  /// Whether `key` is descended into
  pub fn is_container(&self, key: &str) -> bool {
    self.containers.iter().any(|c| c == key)
  }

  /// Whether the value under `key` is collected
  pub fn is_leaf(&self, key: &str) -> bool {
    self.leaves.iter().any(|l| l == key)
  }
}

/// A collected value together with the leaf key it was found under
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
  pub field: String,
  pub value: Value,
  /// Number of containers entered to reach the value; 0 for top-level keys
  pub depth: usize,
}

/// Collect the target values of `record` in document key order.
pub fn extract_fields(record: &Map<String, Value>, targets: &FieldTargets) -> Result<Vec<Value>, ExtractError> {
  extract_fields_ordered(record, targets, KeyOrder::Document)
}

/// Collect the target values of `record`, visiting keys in `order`.
pub fn extract_fields_ordered(
  record: &Map<String, Value>,
  targets: &FieldTargets,
  order: KeyOrder,
) -> Result<Vec<Value>, ExtractError> {
  Ok(
    extract_matches(record, targets, order)?
      .into_iter()
      .map(|m| m.value)
      .collect(),
  )
}

/// Collect the target values of `record` along with the leaf key each one was
/// found under.
///
/// Fails without returning partial results if a container key holds anything
/// other than an object.
pub fn extract_matches(
  record: &Map<String, Value>,
  targets: &FieldTargets,
  order: KeyOrder,
) -> Result<Vec<FieldMatch>, ExtractError> {
  let mut matches = Vec::new();
  walk(record, targets, order, 0, &mut matches)?;
  Ok(matches)
}

/// Like [`extract_matches`], for a record that has not been checked to be an
/// object yet.
pub fn extract_record(record: &Value, targets: &FieldTargets, order: KeyOrder) -> Result<Vec<FieldMatch>, ExtractError> {
  let object = record
    .as_object()
    .ok_or_else(|| ExtractError::RecordNotObject(json_type_name(record)))?;
  extract_matches(object, targets, order)
}

fn walk(
  object: &Map<String, Value>,
  targets: &FieldTargets,
  order: KeyOrder,
  depth: usize,
  matches: &mut Vec<FieldMatch>,
) -> Result<(), ExtractError> {
  for (key, value) in entries(object, order) {
    if targets.is_container(key) {
      let nested = value.as_object().ok_or_else(|| ExtractError::ContainerNotObject {
        key: key.clone(),
        found: json_type_name(value),
      })?;
      walk(nested, targets, order, depth + 1, matches)?;
    } else if targets.is_leaf(key) {
      matches.push(FieldMatch {
        field: key.clone(),
        value: value.clone(),
        depth,
      });
    }
  }
  Ok(())
}

fn entries(object: &Map<String, Value>, order: KeyOrder) -> Vec<(&String, &Value)> {
  let mut entries: Vec<_> = object.iter().collect();
  if order == KeyOrder::Sorted {
    entries.sort_by(|a, b| a.0.cmp(b.0));
  }
  entries
}

/// Human readable name of a JSON value's type
pub fn json_type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn object(value: Value) -> Map<String, Value> {
    match value {
      Value::Object(map) => map,
      other => panic!("expected an object, got {other}"),
    }
  }

  fn sample_issue() -> Map<String, Value> {
    object(json!({
      "key": "K",
      "fields": {
        "summary": "S",
        "reporter": { "displayName": "R" }
      }
    }))
  }

  #[test]
  fn test_document_order_follows_key_order_in_response() {
    let values = extract_fields(&sample_issue(), &FieldTargets::default()).unwrap();
    assert_eq!(values, vec![json!("K"), json!("S"), json!("R")]);
  }

  #[test]
  fn test_document_order_with_fields_first() {
    let issue = object(json!({
      "fields": {
        "reporter": { "displayName": "R" },
        "summary": "S"
      },
      "key": "K"
    }));

    let values = extract_fields(&issue, &FieldTargets::default()).unwrap();
    assert_eq!(values, vec![json!("R"), json!("S"), json!("K")]);
  }

  #[test]
  fn test_sorted_order_visits_keys_lexicographically() {
    let values = extract_fields_ordered(&sample_issue(), &FieldTargets::default(), KeyOrder::Sorted).unwrap();
    assert_eq!(values, vec![json!("R"), json!("S"), json!("K")]);
  }

  #[test]
  fn test_no_matching_keys_yields_empty_sequence() {
    let issue = object(json!({ "id": "10000", "self": "https://jira.example.com/rest/api/2/issue/10000" }));
    let values = extract_fields(&issue, &FieldTargets::default()).unwrap();
    assert!(values.is_empty());
  }

  #[test]
  fn test_empty_record_yields_empty_sequence() {
    let values = extract_fields(&Map::new(), &FieldTargets::default()).unwrap();
    assert!(values.is_empty());
  }

  #[test]
  fn test_unknown_keys_are_not_descended_into() {
    let issue = object(json!({
      "key": "K",
      "changelog": { "summary": "hidden", "displayName": "hidden" }
    }));

    let values = extract_fields(&issue, &FieldTargets::default()).unwrap();
    assert_eq!(values, vec![json!("K")]);
  }

  #[test]
  fn test_container_holding_string_is_an_error() {
    let issue = object(json!({ "key": "K", "fields": "not an object" }));

    let err = extract_fields(&issue, &FieldTargets::default()).unwrap_err();
    assert_eq!(
      err,
      ExtractError::ContainerNotObject {
        key: "fields".to_string(),
        found: "a string",
      }
    );
    assert!(err.to_string().contains("'fields'"));
  }

  #[test]
  fn test_null_reporter_is_an_error() {
    let issue = object(json!({
      "key": "K",
      "fields": { "summary": "S", "reporter": null }
    }));

    let err = extract_fields(&issue, &FieldTargets::default()).unwrap_err();
    assert_eq!(
      err,
      ExtractError::ContainerNotObject {
        key: "reporter".to_string(),
        found: "null",
      }
    );
  }

  #[test]
  fn test_arrays_under_leaf_keys_are_collected_verbatim() {
    let issue = object(json!({ "key": ["A", "B"] }));
    let values = extract_fields(&issue, &FieldTargets::default()).unwrap();
    assert_eq!(values, vec![json!(["A", "B"])]);
  }

  #[test]
  fn test_same_leaf_in_two_branches_is_collected_twice() {
    let issue = object(json!({
      "key": "K",
      "fields": {
        "reporter": { "key": "JIRAUSER1", "displayName": "R" }
      }
    }));

    let matches = extract_matches(&issue, &FieldTargets::default(), KeyOrder::Document).unwrap();
    let fields: Vec<_> = matches.iter().map(|m| m.field.as_str()).collect();
    assert_eq!(fields, vec!["key", "key", "displayName"]);
    assert_eq!(matches[1].value, json!("JIRAUSER1"));
    let depths: Vec<_> = matches.iter().map(|m| m.depth).collect();
    assert_eq!(depths, vec![0, 2, 2]);
  }

  #[test]
  fn test_custom_targets() {
    let issue = object(json!({
      "key": "K",
      "fields": {
        "assignee": { "emailAddress": "a@example.com" },
        "reporter": { "emailAddress": "r@example.com" }
      }
    }));
    let targets = FieldTargets::new(["fields", "assignee"], ["emailAddress"]);

    let values = extract_fields(&issue, &targets).unwrap();
    assert_eq!(values, vec![json!("a@example.com")]);
  }

  #[test]
  fn test_container_wins_when_listed_as_leaf_too() {
    let issue = object(json!({ "fields": { "key": "K" } }));
    let targets = FieldTargets::new(["fields"], ["fields", "key"]);

    let values = extract_fields(&issue, &targets).unwrap();
    assert_eq!(values, vec![json!("K")]);
  }

  #[test]
  fn test_extract_record_rejects_non_objects() {
    let err = extract_record(&json!("ABC-1"), &FieldTargets::default(), KeyOrder::Document).unwrap_err();
    assert_eq!(err, ExtractError::RecordNotObject("a string"));
  }

  #[test]
  fn test_default_targets() {
    let targets = FieldTargets::default();
    assert!(targets.is_container("fields"));
    assert!(targets.is_container("reporter"));
    assert!(targets.is_leaf("key"));
    assert!(targets.is_leaf("summary"));
    assert!(targets.is_leaf("displayName"));
    assert!(!targets.is_leaf("emailAddress"));
  }

  #[test]
  fn test_key_order_deserializes_lowercase() {
    let order: KeyOrder = serde_json::from_value(json!("sorted")).unwrap();
    assert_eq!(order, KeyOrder::Sorted);
  }
}
