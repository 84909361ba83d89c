//! Canned Jira payloads used by the HTTP and report tests

use serde_json::{Value, json};

/// Build an issue record in the shape the Jira search API returns
pub fn issue(key: &str, summary: &str, reporter: &str) -> Value {
  json!({
    "expand": "operations,versionedRepresentations,editmeta,changelog,renderedFields",
    "id": "10000",
    "self": format!("https://jira.example.com/rest/api/2/issue/{key}"),
    "key": key,
    "fields": {
      "summary": summary,
      "status": { "name": "Open" },
      "reporter": {
        "name": reporter.to_lowercase(),
        "displayName": reporter,
        "active": true
      }
    }
  })
}

/// Wrap issue records in a search response envelope
pub fn search_response(issues: Vec<Value>) -> Value {
  json!({
    "expand": "schema,names",
    "startAt": 0,
    "maxResults": 50,
    "total": issues.len(),
    "issues": issues
  })
}
