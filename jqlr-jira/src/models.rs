use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// Represents Jira authentication credentials: a static bearer token
#[derive(Clone)]
pub struct JiraAuth {
  pub token: String,
}

impl JiraAuth {
  pub fn bearer(token: impl Into<String>) -> Self {
    Self { token: token.into() }
  }
}

impl fmt::Debug for JiraAuth {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("JiraAuth").field("token", &"<redacted>").finish()
  }
}

/// What the connection check learned about the Jira host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionReport {
  pub status: u16,
  pub headers: Vec<(String, String)>,
  /// Final URL after redirects
  pub url: String,
  /// Character encoding declared by the response, if any
  pub encoding: Option<String>,
}

impl ConnectionReport {
  /// Whether the host answered with 200 OK
  pub fn is_ok(&self) -> bool {
    self.status == 200
  }
}

/// Character encoding implied by a `Content-Type` header value.
///
/// An explicit `charset` parameter wins. `text/*` types without one default
/// to ISO-8859-1 as HTTP/1.1 specifies; other types have no implied encoding.
pub fn encoding_from_content_type(content_type: &str) -> Option<String> {
  let mut parts = content_type.split(';');
  let mime = parts.next().unwrap_or_default().trim().to_ascii_lowercase();

  for param in parts {
    if let Some((name, value)) = param.split_once('=')
      && name.trim().eq_ignore_ascii_case("charset")
    {
      let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
      if !value.is_empty() {
        return Some(value.to_string());
      }
    }
  }

  mime.starts_with("text/").then(|| "ISO-8859-1".to_string())
}

/// Body of a successful search response.
///
/// Issue records are kept as raw JSON since their shape belongs to the
/// server; a body without `issues` has no records.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
  pub start_at: Option<u64>,
  pub max_results: Option<u64>,
  pub total: Option<u64>,
  #[serde(default)]
  pub issues: Vec<Value>,
}

/// Result of a search request that reached the server
#[derive(Debug)]
pub enum SearchOutcome {
  /// 200 OK with a parsed body
  Issues(SearchResponse),
  /// Any other status; the body is kept verbatim for diagnostics only
  Failed { status: u16, body: String },
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_jira_auth_debug_hides_token() {
    let auth = JiraAuth::bearer("super-secret");
    assert_eq!(auth.token, "super-secret");
    assert!(!format!("{auth:?}").contains("super-secret"));
  }

  #[test]
  fn test_encoding_from_content_type() {
    assert_eq!(
      encoding_from_content_type("application/json;charset=UTF-8"),
      Some("UTF-8".to_string())
    );
    assert_eq!(
      encoding_from_content_type("text/html; charset=\"utf-8\""),
      Some("utf-8".to_string())
    );
    assert_eq!(encoding_from_content_type("text/plain"), Some("ISO-8859-1".to_string()));
    assert_eq!(encoding_from_content_type("application/json"), None);
  }

  #[test]
  fn test_search_response_deserialization() {
    let json = json!({
        "expand": "schema,names",
        "startAt": 0,
        "maxResults": 50,
        "total": 1,
        "issues": [
            { "key": "ABC-1", "fields": { "summary": "Fix bug" } }
        ]
    });

    let response: SearchResponse = serde_json::from_value(json).unwrap();

    assert_eq!(response.start_at, Some(0));
    assert_eq!(response.max_results, Some(50));
    assert_eq!(response.total, Some(1));
    assert_eq!(response.issues.len(), 1);
    assert_eq!(response.issues[0]["key"], "ABC-1");
  }

  #[test]
  fn test_search_response_without_issues() {
    let response: SearchResponse = serde_json::from_value(json!({ "total": 0 })).unwrap();
    assert!(response.issues.is_empty());
  }

  #[test]
  fn test_search_response_with_non_array_issues_fails() {
    let result = serde_json::from_value::<SearchResponse>(json!({ "issues": "nope" }));
    assert!(result.is_err());
  }
}
