//! URL helpers for turning a configured host into request URLs.

use anyhow::{Context, Result};
use url::{Position, Url};

/// Normalize a configured Jira host into a base URL.
///
/// A missing scheme defaults to `https://`. Trailing slashes are dropped so
/// endpoint paths can be appended directly. Query strings and fragments have
/// no meaning on a base URL and are rejected.
pub fn normalize_base_url(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(anyhow::anyhow!("Host cannot be empty"));
  }

  let candidate = if has_http_scheme(trimmed) {
    trimmed.to_string()
  } else {
    format!("https://{trimmed}")
  };

  let url = Url::parse(&candidate).with_context(|| format!("Failed to parse host URL: '{input}'"))?;
  if url.host_str().is_none_or(str::is_empty) {
    return Err(anyhow::anyhow!("Host URL '{input}' has no host name"));
  }
  if url.query().is_some() || url.fragment().is_some() {
    return Err(anyhow::anyhow!(
      "Host URL '{input}' must not contain a query string or fragment"
    ));
  }

  let mut base = url[..Position::BeforePath].to_string();
  base.push_str(url.path().trim_end_matches('/'));
  Ok(base)
}

/// Join a normalized base URL and an endpoint path with exactly one slash.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
  let path = path.trim();
  if path.is_empty() {
    return base_url.to_string();
  }
  format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn has_http_scheme(input: &str) -> bool {
  let lowered = input.to_ascii_lowercase();
  lowered.starts_with("http://") || lowered.starts_with("https://")
}
