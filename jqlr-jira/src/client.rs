use std::time::Duration;

use anyhow::{Context, Result};
use jqlr_core::Settings;
use jqlr_core::consts::DEFAULT_SEARCH_PATH;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use tracing::debug;

use crate::consts::{ACCEPT_JSON, USER_AGENT};
use crate::models::{ConnectionReport, JiraAuth, encoding_from_content_type};

/// Represents a Jira API client
pub struct JiraClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) search_path: String,
  pub(crate) auth: JiraAuth,
}

impl JiraClient {
  /// Create a new Jira client.
  ///
  /// `base_url` is used as given; see `jqlr_core::url::normalize_base_url`.
  pub fn new(base_url: &str, auth: JiraAuth, timeout: Option<Duration>) -> Result<Self> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
      builder = builder.timeout(timeout);
    }
    let client = builder.build().context("Failed to create HTTP client")?;

    Ok(Self {
      client,
      base_url: base_url.to_string(),
      search_path: DEFAULT_SEARCH_PATH.to_string(),
      auth,
    })
  }

  /// Use a different search endpoint path
  pub fn with_search_path(mut self, search_path: &str) -> Self {
    self.search_path = search_path.to_string();
    self
  }

  /// The base URL requests are made against
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Start a GET request carrying the JSON accept header and bearer token
  pub(crate) fn get(&self, url: &str) -> RequestBuilder {
    self
      .client
      .get(url)
      .header(ACCEPT, ACCEPT_JSON)
      .bearer_auth(&self.auth.token)
  }

  /// Request the base URL and report what came back.
  ///
  /// Any HTTP status is a valid report; only a failure to get a response at
  /// all is an error.
  pub async fn check_connection(&self) -> Result<ConnectionReport> {
    debug!("Checking connection to {}", self.base_url);

    let response = self
      .get(&self.base_url)
      .send()
      .await
      .context("Failed to connect to Jira")?;

    let headers = response
      .headers()
      .iter()
      .map(|(name, value)| (name.to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned()))
      .collect();
    let encoding = response
      .headers()
      .get(CONTENT_TYPE)
      .and_then(|value| value.to_str().ok())
      .and_then(encoding_from_content_type);

    Ok(ConnectionReport {
      status: response.status().as_u16(),
      headers,
      url: response.url().to_string(),
      encoding,
    })
  }
}

/// Create a Jira client from resolved settings
pub fn create_jira_client(settings: &Settings) -> Result<JiraClient> {
  Ok(
    JiraClient::new(&settings.base_url, JiraAuth::bearer(&settings.token), settings.timeout)?
      .with_search_path(&settings.search_path),
  )
}
