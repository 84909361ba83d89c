//! # Jira Search Endpoint
//!
//! Runs a JQL query against the configured search endpoint.

use anyhow::{Context, Result};
use jqlr_core::url::endpoint_url;
use reqwest::StatusCode;
use tracing::{debug, info};

use crate::client::JiraClient;
use crate::consts::JQL_PARAM;
use crate::models::{SearchOutcome, SearchResponse};

impl JiraClient {
  /// Full URL of the search endpoint
  pub fn search_url(&self) -> String {
    endpoint_url(&self.base_url, &self.search_path)
  }

  /// Run a JQL search.
  ///
  /// Only a 200 response body is parsed. Any other status comes back as
  /// [`SearchOutcome::Failed`] with the body left as text, so an error page is
  /// never mistaken for issue data.
  pub async fn search(&self, jql: &str) -> Result<SearchOutcome> {
    let url = self.search_url();
    debug!("Searching {url} with JQL: {jql}");

    let response = self
      .get(&url)
      .query(&[(JQL_PARAM, jql)])
      .send()
      .await
      .context("Failed to send Jira search request")?;

    match response.status() {
      StatusCode::OK => {
        let body = response
          .json::<SearchResponse>()
          .await
          .context("Failed to parse Jira search response")?;
        info!("Search returned {} issue records", body.issues.len());
        Ok(SearchOutcome::Issues(body))
      }
      status => Ok(SearchOutcome::Failed {
        status: status.as_u16(),
        body: response.text().await.unwrap_or_default(),
      }),
    }
  }
}
