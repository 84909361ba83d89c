//! # Jira API Client
//!
//! Talks to a Jira instance on behalf of jqlr: a bearer-authenticated
//! connection check that reports the raw response details, and the JQL
//! search endpoint that returns issue records for flattening.

mod client;
pub mod consts;
mod endpoints;
pub mod models;

// Re-export the client
pub use client::{JiraClient, create_jira_client};
// Re-export models
pub use models::{ConnectionReport, JiraAuth, SearchOutcome, SearchResponse};
