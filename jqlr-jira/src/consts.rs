//! Constants for the jqlr Jira client.

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Media type requested from every endpoint
pub const ACCEPT_JSON: &str = "application/json";

/// Query parameter carrying the JQL string
pub const JQL_PARAM: &str = "jql";
