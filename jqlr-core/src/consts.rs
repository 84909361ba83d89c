//! Core constants shared across jqlr components.

/// Environment variable for the Jira host URL.
pub const ENV_JIRA_HOST: &str = "JIRA_HOST";

/// Environment variable holding the static bearer token.
pub const ENV_JIRA_API_TOKEN: &str = "JIRA_API_TOKEN";

/// Environment variable holding the default JQL query.
pub const ENV_JIRA_JQL: &str = "JIRA_JQL";

/// Search endpoint path appended to the host when none is configured.
pub const DEFAULT_SEARCH_PATH: &str = "/rest/api/2/search";

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
