//! # Configuration Management
//!
//! Locates the jqlr config file, loads it, and merges it with environment
//! variables and command-line overrides into the [`Settings`] a search runs
//! with.
//!
//! Precedence, highest first: command-line flags, environment variables, the
//! config file, built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{
  CONFIG_FILE_NAME, DEFAULT_SEARCH_PATH, DEFAULT_TIMEOUT_SECS, ENV_JIRA_API_TOKEN, ENV_JIRA_HOST, ENV_JIRA_JQL,
};
use crate::extract::{DEFAULT_CONTAINER_KEYS, DEFAULT_LEAF_KEYS, FieldTargets, KeyOrder};
use crate::url::normalize_base_url;

const CONFIG_TEMPLATE: &str = r#"# jqlr configuration
#
# Values here are overridden by the JIRA_HOST, JIRA_API_TOKEN and JIRA_JQL
# environment variables, which are in turn overridden by command-line flags.

# host = "https://jira.example.com"
# token = "your-personal-access-token"
# jql = "project = PROJ AND resolution = Unresolved ORDER BY priority DESC, updated DESC"
# search_path = "/rest/api/2/search"
# timeout_secs = 30
# key_order = "document"

# [extract]
# containers = ["fields", "reporter"]
# leaves = ["key", "summary", "displayName"]
"#;

/// Errors raised while resolving settings
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("No Jira host configured. Pass --host, set JIRA_HOST, or add `host` to the config file")]
  MissingHost,
  #[error("No API token configured. Pass --token, set JIRA_API_TOKEN, or add `token` to the config file")]
  MissingToken,
  #[error("No JQL query given. Pass --jql, set JIRA_JQL, or add `jql` to the config file")]
  MissingJql,
  #[error("Invalid Jira host: {0}")]
  InvalidHost(String),
  #[error("The extract section must name at least one leaf key")]
  NoLeafKeys,
}

/// Represents the configuration directories for the jqlr application
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance from the platform's project directories
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("", "", "jqlr").context("Failed to determine project directories")?;
    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Use an explicit config directory
  pub fn from_config_dir<P: AsRef<Path>>(config_dir: P) -> Self {
    Self {
      config_dir: config_dir.as_ref().to_path_buf(),
    }
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &PathBuf {
    &self.config_dir
  }

  /// Get the path to the config file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join(CONFIG_FILE_NAME)
  }

  /// Load the config file, or the defaults if there is none
  pub fn load(&self) -> Result<FileConfig> {
    let config_path = self.config_path();

    if !config_path.exists() {
      tracing::debug!("No config file at {}", config_path.display());
      return Ok(FileConfig::default());
    }

    let content =
      fs::read_to_string(&config_path).with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config from {}", config_path.display()))
  }

  /// Write a commented template config file if none exists.
  ///
  /// Returns whether a file was written.
  pub fn init(&self) -> Result<bool> {
    let config_path = self.config_path();
    if config_path.exists() {
      return Ok(false);
    }

    fs::create_dir_all(&self.config_dir)
      .with_context(|| format!("Failed to create config directory {}", self.config_dir.display()))?;
    fs::write(&config_path, CONFIG_TEMPLATE)
      .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    Ok(true)
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
  pub host: Option<String>,
  pub token: Option<String>,
  pub jql: Option<String>,
  pub search_path: Option<String>,
  pub timeout_secs: Option<u64>,
  pub key_order: Option<KeyOrder>,
  pub extract: Option<ExtractConfig>,
}

/// The `[extract]` section of `config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
  pub containers: Vec<String>,
  pub leaves: Vec<String>,
}

impl Default for ExtractConfig {
  fn default() -> Self {
    Self {
      containers: DEFAULT_CONTAINER_KEYS.iter().map(|k| k.to_string()).collect(),
      leaves: DEFAULT_LEAF_KEYS.iter().map(|k| k.to_string()).collect(),
    }
  }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  pub host: Option<String>,
  pub token: Option<String>,
  pub jql: Option<String>,
  pub timeout_secs: Option<u64>,
  pub key_order: Option<KeyOrder>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  pub base_url: String,
  pub token: String,
  pub jql: Option<String>,
  pub search_path: String,
  /// `None` disables the request timeout
  pub timeout: Option<Duration>,
  pub key_order: KeyOrder,
  pub targets: FieldTargets,
}

impl Settings {
  /// Merge overrides, environment and file config.
  ///
  /// `env` looks up an environment variable; empty values count as unset.
  pub fn resolve<F>(overrides: &Overrides, file: &FileConfig, env: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let env = |name: &str| env(name).filter(|value| !value.trim().is_empty());

    let host = overrides
      .host
      .clone()
      .or_else(|| env(ENV_JIRA_HOST))
      .or_else(|| file.host.clone())
      .ok_or(ConfigError::MissingHost)?;
    let base_url = normalize_base_url(&host).map_err(|err| ConfigError::InvalidHost(format!("{err:#}")))?;

    let token = overrides
      .token
      .clone()
      .or_else(|| env(ENV_JIRA_API_TOKEN))
      .or_else(|| file.token.clone())
      .map(|token| token.trim().to_string())
      .filter(|token| !token.is_empty())
      .ok_or(ConfigError::MissingToken)?;

    let jql = overrides
      .jql
      .clone()
      .or_else(|| env(ENV_JIRA_JQL))
      .or_else(|| file.jql.clone())
      .filter(|jql| !jql.trim().is_empty());

    let timeout_secs = overrides
      .timeout_secs
      .or(file.timeout_secs)
      .unwrap_or(DEFAULT_TIMEOUT_SECS);
    let timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

    let extract = file.extract.clone().unwrap_or_default();
    if extract.leaves.is_empty() {
      return Err(ConfigError::NoLeafKeys);
    }

    Ok(Self {
      base_url,
      token,
      jql,
      search_path: file
        .search_path
        .clone()
        .unwrap_or_else(|| DEFAULT_SEARCH_PATH.to_string()),
      timeout,
      key_order: overrides.key_order.or(file.key_order).unwrap_or_default(),
      targets: FieldTargets::new(extract.containers, extract.leaves),
    })
  }

  /// Resolve against the process environment
  pub fn from_env(overrides: &Overrides, file: &FileConfig) -> Result<Self, ConfigError> {
    Self::resolve(overrides, file, |name| std::env::var(name).ok())
  }

  /// The JQL query, required for searching
  pub fn require_jql(&self) -> Result<&str, ConfigError> {
    self.jql.as_deref().ok_or(ConfigError::MissingJql)
  }
}
