//! # Config Command
//!
//! Shows where the config file lives, writes a starter file, and prints the
//! current file contents with the token masked.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use jqlr_core::consts::{ENV_JIRA_API_TOKEN, ENV_JIRA_HOST, ENV_JIRA_JQL};
use jqlr_core::output::{mask_secret, print_header, print_info, print_success};
use jqlr_core::{ConfigDirs, FileConfig, get_config_dirs};

/// Command for managing the config file
#[derive(Args)]
pub struct ConfigArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: ConfigSubcommands,
}

/// Subcommands for the config command
#[derive(Subcommand)]
pub enum ConfigSubcommands {
  /// Print the path of the config file
  Path,

  /// Write a commented starter config file
  #[command(long_about = "Write a commented starter config file.\n\n\
                         An existing config file is left untouched.")]
  Init,

  /// Show the config file and the environment variables that override it
  Show,
}

/// Handle the config command
pub(crate) fn handle_config_command(args: ConfigArgs) -> Result<()> {
  let config_dirs = get_config_dirs()?;

  match args.subcommand {
    ConfigSubcommands::Path => {
      println!("{}", config_dirs.config_path().display());
      Ok(())
    }
    ConfigSubcommands::Init => handle_init(&config_dirs),
    ConfigSubcommands::Show => handle_show(&config_dirs, |name| std::env::var(name).ok()),
  }
}

fn handle_init(config_dirs: &ConfigDirs) -> Result<()> {
  if config_dirs.init()? {
    print_success(&format!("Created config file at {}", config_dirs.config_path().display()));
  } else {
    print_info(&format!(
      "Config file already exists at {}",
      config_dirs.config_path().display()
    ));
  }
  Ok(())
}

fn handle_show<F>(config_dirs: &ConfigDirs, env: F) -> Result<()>
where
  F: Fn(&str) -> Option<String>,
{
  let config_path = config_dirs.config_path();
  print_header(&format!("Config file: {}", config_path.display()));

  if config_path.exists() {
    let file = config_dirs.load()?;
    println!("{}", render_masked(&file)?);
  } else {
    print_info("No config file found. Run `jqlr config init` to create one.");
  }

  print_header("Environment");
  for name in [ENV_JIRA_HOST, ENV_JIRA_API_TOKEN, ENV_JIRA_JQL] {
    let value = match env(name) {
      Some(value) if name == ENV_JIRA_API_TOKEN => mask_secret(&value),
      Some(value) => value,
      None => "(not set)".to_string(),
    };
    println!("{name}={value}");
  }

  Ok(())
}

/// Serialize the file config with its token masked
fn render_masked(file: &FileConfig) -> Result<String> {
  let masked = FileConfig {
    token: file.token.as_deref().map(mask_secret),
    ..file.clone()
  };
  toml::to_string_pretty(&masked).context("Failed to render config")
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_render_masked_hides_token() {
    let file = FileConfig {
      host: Some("jira.example.com".to_string()),
      token: Some("abcdefghijkl1234".to_string()),
      ..Default::default()
    };

    let rendered = render_masked(&file).unwrap();
    assert!(rendered.contains("jira.example.com"));
    assert!(rendered.contains("********1234"));
    assert!(!rendered.contains("abcdefghijkl"));
  }

  #[test]
  fn test_init_then_show() {
    let temp_dir = TempDir::new().unwrap();
    let config_dirs = ConfigDirs::from_config_dir(temp_dir.path().join("jqlr"));

    handle_init(&config_dirs).unwrap();
    assert!(config_dirs.config_path().exists());

    // A second init leaves the file alone
    handle_init(&config_dirs).unwrap();
    handle_show(&config_dirs, |_| None).unwrap();
  }

  #[test]
  fn test_show_without_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_dirs = ConfigDirs::from_config_dir(temp_dir.path());
    handle_show(&config_dirs, |_| Some("value".to_string())).unwrap();
  }
}
