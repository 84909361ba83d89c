//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for the jqlr tool.

mod check;
mod config;
mod search;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Args, Parser, Subcommand};
use jqlr_core::{ColorMode, Overrides, Settings, get_config_dirs};
use tracing::debug;

/// Top-level CLI command for the jqlr tool
#[derive(Parser)]
#[command(name = "jqlr")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Run a JQL search against Jira and print the issues as a table")]
#[command(
  long_about = "jqlr sends a JQL query to a Jira instance using a personal access token and\n\
        flattens each returned issue into a row of Key, Summary, Email and Reporter.\n\n\
        The host, token and query come from command-line flags, the JIRA_HOST,\n\
        JIRA_API_TOKEN and JIRA_JQL environment variables, or the config file,\n\
        in that order of precedence."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages, including the values taken from each issue\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the jqlr tool
#[derive(Subcommand)]
pub enum Commands {
  /// Check that the Jira host answers with the configured token
  #[command(long_about = "Sends an authenticated request to the Jira base URL and prints what came back.\n\n\
            The status code, response headers, final URL and response encoding are\n\
            printed so authentication and proxy problems can be diagnosed. The command\n\
            fails unless the host answers with HTTP 200.")]
  Check(check::CheckArgs),

  /// Run a JQL search and print the matching issues
  #[command(long_about = "Runs a JQL search and prints one row per issue.\n\n\
            By default a connection check runs first and its diagnostics are printed;\n\
            a failed check does not stop the search. Issues whose fields are not shaped\n\
            as expected are skipped with a warning unless --strict is given.")]
  #[command(alias = "s")]
  Search(search::SearchArgs),

  /// Inspect or create the config file
  #[command(long_about = "Inspect or create the jqlr config file.\n\n\
            The config file can hold the host, token and default query, as well as the\n\
            keys the issue walker descends into and collects.")]
  #[command(arg_required_else_help = true)]
  Config(config::ConfigArgs),
}

/// Connection flags shared by the commands that talk to Jira
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
  /// Jira host, e.g. jira.example.com (overrides JIRA_HOST)
  #[arg(long, value_name = "HOST")]
  pub host: Option<String>,

  /// Personal access token sent as a bearer token (overrides JIRA_API_TOKEN)
  #[arg(long, value_name = "TOKEN")]
  pub token: Option<String>,

  /// Request timeout in seconds; 0 disables the timeout
  #[arg(long, value_name = "SECS")]
  pub timeout: Option<u64>,
}

impl ConnectionArgs {
  fn overrides(&self) -> Overrides {
    Overrides {
      host: self.host.clone(),
      token: self.token.clone(),
      timeout_secs: self.timeout,
      ..Default::default()
    }
  }
}

/// Merge the config file, environment and flags into settings for this run
fn load_settings(overrides: &Overrides) -> Result<Settings> {
  let config_dirs = get_config_dirs()?;
  debug!("Loading config from {}", config_dirs.config_path().display());

  let file = config_dirs.load()?;
  Ok(Settings::from_env(overrides, &file)?)
}

/// Handle the parsed CLI command
pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();

  match cli.command {
    Commands::Check(args) => check::handle_check_command(args),
    Commands::Search(args) => search::handle_search_command(args),
    Commands::Config(args) => config::handle_config_command(args),
  }
}
