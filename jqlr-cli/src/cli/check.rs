//! # Check Command
//!
//! Runs the authenticated connection check on its own and prints the raw
//! response details.

use anyhow::{Context, Result, anyhow};
use clap::Args;
use jqlr_core::output::{format_header_name, format_status, format_url, print_error, print_header, print_success};
use jqlr_jira::{ConnectionReport, create_jira_client};
use tokio::runtime::Runtime;

use super::{ConnectionArgs, load_settings};

/// Command for checking the connection to Jira
#[derive(Args)]
pub struct CheckArgs {
  #[command(flatten)]
  pub connection: ConnectionArgs,
}

/// Handle the check command
pub(crate) fn handle_check_command(args: CheckArgs) -> Result<()> {
  let settings = load_settings(&args.connection.overrides())?;
  let client = create_jira_client(&settings)?;

  let rt = Runtime::new().context("Failed to create tokio runtime")?;
  let report = rt.block_on(client.check_connection())?;
  print_connection_report(&report);

  if report.is_ok() {
    Ok(())
  } else {
    Err(anyhow!("Connection check returned HTTP {}", report.status))
  }
}

/// Print the status, headers, final URL and encoding of a connection check,
/// followed by a success or failure line. Everything goes to stderr.
pub(crate) fn print_connection_report(report: &ConnectionReport) {
  print_header("Connection check");
  eprintln!("Status:   {}", format_status(report.status));
  eprintln!("Headers:");
  for (name, value) in &report.headers {
    eprintln!("  {}: {}", format_header_name(name), value);
  }
  eprintln!("URL:      {}", format_url(&report.url));
  eprintln!("Encoding: {}", report.encoding.as_deref().unwrap_or("unknown"));

  if report.is_ok() {
    print_success("Connected to Jira");
  } else {
    print_error(&format!("Connection check failed with HTTP {}", report.status));
  }
}
