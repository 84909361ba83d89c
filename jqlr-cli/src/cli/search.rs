//! # Search Command
//!
//! Runs a JQL search, flattens every returned issue into a report row, and
//! prints the report.

use anyhow::{Context, Result, bail};
use clap::Args;
use jqlr_core::output::{format_status, print_error, print_warning};
use jqlr_core::{IssueReport, KeyOrder, Overrides, ReportFormat, Settings};
use jqlr_jira::{JiraClient, SearchOutcome, create_jira_client};
use tokio::runtime::Runtime;
use tracing::{debug, info};

use super::check::print_connection_report;
use super::{ConnectionArgs, load_settings};

/// Command for running a JQL search
#[derive(Args)]
pub struct SearchArgs {
  /// JQL query to run (overrides JIRA_JQL)
  #[arg(long, short = 'q', value_name = "JQL")]
  pub jql: Option<String>,

  #[command(flatten)]
  pub connection: ConnectionArgs,

  /// Output format for the report
  #[arg(long, value_enum, ignore_case = true, default_value_t = ReportFormat::Table)]
  pub format: ReportFormat,

  /// Walk each issue's keys in sorted order instead of response order
  #[arg(
    long,
    long_help = "Walk each issue's keys in sorted order instead of response order.\n\n\
             Values are placed in columns by the key they were found under, preferring\n\
             the shallowest match, so this never moves a value to another column. It only\n\
             decides which of two matches at the same depth fills a column, and changes\n\
             the order of the values logged with -vv."
  )]
  pub sort_keys: bool,

  /// Fail on the first issue whose fields are not shaped as expected
  #[arg(long)]
  pub strict: bool,

  /// Skip the connection check before searching
  #[arg(long)]
  pub skip_check: bool,
}

impl SearchArgs {
  fn overrides(&self) -> Overrides {
    Overrides {
      jql: self.jql.clone(),
      key_order: self.sort_keys.then_some(KeyOrder::Sorted),
      ..self.connection.overrides()
    }
  }
}

/// Handle the search command
pub(crate) fn handle_search_command(args: SearchArgs) -> Result<()> {
  let settings = load_settings(&args.overrides())?;
  let client = create_jira_client(&settings)?;

  let rt = Runtime::new().context("Failed to create tokio runtime")?;
  let report = rt.block_on(run_search(&client, &settings, args.strict, !args.skip_check))?;

  println!("{}", report.render(args.format)?);
  Ok(())
}

/// Optionally check the connection, then search and build the report.
///
/// A failed connection check is reported and the search still runs. A search
/// that does not answer with HTTP 200 is an error.
pub(crate) async fn run_search(
  client: &JiraClient,
  settings: &Settings,
  strict: bool,
  check_first: bool,
) -> Result<IssueReport> {
  let jql = settings.require_jql()?;

  if check_first {
    match client.check_connection().await {
      Ok(report) => print_connection_report(&report),
      Err(err) => print_warning(&format!("Connection check failed: {err:#}")),
    }
  }

  info!("Running JQL search: {jql}");
  let response = match client.search(jql).await? {
    SearchOutcome::Issues(response) => {
      eprintln!("Search status: {}", format_status(200));
      response
    }
    SearchOutcome::Failed { status, body } => {
      eprintln!("Search status: {}", format_status(status));
      print_error(&format!("Search against {} was rejected", client.search_url()));
      debug!("Search response body: {body}");
      bail!("Jira search failed with HTTP {status}");
    }
  };

  debug!(
    "Search window: startAt={:?} maxResults={:?} total={:?}",
    response.start_at, response.max_results, response.total
  );

  let report = IssueReport::from_records(&response.issues, &settings.targets, settings.key_order, strict)
    .context("Issue record is not shaped as expected")?;

  if report.skipped > 0 {
    print_warning(&format!(
      "Skipped {} of {} issues with unexpected fields (use --strict to fail instead)",
      report.skipped,
      response.issues.len()
    ));
  }

  Ok(report)
}
