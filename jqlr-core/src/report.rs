//! # Issue Report
//!
//! Turns the values collected from each issue record into rows with the fixed
//! column order `Key, Summary, Email, Reporter`, and renders them as a table
//! or as JSON.

use serde::Serialize;
use serde_json::Value;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::{debug, warn};

use crate::extract::{ExtractError, FieldMatch, FieldTargets, KeyOrder, extract_record};

/// Report columns in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
  Key,
  Summary,
  Email,
  Reporter,
}

impl Column {
  /// All columns in display order
  pub const ALL: [Column; 4] = [Column::Key, Column::Summary, Column::Email, Column::Reporter];

  /// Column header text
  pub const fn header(self) -> &'static str {
    match self {
      Column::Key => "Key",
      Column::Summary => "Summary",
      Column::Email => "Email",
      Column::Reporter => "Reporter",
    }
  }

  /// The column a collected leaf key is displayed in, if any
  pub fn for_field(field: &str) -> Option<Column> {
    match field {
      "key" => Some(Column::Key),
      "summary" => Some(Column::Summary),
      "emailAddress" => Some(Column::Email),
      "displayName" => Some(Column::Reporter),
      _ => None,
    }
  }
}

/// Output format for a rendered report
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
  /// A bordered text table
  #[default]
  Table,
  /// A JSON array of objects keyed by column header
  Json,
}

/// One issue's worth of report cells
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IssueRow {
  #[serde(rename = "Key")]
  pub key: Option<String>,
  #[serde(rename = "Summary")]
  pub summary: Option<String>,
  #[serde(rename = "Email")]
  pub email: Option<String>,
  #[serde(rename = "Reporter")]
  pub reporter: Option<String>,
}

impl IssueRow {
  /// Place collected values into their columns.
  ///
  /// Each column takes its shallowest non-null match, so an issue's own `key`
  /// beats a nested user `key` whatever order the keys were visited in. Ties
  /// go to the match found first. Values for leaf keys that have no column
  /// are dropped.
  pub fn from_matches(matches: &[FieldMatch]) -> Self {
    let mut row = Self::default();
    let mut depths = [usize::MAX; Column::ALL.len()];

    for m in matches {
      let Some(column) = Column::for_field(&m.field) else {
        debug!("No report column for field '{}'", m.field);
        continue;
      };
      let Some(text) = render_scalar(&m.value) else {
        continue;
      };
      let best = &mut depths[column as usize];
      if m.depth < *best {
        *best = m.depth;
        *row.cell_mut(column) = Some(text);
      }
    }
    row
  }

  /// The cell for `column`
  pub fn cell(&self, column: Column) -> Option<&str> {
    match column {
      Column::Key => self.key.as_deref(),
      Column::Summary => self.summary.as_deref(),
      Column::Email => self.email.as_deref(),
      Column::Reporter => self.reporter.as_deref(),
    }
  }

  fn cell_mut(&mut self, column: Column) -> &mut Option<String> {
    match column {
      Column::Key => &mut self.key,
      Column::Summary => &mut self.summary,
      Column::Email => &mut self.email,
      Column::Reporter => &mut self.reporter,
    }
  }
}

/// Table view of a row; empty cells render as blanks
#[derive(Tabled)]
struct TableRow<'a> {
  #[tabled(rename = "Key")]
  key: &'a str,
  #[tabled(rename = "Summary")]
  summary: &'a str,
  #[tabled(rename = "Email")]
  email: &'a str,
  #[tabled(rename = "Reporter")]
  reporter: &'a str,
}

impl<'a> From<&'a IssueRow> for TableRow<'a> {
  fn from(row: &'a IssueRow) -> Self {
    Self {
      key: row.key.as_deref().unwrap_or_default(),
      summary: row.summary.as_deref().unwrap_or_default(),
      email: row.email.as_deref().unwrap_or_default(),
      reporter: row.reporter.as_deref().unwrap_or_default(),
    }
  }
}

/// All rows produced by one search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueReport {
  pub rows: Vec<IssueRow>,
  /// Issue records left out because they broke the extractor's contract
  pub skipped: usize,
}

impl IssueReport {
  /// Flatten every issue record into a row.
  ///
  /// In strict mode the first malformed record aborts the report. Otherwise
  /// malformed records are logged, counted in [`IssueReport::skipped`], and
  /// left out.
  pub fn from_records(
    records: &[Value],
    targets: &FieldTargets,
    order: KeyOrder,
    strict: bool,
  ) -> Result<Self, ExtractError> {
    let mut report = Self::default();

    for (index, record) in records.iter().enumerate() {
      match extract_record(record, targets, order) {
        Ok(matches) => {
          debug!(
            "Issue {index}: {:?}",
            matches.iter().map(|m| &m.value).collect::<Vec<_>>()
          );
          report.rows.push(IssueRow::from_matches(&matches));
        }
        Err(err) if strict => return Err(err),
        Err(err) => {
          warn!("Skipping issue {index}: {err}");
          report.skipped += 1;
        }
      }
    }

    Ok(report)
  }

  /// Number of rows
  pub fn len(&self) -> usize {
    self.rows.len()
  }

  /// Whether the report has no rows
  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  /// Render in the requested format
  pub fn render(&self, format: ReportFormat) -> serde_json::Result<String> {
    match format {
      ReportFormat::Table => Ok(self.render_table()),
      ReportFormat::Json => self.render_json(),
    }
  }

  /// Render as a text table. The header row is present even with no rows.
  pub fn render_table(&self) -> String {
    let rows: Vec<TableRow<'_>> = self.rows.iter().map(TableRow::from).collect();
    Table::new(rows).with(Style::sharp()).to_string()
  }

  /// Render as a pretty-printed JSON array
  pub fn render_json(&self) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&self.rows)
  }
}

/// Text for a collected value; `null` has no text.
fn render_scalar(value: &Value) -> Option<String> {
  match value {
    Value::Null => None,
    Value::String(s) => Some(s.clone()),
    Value::Bool(b) => Some(b.to_string()),
    Value::Number(n) => Some(n.to_string()),
    other => Some(other.to_string()),
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn matches(pairs: &[(&str, Value)]) -> Vec<FieldMatch> {
    pairs
      .iter()
      .map(|(field, value)| FieldMatch {
        field: field.to_string(),
        value: value.clone(),
        depth: 0,
      })
      .collect()
  }

  #[test]
  fn test_end_to_end_single_issue() {
    let response = json!({
      "issues": [
        { "key": "ABC-1", "fields": { "summary": "Fix bug", "reporter": { "displayName": "Alice" } } }
      ]
    });
    let records = response["issues"].as_array().unwrap();

    let report = IssueReport::from_records(records, &FieldTargets::default(), KeyOrder::Document, false).unwrap();

    assert_eq!(report.len(), 1);
    let row = &report.rows[0];
    assert_eq!(row.cell(Column::Key), Some("ABC-1"));
    assert_eq!(row.cell(Column::Summary), Some("Fix bug"));
    assert_eq!(row.cell(Column::Reporter), Some("Alice"));
    assert_eq!(row.cell(Column::Email), None);
  }

  #[test]
  fn test_columns_do_not_depend_on_traversal_order() {
    let records = vec![json!({
      "fields": { "reporter": { "displayName": "Alice" }, "summary": "Fix bug" },
      "key": "ABC-1"
    })];

    for order in [KeyOrder::Document, KeyOrder::Sorted] {
      let report = IssueReport::from_records(&records, &FieldTargets::default(), order, false).unwrap();
      assert_eq!(report.rows[0].key.as_deref(), Some("ABC-1"));
      assert_eq!(report.rows[0].summary.as_deref(), Some("Fix bug"));
      assert_eq!(report.rows[0].reporter.as_deref(), Some("Alice"));
    }
  }

  #[test]
  fn test_empty_issues_renders_headers_only() {
    let report = IssueReport::from_records(&[], &FieldTargets::default(), KeyOrder::Document, false).unwrap();
    assert!(report.is_empty());

    let table = report.render_table();
    let header = table.lines().nth(1).unwrap();
    let positions: Vec<usize> = Column::ALL
      .iter()
      .map(|c| header.find(c.header()).unwrap())
      .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "columns out of order: {header}");
  }

  #[test]
  fn test_table_contains_row_values() {
    let report = IssueReport {
      rows: vec![IssueRow {
        key: Some("ABC-1".to_string()),
        summary: Some("Fix bug".to_string()),
        email: None,
        reporter: Some("Alice".to_string()),
      }],
      skipped: 0,
    };

    let table = report.render_table();
    assert!(table.contains("ABC-1"));
    assert!(table.contains("Fix bug"));
    assert!(table.contains("Alice"));
  }

  #[test]
  fn test_malformed_issue_is_skipped() {
    let records = vec![
      json!({ "key": "ABC-1", "fields": "oops" }),
      json!({ "key": "ABC-2", "fields": { "summary": "Works" } }),
    ];

    let report = IssueReport::from_records(&records, &FieldTargets::default(), KeyOrder::Document, false).unwrap();
    assert_eq!(report.skipped, 1);
    assert_eq!(report.len(), 1);
    assert_eq!(report.rows[0].key.as_deref(), Some("ABC-2"));
  }

  #[test]
  fn test_malformed_issue_is_fatal_in_strict_mode() {
    let records = vec![
      json!({ "key": "ABC-1", "fields": "oops" }),
      json!({ "key": "ABC-2", "fields": { "summary": "Works" } }),
    ];

    let err = IssueReport::from_records(&records, &FieldTargets::default(), KeyOrder::Document, true).unwrap_err();
    assert!(matches!(err, ExtractError::ContainerNotObject { .. }));
  }

  #[test]
  fn test_non_object_issue_is_skipped() {
    let records = vec![json!(42), json!({ "key": "ABC-2" })];
    let report = IssueReport::from_records(&records, &FieldTargets::default(), KeyOrder::Document, false).unwrap();
    assert_eq!(report.skipped, 1);
    assert_eq!(report.len(), 1);
  }

  #[test]
  fn test_sorted_order_keeps_issue_key_over_reporter_key() {
    let records = vec![json!({
      "key": "ABC-1",
      "fields": { "reporter": { "key": "JIRAUSER1", "displayName": "Alice" } }
    })];

    let report = IssueReport::from_records(&records, &FieldTargets::default(), KeyOrder::Sorted, false).unwrap();
    assert_eq!(report.rows[0].key.as_deref(), Some("ABC-1"));
    assert_eq!(report.rows[0].reporter.as_deref(), Some("Alice"));
  }

  #[test]
  fn test_key_order_only_breaks_ties_at_equal_depth() {
    let records = vec![json!({
      "key": "ABC-1",
      "fields": {
        "reporter": { "displayName": "Alice" },
        "assignee": { "displayName": "Bob" }
      }
    })];
    let targets = FieldTargets::new(["fields", "reporter", "assignee"], ["key", "displayName"]);

    let document = IssueReport::from_records(&records, &targets, KeyOrder::Document, false).unwrap();
    let sorted = IssueReport::from_records(&records, &targets, KeyOrder::Sorted, false).unwrap();

    assert_eq!(document.rows[0].reporter.as_deref(), Some("Alice"));
    assert_eq!(sorted.rows[0].reporter.as_deref(), Some("Bob"));
    assert_eq!(document.rows[0].key, sorted.rows[0].key);
  }

  #[test]
  fn test_first_match_wins() {
    let row = IssueRow::from_matches(&matches(&[
      ("key", json!("ABC-1")),
      ("key", json!("JIRAUSER1")),
      ("displayName", json!("Alice")),
    ]));
    assert_eq!(row.key.as_deref(), Some("ABC-1"));
    assert_eq!(row.reporter.as_deref(), Some("Alice"));
  }

  #[test]
  fn test_null_does_not_claim_a_column() {
    let row = IssueRow::from_matches(&matches(&[("summary", Value::Null), ("summary", json!("Later"))]));
    assert_eq!(row.summary.as_deref(), Some("Later"));
  }

  #[test]
  fn test_email_column_fills_from_email_address() {
    let row = IssueRow::from_matches(&matches(&[("emailAddress", json!("alice@example.com"))]));
    assert_eq!(row.email.as_deref(), Some("alice@example.com"));
  }

  #[test]
  fn test_non_string_scalars() {
    let row = IssueRow::from_matches(&matches(&[("key", json!(7)), ("summary", json!(true))]));
    assert_eq!(row.key.as_deref(), Some("7"));
    assert_eq!(row.summary.as_deref(), Some("true"));
  }

  #[test]
  fn test_render_json_uses_column_headers() {
    let report = IssueReport {
      rows: vec![IssueRow {
        key: Some("ABC-1".to_string()),
        summary: Some("Fix bug".to_string()),
        email: None,
        reporter: Some("Alice".to_string()),
      }],
      skipped: 0,
    };

    let rendered: Value = serde_json::from_str(&report.render(ReportFormat::Json).unwrap()).unwrap();
    assert_eq!(
      rendered,
      json!([{ "Key": "ABC-1", "Summary": "Fix bug", "Email": null, "Reporter": "Alice" }])
    );
  }
}
