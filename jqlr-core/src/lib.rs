//! # jqlr Core Library
//!
//! Shared building blocks for the jqlr workspace: configuration resolution,
//! the nested field extractor that flattens Jira issue records, report
//! assembly and rendering, and console output helpers.

pub mod config;
pub mod consts;
pub mod extract;
pub mod output;
pub mod report;
pub mod url;

pub use config::{ConfigDirs, ConfigError, FileConfig, Overrides, Settings, get_config_dirs};
pub use extract::{
  ExtractError, FieldMatch, FieldTargets, KeyOrder, extract_fields, extract_fields_ordered, extract_matches, extract_record,
};
pub use output::{ColorMode, print_error, print_header, print_info, print_success, print_warning};
pub use report::{Column, IssueReport, IssueRow, ReportFormat};
