//! # Output Formatting
//!
//! Colored, emoji-prefixed status lines and small formatting helpers for the
//! diagnostics jqlr prints around each request.

use owo_colors::Stream::Stderr;
use owo_colors::{OwoColorize, Style};

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Apply the mode as the process-wide color override
  pub fn apply(self) {
    match self {
      ColorMode::Always | ColorMode::Yes => owo_colors::set_override(true),
      ColorMode::Never | ColorMode::No => owo_colors::set_override(false),
      // Leave terminal detection to owo-colors
      ColorMode::Auto => {}
    }
  }
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

// Status lines and request diagnostics go to stderr so stdout carries only
// command output such as the report.

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  eprintln!("{} {}", check.if_supports_color(Stderr, |t| t.style(Style::new().green().bold())), message);
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("cross_mark", "✗");
  eprintln!("{} {}", cross.if_supports_color(Stderr, |t| t.style(Style::new().red().bold())), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  eprintln!("{} {}", warning.if_supports_color(Stderr, |t| t.style(Style::new().yellow().bold())), message);
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  eprintln!("{} {}", info.if_supports_color(Stderr, |t| t.style(Style::new().blue().bold())), message);
}

/// Print a section header
pub fn print_header(header: &str) {
  eprintln!("\n{}", header.if_supports_color(Stderr, |t| t.style(Style::new().blue().bold())));
}

/// Format an HTTP status code, green for 200 and red otherwise
pub fn format_status(code: u16) -> String {
  if code == 200 {
    code.if_supports_color(Stderr, |t| t.green()).to_string()
  } else {
    code.if_supports_color(Stderr, |t| t.style(Style::new().red().bold())).to_string()
  }
}

/// Format a URL
pub fn format_url(url: &str) -> String {
  url.if_supports_color(Stderr, |t| t.bright_cyan()).to_string()
}

/// Format a header name
pub fn format_header_name(name: &str) -> String {
  name.if_supports_color(Stderr, |t| t.bright_black()).to_string()
}

/// Mask a secret, keeping only enough of it to tell tokens apart
pub fn mask_secret(secret: &str) -> String {
  let visible: String = secret.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
  if secret.chars().count() <= 8 {
    "********".to_string()
  } else {
    format!("********{visible}")
  }
}
