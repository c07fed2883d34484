//! # Output Formatting
//!
//! Provides formatted output functions with colors, emojis, and consistent
//! styling for user-facing messages and terminal output. Styling goes through
//! `if_supports_color`, so `--colors never` and non-terminal output stay plain.

use owo_colors::{OwoColorize, Stream};

use crate::models::{PullRequestStatus, Severity};

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  Never,
}

impl ColorMode {
  /// Apply the mode process-wide
  pub fn apply(self) {
    match self {
      Self::Always => owo_colors::set_override(true),
      Self::Never => owo_colors::set_override(false),
      Self::Auto => owo_colors::unset_override(),
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

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("white_check_mark", "✓");
  println!("{} {}", check.if_supports_color(Stream::Stdout, |t| t.green()), message);
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("x", "✗");
  eprintln!("{} {}", cross.if_supports_color(Stream::Stderr, |t| t.red()), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  println!("{} {}", warning.if_supports_color(Stream::Stdout, |t| t.yellow()), message);
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information_source", "ℹ");
  println!("{} {}", info.if_supports_color(Stream::Stdout, |t| t.blue()), message);
}

/// Format a section header
pub fn format_header(header: &str) -> String {
  header
    .if_supports_color(Stream::Stdout, |t| t.bold().blue().to_string())
    .to_string()
}

/// Format a repository name
pub fn format_repo_name(name: &str) -> String {
  name
    .if_supports_color(Stream::Stdout, |t| t.bright_cyan().bold().to_string())
    .to_string()
}

/// Format a timestamp
pub fn format_timestamp(timestamp: &str) -> String {
  timestamp.if_supports_color(Stream::Stdout, |t| t.yellow()).to_string()
}

/// Format de-emphasized text such as URLs and placeholders
pub fn format_dimmed(text: &str) -> String {
  text.if_supports_color(Stream::Stdout, |t| t.bright_black()).to_string()
}

/// Format a pull request status
pub fn format_pr_status(status: PullRequestStatus) -> String {
  let label = status.as_str();
  match status {
    PullRequestStatus::Open => label.if_supports_color(Stream::Stdout, |t| t.green()).to_string(),
    PullRequestStatus::Merged => label.if_supports_color(Stream::Stdout, |t| t.magenta()).to_string(),
    PullRequestStatus::Closed => label.if_supports_color(Stream::Stdout, |t| t.red()).to_string(),
  }
}

/// Format an issue severity; this is the style classification used
/// everywhere an issue is shown
pub fn format_severity(severity: Severity) -> String {
  let label = severity.as_str().to_uppercase();
  match severity {
    Severity::High => label
      .if_supports_color(Stream::Stdout, |t| t.red().bold().to_string())
      .to_string(),
    Severity::Medium => label.if_supports_color(Stream::Stdout, |t| t.yellow()).to_string(),
    Severity::Low => label.if_supports_color(Stream::Stdout, |t| t.blue()).to_string(),
  }
}
