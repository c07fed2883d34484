//! Spinner shown on stderr while a fetch is in flight.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Start a spinner with `message`; hidden when stderr is not a terminal
pub fn spinner(message: &str) -> ProgressBar {
  if !std::io::stderr().is_terminal() {
    return ProgressBar::hidden();
  }

  let spinner = ProgressBar::new_spinner();
  let style = ProgressStyle::default_spinner()
    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
    .template("{spinner} {msg}")
    .unwrap_or_else(|_| ProgressStyle::default_spinner());
  spinner.set_style(style);
  spinner.set_message(message.to_string());
  spinner.enable_steady_tick(Duration::from_millis(80));
  spinner
}
