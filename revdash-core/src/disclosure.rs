//! Expand/collapse state for the issue lists of a repository view.

use std::collections::HashSet;

/// Per-pull-request "issue list expanded" flags.
///
/// Keys are independent: toggling one pull request never changes another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisclosureStateStore {
  expanded: HashSet<u64>,
}

impl DisclosureStateStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Flip the expansion state of one pull request
  pub fn toggle(&mut self, pr_number: u64) {
    if !self.expanded.remove(&pr_number) {
      self.expanded.insert(pr_number);
    }
  }

  /// Whether the issue list of a pull request is expanded; false if never toggled
  pub fn is_expanded(&self, pr_number: u64) -> bool {
    self.expanded.contains(&pr_number)
  }

  /// Collapse everything
  pub fn reset(&mut self) {
    self.expanded.clear();
  }

  pub fn expanded_count(&self) -> usize {
    self.expanded.len()
  }
}
