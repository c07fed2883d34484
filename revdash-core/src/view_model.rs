//! # Review View Model
//!
//! Turns the raw pull-request tree returned by the backend into the ordered,
//! render-ready structure the dashboard displays.
//!
//! Ordering: newest `created_at` first. The sort is stable, so pull requests
//! sharing a timestamp keep the order the backend returned them in. Entries
//! whose timestamps cannot be parsed, or that claim a merge time without being
//! merged, are dropped individually and never fail the whole build.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::DashboardError;
use crate::models::{Issue, PullRequest, PullRequestStatus, Severity};

/// Parse a backend timestamp.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC) and a
/// bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
  let raw = raw.trim();
  if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
    return Some(timestamp.with_timezone(&Utc));
  }
  if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
    return Some(naive.and_utc());
  }
  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .ok()
    .and_then(|date| date.and_hms_opt(0, 0, 0))
    .map(|naive| naive.and_utc())
}

/// Number of issues per severity for one pull request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
  pub high: usize,
  pub medium: usize,
  pub low: usize,
}

impl SeverityCounts {
  fn from_issues(issues: &[Issue]) -> Self {
    let mut counts = Self::default();
    for issue in issues {
      match issue.severity {
        Severity::High => counts.high += 1,
        Severity::Medium => counts.medium += 1,
        Severity::Low => counts.low += 1,
      }
    }
    counts
  }

  pub const fn get(&self, severity: Severity) -> usize {
    match severity {
      Severity::High => self.high,
      Severity::Medium => self.medium,
      Severity::Low => self.low,
    }
  }

  pub const fn total(&self) -> usize {
    self.high + self.medium + self.low
  }
}

/// An issue together with the key that distinguishes it when rendered.
///
/// Issues have no identity of their own and duplicates are legitimate, so the
/// key includes the issue's position in the review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueEntry<'a> {
  pub key: String,
  pub index: usize,
  pub issue: &'a Issue,
}

/// Issues of a single severity, in review order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueGroup<'a> {
  pub severity: Severity,
  pub issues: Vec<IssueEntry<'a>>,
}

/// A validated pull request ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestView {
  pub pull_request: PullRequest,
  pub created_at: DateTime<Utc>,
  pub merged_at: Option<DateTime<Utc>>,
  pub severity_counts: SeverityCounts,
}

impl PullRequestView {
  pub const fn number(&self) -> u64 {
    self.pull_request.number
  }

  pub fn issues(&self) -> &[Issue] {
    &self.pull_request.review.issues
  }

  pub fn issue_count(&self) -> usize {
    self.issues().len()
  }

  pub fn has_issues(&self) -> bool {
    !self.issues().is_empty()
  }

  /// All issues in review order with their render keys
  pub fn issue_entries(&self) -> Vec<IssueEntry<'_>> {
    self
      .issues()
      .iter()
      .enumerate()
      .map(|(index, issue)| IssueEntry {
        key: format!(
          "{}-{}-{}-{}",
          self.pull_request.number, issue.file_path, issue.line_number, index
        ),
        index,
        issue,
      })
      .collect()
  }

  /// Issues grouped by severity, most severe first; empty groups are omitted
  pub fn issues_by_severity(&self) -> Vec<IssueGroup<'_>> {
    let entries = self.issue_entries();
    Severity::ORDERED
      .iter()
      .filter_map(|&severity| {
        let issues: Vec<IssueEntry<'_>> = entries
          .iter()
          .filter(|entry| entry.issue.severity == severity)
          .cloned()
          .collect();
        (!issues.is_empty()).then_some(IssueGroup { severity, issues })
      })
      .collect()
  }
}

/// Sorted pull requests for one repository view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewViewModel {
  pull_requests: Vec<PullRequestView>,
  dropped: usize,
}

impl ReviewViewModel {
  /// True when there is nothing to show; callers render a dedicated
  /// "no pull requests" state for this
  pub fn is_empty(&self) -> bool {
    self.pull_requests.is_empty()
  }

  pub fn len(&self) -> usize {
    self.pull_requests.len()
  }

  pub fn pull_requests(&self) -> &[PullRequestView] {
    &self.pull_requests
  }

  /// Number of input entries excluded because they failed validation
  pub const fn dropped(&self) -> usize {
    self.dropped
  }

  pub fn get(&self, number: u64) -> Option<&PullRequestView> {
    self.pull_requests.iter().find(|pr| pr.number() == number)
  }

  pub fn total_issues(&self) -> usize {
    self.pull_requests.iter().map(PullRequestView::issue_count).sum()
  }
}

/// Build the view model for a list of pull requests.
///
/// Pure: the input slice is left untouched and the same input always yields
/// the same output.
pub fn build(pull_requests: &[PullRequest]) -> ReviewViewModel {
  let mut dropped = 0;
  let mut views = Vec::with_capacity(pull_requests.len());

  for pull_request in pull_requests {
    match validate(pull_request) {
      Ok(view) => views.push(view),
      Err(e) => {
        warn!(pr = pull_request.number, error = %e, "Dropping pull request from view");
        dropped += 1;
      }
    }
  }

  // `sort_by` is stable, which keeps backend order for equal timestamps
  views.sort_by(|a, b| b.created_at.cmp(&a.created_at));

  debug!(kept = views.len(), dropped, "Built review view model");

  ReviewViewModel {
    pull_requests: views,
    dropped,
  }
}

fn validate(pull_request: &PullRequest) -> Result<PullRequestView, DashboardError> {
  let created_at = parse_timestamp(&pull_request.created_at).ok_or_else(|| {
    DashboardError::DataShape(format!(
      "pull request #{} has an invalid created_at '{}'",
      pull_request.number, pull_request.created_at
    ))
  })?;

  let merged_at = match pull_request.merged_at.as_deref() {
    None => None,
    Some(raw) if raw.trim().is_empty() => None,
    Some(raw) => Some(parse_timestamp(raw).ok_or_else(|| {
      DashboardError::DataShape(format!(
        "pull request #{} has an invalid merged_at '{raw}'",
        pull_request.number
      ))
    })?),
  };

  if merged_at.is_some() && pull_request.status != PullRequestStatus::Merged {
    return Err(DashboardError::DataShape(format!(
      "pull request #{} has a merge time but status '{}'",
      pull_request.number, pull_request.status
    )));
  }

  Ok(PullRequestView {
    pull_request: pull_request.clone(),
    created_at,
    merged_at,
    severity_counts: SeverityCounts::from_issues(&pull_request.review.issues),
  })
}
