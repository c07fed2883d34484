//! # Dashboard Models
//!
//! Provider-neutral data shapes for repositories and review results. Review
//! models deserialize directly from the backend's snake_case JSON.

use std::fmt;

use serde::de::{self, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Owner of a repository as shown in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryOwner {
  pub login: String,
  pub avatar_url: Option<String>,
}

/// A repository the signed-in identity can access
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
  pub id: u64,
  pub name: String,
  pub url: String,
  pub description: Option<String>,
  pub owner: RepositoryOwner,
}

impl RepositorySummary {
  /// Description to display, with a placeholder when none is set
  pub fn description_or_default(&self) -> &str {
    match self.description.as_deref() {
      Some(description) if !description.trim().is_empty() => description,
      _ => "No description available.",
    }
  }
}

/// Lifecycle state of a pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestStatus {
  Open,
  Closed,
  Merged,
}

impl PullRequestStatus {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Open => "open",
      Self::Closed => "closed",
      Self::Merged => "merged",
    }
  }
}

impl fmt::Display for PullRequestStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Severity of a flagged issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Low,
  Medium,
  High,
}

impl Severity {
  /// Severities from most to least urgent
  pub const ORDERED: [Self; 3] = [Self::High, Self::Medium, Self::Low];

  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Low => "low",
      Self::Medium => "medium",
      Self::High => "high",
    }
  }
}

impl fmt::Display for Severity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// The reviewer is not consistent about casing ("High", "LOW")
impl<'de> Deserialize<'de> for Severity {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let value = String::deserialize(deserializer)?;
    match value.trim().to_ascii_lowercase().as_str() {
      "low" => Ok(Self::Low),
      "medium" => Ok(Self::Medium),
      "high" => Ok(Self::High),
      _ => Err(de::Error::unknown_variant(&value, &["low", "medium", "high"])),
    }
  }
}

/// A single finding attached to a review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
  pub category: String,
  pub severity: Severity,
  #[serde(default, deserialize_with = "null_as_default")]
  pub description: String,
  pub file_path: String,
  pub line_number: u32,
}

/// The automated review attached to a pull request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
  #[serde(default, deserialize_with = "null_as_default")]
  pub content: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub status: String,
  /// Issues that do not decode are logged and skipped
  #[serde(default, deserialize_with = "lenient_issues")]
  pub issues: Vec<Issue>,
}

/// A pull request together with its review, as returned by the backend.
///
/// Timestamps are kept as the raw strings the backend sent; they are validated
/// when the view model is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
  pub number: u64,
  pub title: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub description: String,
  pub status: PullRequestStatus,
  pub created_at: String,
  #[serde(default)]
  pub merged_at: Option<String>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub url: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub review: Review,
}

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientIssue {
  Valid(Issue),
  Invalid(IgnoredAny),
}

/// Decode a review's issues one at a time so a single bad issue does not
/// take the whole pull request down with it
fn lenient_issues<'de, D>(deserializer: D) -> Result<Vec<Issue>, D::Error>
where
  D: Deserializer<'de>,
{
  let entries = Option::<Vec<LenientIssue>>::deserialize(deserializer)?.unwrap_or_default();

  Ok(
    entries
      .into_iter()
      .enumerate()
      .filter_map(|(index, entry)| match entry {
        LenientIssue::Valid(issue) => Some(issue),
        LenientIssue::Invalid(_) => {
          warn!(index, "Dropping review issue that does not match the expected shape");
          None
        }
      })
      .collect(),
  )
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_pull_request_deserialization() {
    let json = json!({
        "number": 7,
        "title": "Add caching layer",
        "description": "Caches repository lookups",
        "status": "merged",
        "created_at": "2024-03-01T10:00:00Z",
        "merged_at": "2024-03-05T09:30:00Z",
        "url": "https://github.com/octo/app/pull/7",
        "review": {
            "content": "Looks solid overall",
            "status": "completed",
            "issues": [
                {
                    "category": "performance",
                    "severity": "medium",
                    "description": "Unbounded cache growth",
                    "file_path": "src/cache.rs",
                    "line_number": 42
                }
            ]
        }
    });

    let pr: PullRequest = serde_json::from_value(json).unwrap();

    assert_eq!(pr.number, 7);
    assert_eq!(pr.status, PullRequestStatus::Merged);
    assert_eq!(pr.merged_at.as_deref(), Some("2024-03-05T09:30:00Z"));
    assert_eq!(pr.review.issues.len(), 1);
    assert_eq!(pr.review.issues[0].severity, Severity::Medium);
    assert_eq!(pr.review.issues[0].line_number, 42);
  }

  #[test]
  fn test_pull_request_nulls_become_defaults() {
    let json = json!({
        "number": 3,
        "title": "Draft",
        "description": null,
        "status": "open",
        "created_at": "2024-01-01T00:00:00Z",
        "merged_at": null,
        "review": null
    });

    let pr: PullRequest = serde_json::from_value(json).unwrap();

    assert_eq!(pr.description, "");
    assert_eq!(pr.url, "");
    assert_eq!(pr.merged_at, None);
    assert_eq!(pr.review, Review::default());
  }

  #[test]
  fn test_unknown_severity_is_rejected() {
    let json = json!({
        "category": "style",
        "severity": "catastrophic",
        "description": "",
        "file_path": "a.rs",
        "line_number": 1
    });

    assert!(serde_json::from_value::<Issue>(json).is_err());
  }

  #[test]
  fn test_severity_is_case_insensitive() {
    for (raw, expected) in [("High", Severity::High), ("MEDIUM", Severity::Medium), (" low ", Severity::Low)] {
      assert_eq!(serde_json::from_value::<Severity>(json!(raw)).unwrap(), expected);
    }
    assert_eq!(serde_json::to_value(Severity::High).unwrap(), json!("high"));
  }

  #[test]
  fn test_bad_issue_is_skipped_without_dropping_review() {
    let json = json!({
        "content": "Mostly fine",
        "status": "completed",
        "issues": [
            { "category": "style", "severity": "low", "description": "", "file_path": "a.rs", "line_number": 1 },
            { "category": "bug", "severity": "catastrophic", "description": "", "file_path": "b.rs", "line_number": 2 },
            { "category": "security", "severity": "High", "description": "", "file_path": "c.rs", "line_number": 3 },
            { "severity": "medium" }
        ]
    });

    let review: Review = serde_json::from_value(json).unwrap();

    assert_eq!(review.content, "Mostly fine");
    let kept: Vec<(&str, Severity)> = review
      .issues
      .iter()
      .map(|issue| (issue.file_path.as_str(), issue.severity))
      .collect();
    assert_eq!(kept, vec![("a.rs", Severity::Low), ("c.rs", Severity::High)]);
  }

  #[test]
  fn test_null_issues_are_empty() {
    let review: Review = serde_json::from_value(json!({ "content": "ok", "issues": null })).unwrap();
    assert!(review.issues.is_empty());
  }

  #[test]
  fn test_negative_line_number_is_rejected() {
    let json = json!({
        "category": "style",
        "severity": "low",
        "description": "",
        "file_path": "a.rs",
        "line_number": -1
    });

    assert!(serde_json::from_value::<Issue>(json).is_err());
  }

  #[test]
  fn test_repository_description_placeholder() {
    let mut repo = RepositorySummary {
      id: 1,
      name: "app".to_string(),
      url: "https://github.com/octo/app".to_string(),
      description: None,
      owner: RepositoryOwner {
        login: "octo".to_string(),
        avatar_url: None,
      },
    };
    assert_eq!(repo.description_or_default(), "No description available.");

    repo.description = Some("The app".to_string());
    assert_eq!(repo.description_or_default(), "The app");
  }

  #[test]
  fn test_severity_ordering() {
    assert!(Severity::High > Severity::Medium);
    assert!(Severity::Medium > Severity::Low);
    assert_eq!(Severity::ORDERED[0], Severity::High);
  }
}
