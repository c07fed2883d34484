//! # View Rendering
//!
//! Pure functions turning dashboard state into terminal text. Each view state
//! has its own branch (signed out, loading, failed, empty, loaded) so the
//! caller never has to special-case an error or an empty list.

use owo_colors::{OwoColorize, Stream};
use revdash_core::output::{
  format_dimmed, format_header, format_pr_status, format_repo_name, format_severity, format_timestamp,
  get_emoji_or_default,
};
use revdash_core::{DashboardError, Identity, PullRequestView, RepositoryView, ReviewViewModel, Severity, ViewState};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::dashboard::CatalogState;

/// Headline shown wherever a session is required but absent
pub const SIGN_IN_HINT: &str = "Connect your GitHub account to get started";

const DESCRIPTION_WIDTH: usize = 50;

/// The unauthenticated state
pub fn render_sign_in_hint() -> String {
  [
    SIGN_IN_HINT.if_supports_color(Stream::Stdout, |t| t.bold()).to_string(),
    format_dimmed("  Set REVDASH_GITHUB_TOKEN or GITHUB_TOKEN, or store a token for github.com in ~/.netrc."),
  ]
  .join("\n")
}

/// Header line for the signed-in identity
pub fn render_identity(identity: &Identity) -> String {
  let mut lines = vec![format!(
    "Signed in as {}",
    identity
      .name
      .if_supports_color(Stream::Stdout, |t| t.bold().to_string())
  )];
  if let Some(avatar_url) = &identity.avatar_url {
    lines.push(format!("  {}", format_dimmed(avatar_url)));
  }
  lines.join("\n")
}

/// A GitHub session lookup that failed for reasons other than a rejected token
pub fn render_connect_failure(error: &DashboardError) -> String {
  render_failure("your GitHub session", error)
}

fn render_failure(subject: &str, error: &DashboardError) -> String {
  let cross = get_emoji_or_default("x", "✗");
  format!(
    "{} Could not load {subject}: {}",
    cross.if_supports_color(Stream::Stdout, |t| t.red()),
    error.user_message()
  )
}

#[derive(Tabled)]
struct RepositoryRow {
  #[tabled(rename = "Name")]
  name: String,
  #[tabled(rename = "Owner")]
  owner: String,
  #[tabled(rename = "Description")]
  description: String,
  #[tabled(rename = "URL")]
  url: String,
}

/// The repository catalog
pub fn render_catalog(state: &CatalogState) -> String {
  match state {
    CatalogState::Unauthenticated => render_sign_in_hint(),
    CatalogState::Failed(error) => render_failure("repositories", error),
    CatalogState::Loaded(repos) if repos.is_empty() => "No repositories found.".to_string(),
    CatalogState::Loaded(repos) => {
      let rows: Vec<RepositoryRow> = repos
        .iter()
        .map(|repo| RepositoryRow {
          name: repo.name.clone(),
          owner: repo.owner.login.clone(),
          description: truncate(repo.description_or_default(), DESCRIPTION_WIDTH),
          url: repo.url.clone(),
        })
        .collect();

      format!(
        "{}\n\n{}",
        format_header(&format!("Repositories ({})", repos.len())),
        Table::new(rows).with(Style::sharp())
      )
    }
  }
}

/// The repository view, with issue lists shown for expanded pull requests
pub fn render_view(view: &RepositoryView) -> String {
  match view.state() {
    ViewState::Idle => "No repository selected.".to_string(),
    ViewState::Unauthenticated => render_sign_in_hint(),
    ViewState::Loading { repo_name } => format!("Loading pull requests for {}...", format_repo_name(repo_name)),
    ViewState::Failed { repo_name, error } => render_failure(repo_name, error),
    ViewState::Loaded { repo_name, model } if model.is_empty() => {
      let mut lines = vec![format!("No pull requests found for {}.", format_repo_name(repo_name))];
      lines.extend(render_dropped(model));
      lines.join("\n")
    }
    ViewState::Loaded { repo_name, model } => {
      let mut lines = vec![format!(
        "{} {} ({})",
        format_header("Pull requests for"),
        format_repo_name(repo_name),
        model.len()
      )];
      for pull_request in model.pull_requests() {
        lines.push(String::new());
        render_pull_request(&mut lines, pull_request, view.is_expanded(pull_request.number()));
      }
      lines.extend(render_dropped(model));
      lines.join("\n")
    }
  }
}

fn render_pull_request(lines: &mut Vec<String>, view: &PullRequestView, expanded: bool) {
  let pull_request = &view.pull_request;
  lines.push(format!(
    "#{} {} [{}]",
    pull_request.number,
    pull_request.title.if_supports_color(Stream::Stdout, |t| t.bold()),
    format_pr_status(pull_request.status)
  ));
  for line in pull_request.description.trim().lines() {
    lines.push(format!("  {}", line.trim_end()));
  }

  let mut dates = format!(
    "Created {}",
    format_timestamp(&view.created_at.format("%Y-%m-%d %H:%M UTC").to_string())
  );
  if let Some(merged_at) = view.merged_at {
    dates.push_str(&format!(
      " | Merged {}",
      format_timestamp(&merged_at.format("%Y-%m-%d %H:%M UTC").to_string())
    ));
  }
  lines.push(format!("  {dates}"));

  if !pull_request.url.is_empty() {
    lines.push(format!("  {}", format_dimmed(&pull_request.url)));
  }
  if !pull_request.review.content.trim().is_empty() {
    lines.push(format!("  Review: {}", pull_request.review.content.trim()));
  }
  if !pull_request.review.status.trim().is_empty() {
    lines.push(format!("  Review status: {}", pull_request.review.status.trim()));
  }

  if !view.has_issues() {
    lines.push("  No issues found".to_string());
    return;
  }

  let marker = if expanded { "▾" } else { "▸" };
  lines.push(format!(
    "  {marker} Issues: {} ({})",
    view.issue_count(),
    severity_summary(view)
  ));

  if expanded {
    for group in view.issues_by_severity() {
      for entry in group.issues {
        let issue = entry.issue;
        let mut line = format!(
          "      {} {}:{} [{}]",
          format_severity(group.severity),
          issue.file_path,
          issue.line_number,
          issue.category
        );
        if !issue.description.is_empty() {
          line.push(' ');
          line.push_str(&issue.description);
        }
        lines.push(line);
      }
    }
  }
}

fn severity_summary(view: &PullRequestView) -> String {
  Severity::ORDERED
    .iter()
    .filter(|severity| view.severity_counts.get(**severity) > 0)
    .map(|severity| format!("{} {}", view.severity_counts.get(*severity), severity))
    .collect::<Vec<_>>()
    .join(", ")
}

fn render_dropped(model: &ReviewViewModel) -> Option<String> {
  (model.dropped() > 0).then(|| {
    format!(
      "\n{}",
      format_dimmed(&format!(
        "{} pull request(s) hidden because of malformed data",
        model.dropped()
      ))
    )
  })
}

/// Truncate to `max` characters, marking the cut with an ellipsis
fn truncate(text: &str, max: usize) -> String {
  if text.chars().count() <= max {
    return text.to_string();
  }
  let mut truncated: String = text.chars().take(max.saturating_sub(1)).collect();
  truncated.push('…');
  truncated
}

#[cfg(test)]
mod tests {
  use insta::assert_snapshot;
  use revdash_core::{
    Issue, PullRequest, PullRequestStatus, RepositoryOwner, RepositorySummary, Review,
  };

  use super::*;

  fn no_colors() {
    owo_colors::set_override(false);
  }

  fn issue(severity: Severity, file_path: &str, line_number: u32, description: &str) -> Issue {
    Issue {
      category: "correctness".to_string(),
      severity,
      description: description.to_string(),
      file_path: file_path.to_string(),
      line_number,
    }
  }

  fn pr(number: u64, created_at: &str, issues: Vec<Issue>) -> PullRequest {
    PullRequest {
      number,
      title: format!("PR {number}"),
      description: String::new(),
      status: PullRequestStatus::Open,
      created_at: created_at.to_string(),
      merged_at: None,
      url: format!("https://github.com/octo/app/pull/{number}"),
      review: Review {
        content: "Looks fine.".to_string(),
        status: "completed".to_string(),
        issues,
      },
    }
  }

  fn octo_app() -> Vec<PullRequest> {
    let mut merged = pr(
      2,
      "2024-03-01T10:00:00Z",
      vec![
        issue(Severity::Low, "src/lib.rs", 3, "Unused import"),
        issue(Severity::High, "src/db.rs", 41, "SQL built from user input"),
      ],
    );
    merged.description = "Moves queries behind the repository layer.\nNo schema changes.".to_string();
    merged.status = PullRequestStatus::Merged;
    merged.merged_at = Some("2024-03-05T12:30:00Z".to_string());

    vec![pr(1, "2024-01-01T09:00:00Z", vec![]), merged]
  }

  fn loaded(repo_name: &str, pull_requests: Vec<PullRequest>) -> RepositoryView {
    let mut view = RepositoryView::new();
    let ticket = view.navigate(repo_name);
    view.complete(ticket, Ok(pull_requests));
    view
  }

  #[test]
  fn test_render_collapsed_view() {
    no_colors();
    let view = loaded("app", octo_app());

    assert_snapshot!(render_view(&view), @r"
    Pull requests for app (2)

    #2 PR 2 [merged]
      Moves queries behind the repository layer.
      No schema changes.
      Created 2024-03-01 10:00 UTC | Merged 2024-03-05 12:30 UTC
      https://github.com/octo/app/pull/2
      Review: Looks fine.
      Review status: completed
      ▸ Issues: 2 (1 high, 1 low)

    #1 PR 1 [open]
      Created 2024-01-01 09:00 UTC
      https://github.com/octo/app/pull/1
      Review: Looks fine.
      Review status: completed
      No issues found
    ");
  }

  #[test]
  fn test_render_expanded_issues_by_severity() {
    no_colors();
    let mut view = loaded("app", octo_app());
    view.toggle(2);

    let output = render_view(&view);

    assert!(output.contains("▾ Issues: 2"));
    let high = output.find("HIGH src/db.rs:41").unwrap();
    let low = output.find("LOW src/lib.rs:3").unwrap();
    assert!(high < low);
  }

  #[test]
  fn test_duplicate_issues_render_separately() {
    no_colors();
    let duplicate = issue(Severity::Medium, "src/a.rs", 7, "Possible overflow");
    let mut view = loaded("app", vec![pr(9, "2024-01-01", vec![duplicate.clone(), duplicate])]);
    view.toggle(9);

    let output = render_view(&view);
    assert_eq!(output.matches("MEDIUM src/a.rs:7 [correctness] Possible overflow").count(), 2);
  }

  #[test]
  fn test_render_empty_view() {
    no_colors();
    let view = loaded("lib", vec![]);

    assert_eq!(render_view(&view), "No pull requests found for lib.");
  }

  #[test]
  fn test_render_dropped_entries_are_mentioned() {
    no_colors();
    let view = loaded("app", vec![pr(1, "yesterday", vec![])]);

    let output = render_view(&view);
    assert!(output.starts_with("No pull requests found for app."));
    assert!(output.contains("1 pull request(s) hidden because of malformed data"));
  }

  #[test]
  fn test_render_loading_and_signed_out() {
    no_colors();
    let mut view = RepositoryView::new();
    assert_eq!(render_view(&view), "No repository selected.");

    view.navigate("app");
    assert_eq!(render_view(&view), "Loading pull requests for app...");

    view.require_sign_in();
    assert!(render_view(&view).starts_with(SIGN_IN_HINT));
  }

  #[test]
  fn test_render_failed_view() {
    no_colors();
    let mut view = loaded("app", octo_app());
    let ticket = view.navigate("app");
    view.complete(ticket, Err(DashboardError::Fetch { status_code: 500 }));

    let output = render_view(&view);
    assert!(output.contains("Could not load app"));
    assert!(output.contains("HTTP 500"));
    assert!(!output.contains("#2"));
  }

  #[test]
  fn test_render_skips_blank_description_and_status() {
    no_colors();
    let mut pull_request = pr(5, "2024-01-01T00:00:00Z", vec![]);
    pull_request.description = "  \n".to_string();
    pull_request.review.status = String::new();
    let view = loaded("app", vec![pull_request]);

    let output = render_view(&view);
    assert!(!output.contains("Review status"));
    assert!(output.contains("#5 PR 5 [open]\n  Created 2024-01-01 00:00 UTC"));
  }

  #[test]
  fn test_render_connect_failure() {
    no_colors();
    let output = render_connect_failure(&DashboardError::Network("connection refused".to_string()));

    assert!(output.contains("Could not load your GitHub session"));
    assert!(output.contains("Could not reach the server"));
  }

  #[test]
  fn test_render_catalog() {
    no_colors();
    let state = CatalogState::Loaded(vec![RepositorySummary {
      id: 1,
      name: "app".to_string(),
      url: "https://github.com/octo/app".to_string(),
      description: None,
      owner: RepositoryOwner {
        login: "octo".to_string(),
        avatar_url: None,
      },
    }]);

    let output = render_catalog(&state);
    assert!(output.starts_with("Repositories (1)"));
    assert!(output.contains("No description available."));
    assert!(output.contains("https://github.com/octo/app"));
  }

  #[test]
  fn test_render_catalog_states() {
    no_colors();
    assert_eq!(render_catalog(&CatalogState::Loaded(vec![])), "No repositories found.");
    assert!(render_catalog(&CatalogState::Unauthenticated).starts_with(SIGN_IN_HINT));
    assert!(
      render_catalog(&CatalogState::Failed(DashboardError::Auth("Bad credentials".to_string())))
        .contains("reconnect your GitHub account")
    );
  }

  #[test]
  fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("abcdefghij", 5), "abcd…");
  }
}
