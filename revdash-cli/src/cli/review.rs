//! # Review Command
//!
//! Shows the review view of one repository, optionally with some or all issue
//! lists expanded.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use clap::Args;
use revdash_core::output::print_warning;
use revdash_core::{PullRequestView, ReviewViewModel, ViewState, parse_repo_reference};
use serde::Serialize;

use super::OutputFormat;
use crate::context::CommandContext;
use crate::progress::spinner;
use crate::render::render_view;

/// Command for showing a repository's reviews
#[derive(Args)]
pub struct ReviewArgs {
  /// Repository name, owner/name, or GitHub URL
  #[arg(value_name = "REPO")]
  pub repository: String,

  /// Expand the issue list of a pull request (repeatable)
  #[arg(long, short = 'e', value_name = "PR")]
  pub expand: Vec<u64>,

  /// Expand every issue list
  #[arg(long = "expand-all", conflicts_with = "expand")]
  pub expand_all: bool,

  /// Output format
  #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Text)]
  pub format: OutputFormat,
}

#[derive(Serialize)]
struct ReviewOutput<'a> {
  repository: &'a str,
  pull_requests: &'a [PullRequestView],
  expanded: Vec<u64>,
  dropped: usize,
}

pub(super) fn handle_review_command(args: ReviewArgs) -> Result<()> {
  let repo_name = parse_repo_reference(&args.repository)?;
  let context = CommandContext::connect()?;
  context.report_connect_failure();
  let CommandContext {
    runtime, mut dashboard, ..
  } = context;

  let progress = spinner(&format!("Loading pull requests for {repo_name}..."));
  runtime.block_on(dashboard.open_repository(&repo_name));
  progress.finish_and_clear();

  let to_expand = match dashboard.view().state() {
    ViewState::Loaded { model, .. } => select_expanded(model, &args.expand, args.expand_all),
    _ => Vec::new(),
  };
  for pr_number in &to_expand {
    dashboard.toggle(*pr_number);
  }

  let view = dashboard.view();
  match (view.state(), args.format) {
    (ViewState::Loaded { repo_name, model }, OutputFormat::Json) => {
      let output = ReviewOutput {
        repository: repo_name,
        pull_requests: model.pull_requests(),
        expanded: to_expand,
        dropped: model.dropped(),
      };
      let json = serde_json::to_string_pretty(&output).context("Failed to serialize review data")?;
      println!("{json}");
      Ok(())
    }
    (ViewState::Failed { repo_name, error }, _) => {
      println!("{}", render_view(view));
      Err(anyhow::anyhow!("Failed to load review data for {repo_name}: {error}"))
    }
    _ => {
      println!("{}", render_view(view));
      Ok(())
    }
  }
}

/// Pull requests whose issue lists should start expanded
fn select_expanded(model: &ReviewViewModel, requested: &[u64], all: bool) -> Vec<u64> {
  if all {
    return model
      .pull_requests()
      .iter()
      .filter(|pr| pr.has_issues())
      .map(PullRequestView::number)
      .collect();
  }

  let requested: BTreeSet<u64> = requested.iter().copied().collect();
  requested
    .into_iter()
    .filter(|number| {
      let found = model.get(*number).is_some();
      if !found {
        print_warning(&format!("Pull request #{number} is not part of this view"));
      }
      found
    })
    .collect()
}
