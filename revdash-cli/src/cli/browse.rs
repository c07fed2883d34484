//! # Browse Command
//!
//! Interactive loop over the dashboard: pick a repository from the catalog,
//! toggle issue lists, open pull requests in the browser, go back, quit.

use std::io::IsTerminal;

use anyhow::Result;
use console::Style;
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use revdash_core::output::{print_success, print_warning};
use revdash_core::{RepositorySummary, RepositoryView, ViewState};
use tokio::runtime::Runtime;

use crate::context::CommandContext;
use crate::dashboard::{CatalogState, Dashboard};
use crate::progress::spinner;
use crate::render::{render_catalog, render_view};

/// Something the user can do from a repository view
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
  Toggle { number: u64, expanded: bool },
  Open { number: u64, url: String },
  Reload,
  Back,
  Quit,
}

impl Action {
  fn label(&self) -> String {
    match self {
      Self::Toggle { number, expanded: true } => format!("Collapse issues of #{number}"),
      Self::Toggle {
        number,
        expanded: false,
      } => format!("Expand issues of #{number}"),
      Self::Open { number, .. } => format!("Open #{number} in browser"),
      Self::Reload => "Reload".to_string(),
      Self::Back => "Back to repositories".to_string(),
      Self::Quit => "Quit".to_string(),
    }
  }
}

#[derive(Debug, PartialEq, Eq)]
enum Next {
  Back,
  Quit,
}

fn theme() -> ColorfulTheme {
  ColorfulTheme {
    prompt_style: Style::new().cyan().bold(),
    active_item_prefix: Style::new().green().apply_to("❯ ".to_string()),
    active_item_style: Style::new().green(),
    ..ColorfulTheme::default()
  }
}

pub(super) fn handle_browse_command() -> Result<()> {
  if !std::io::stdin().is_terminal() {
    return Err(anyhow::anyhow!(
      "browse needs an interactive terminal; use `revdash review <repo>` instead"
    ));
  }

  let context = CommandContext::connect()?;
  context.report_connect_failure();
  let CommandContext {
    runtime, mut dashboard, ..
  } = context;

  let progress = spinner("Loading repositories...");
  let catalog = runtime.block_on(dashboard.load_catalog());
  progress.finish_and_clear();

  let repos = match catalog {
    CatalogState::Loaded(repos) if !repos.is_empty() => repos,
    other => {
      println!("{}", render_catalog(&other));
      return Ok(());
    }
  };

  while let Some(repo) = pick_repository(&repos)? {
    if browse_repository(&runtime, &mut dashboard, &repo.name)? == Next::Quit {
      break;
    }
  }

  Ok(())
}

fn pick_repository(repos: &[RepositorySummary]) -> Result<Option<&RepositorySummary>> {
  let mut items: Vec<String> = repos
    .iter()
    .map(|repo| format!("{} ({})", repo.name, repo.owner.login))
    .collect();
  items.push("Quit".to_string());

  let choice = Select::with_theme(&theme())
    .with_prompt("Select a repository")
    .items(&items)
    .default(0)
    .interact_opt()?;

  Ok(choice.and_then(|index| repos.get(index)))
}

fn browse_repository(runtime: &Runtime, dashboard: &mut Dashboard, repo_name: &str) -> Result<Next> {
  load(runtime, dashboard, repo_name);

  loop {
    println!("\n{}\n", render_view(dashboard.view()));

    let actions = actions_for(dashboard.view());
    let labels: Vec<String> = actions.iter().map(Action::label).collect();
    let choice = Select::with_theme(&theme())
      .with_prompt("What next?")
      .items(&labels)
      .default(0)
      .interact_opt()?;

    let Some(action) = choice.and_then(|index| actions.get(index)) else {
      return Ok(Next::Quit);
    };

    match action {
      Action::Toggle { number, .. } => dashboard.toggle(*number),
      Action::Open { url, .. } => open_in_browser(url),
      Action::Reload => load(runtime, dashboard, repo_name),
      Action::Back => return Ok(Next::Back),
      Action::Quit => return Ok(Next::Quit),
    }
  }
}

fn load(runtime: &Runtime, dashboard: &mut Dashboard, repo_name: &str) {
  let progress = spinner(&format!("Loading pull requests for {repo_name}..."));
  runtime.block_on(dashboard.open_repository(repo_name));
  progress.finish_and_clear();
}

fn open_in_browser(url: &str) {
  match open::that(url) {
    Ok(()) => print_success(&format!("Opening {url} in browser...")),
    Err(e) => print_warning(&format!("Failed to open browser to {url}: {e}")),
  }
}

/// Actions offered for the current state of a repository view
fn actions_for(view: &RepositoryView) -> Vec<Action> {
  let mut actions = Vec::new();

  match view.state() {
    ViewState::Loaded { model, .. } => {
      for pull_request in model.pull_requests().iter().filter(|pr| pr.has_issues()) {
        actions.push(Action::Toggle {
          number: pull_request.number(),
          expanded: view.is_expanded(pull_request.number()),
        });
      }
      for pull_request in model.pull_requests() {
        if !pull_request.pull_request.url.is_empty() {
          actions.push(Action::Open {
            number: pull_request.number(),
            url: pull_request.pull_request.url.clone(),
          });
        }
      }
      actions.push(Action::Reload);
    }
    ViewState::Failed { .. } => actions.push(Action::Reload),
    ViewState::Idle | ViewState::Unauthenticated | ViewState::Loading { .. } => {}
  }

  actions.push(Action::Back);
  actions.push(Action::Quit);
  actions
}
