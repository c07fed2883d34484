//! # Repos Command
//!
//! Lists the repositories the signed-in identity can access.

use anyhow::{Context, Result};
use clap::Args;

use super::OutputFormat;
use crate::context::CommandContext;
use crate::dashboard::CatalogState;
use crate::progress::spinner;
use crate::render::render_catalog;

/// Command for listing repositories
#[derive(Args)]
pub struct ReposArgs {
  /// Output format
  #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Text)]
  pub format: OutputFormat,
}

pub(super) fn handle_repos_command(args: ReposArgs) -> Result<()> {
  let context = CommandContext::connect()?;
  context.report_connect_failure();
  let CommandContext {
    runtime, mut dashboard, ..
  } = context;

  let progress = spinner("Loading repositories...");
  let state = runtime.block_on(dashboard.load_catalog());
  progress.finish_and_clear();

  match (&state, args.format) {
    (CatalogState::Loaded(repos), OutputFormat::Json) => {
      let json = serde_json::to_string_pretty(repos).context("Failed to serialize repositories")?;
      println!("{json}");
      Ok(())
    }
    (CatalogState::Failed(error), _) => {
      println!("{}", render_catalog(&state));
      Err(anyhow::anyhow!("Failed to load repositories: {error}"))
    }
    _ => {
      println!("{}", render_catalog(&state));
      Ok(())
    }
  }
}
