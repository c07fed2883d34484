//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for the revdash tool.

mod browse;
mod completion;
mod config;
mod repos;
mod review;
mod whoami;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use revdash_core::output::ColorMode;

/// Top-level CLI command for the revdash tool
#[derive(Parser)]
#[command(name = "revdash")]
#[command(about = "Terminal dashboard for automated pull request reviews")]
#[command(
  long_about = "Revdash shows the automated review results recorded for your GitHub repositories.\n\n\
        It signs in with an existing GitHub token, lists the repositories you can access,\n\
        and shows each repository's pull requests with the issues the reviewer flagged."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Output format for commands that print data
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

/// Subcommands for the revdash tool
#[derive(Subcommand)]
pub enum Commands {
  /// Interactively browse repositories and their reviews
  #[command(long_about = "Browse repositories and their reviews interactively.\n\n\
            Pick a repository from your catalog, expand or collapse the issue list of\n\
            each pull request, open pull requests in the browser, and go back to\n\
            pick another repository.")]
  Browse,

  /// Generate shell completions
  #[command(long_about = "Generates shell completion scripts for revdash commands.\n\n\
            This command generates completion scripts that provide tab completion for\n\
            revdash commands and options in your shell.")]
  Completion(completion::CompletionArgs),

  /// Configuration management
  #[command(long_about = "Create or inspect the revdash configuration file.\n\n\
            The configuration holds the GitHub API and review service URLs, the .netrc\n\
            machine to read the GitHub token from, and the request timeout.")]
  #[command(arg_required_else_help = true)]
  Config(config::ConfigArgs),

  /// List the repositories you can access
  #[command(alias = "ls")]
  Repos(repos::ReposArgs),

  /// Show the reviewed pull requests of a repository
  #[command(long_about = "Show the pull requests of a repository with their automated reviews.\n\n\
            The repository can be given as a name (app), an owner/name pair, or a GitHub URL.\n\
            Pull requests are listed newest first. Issue lists are collapsed unless\n\
            requested with --expand or --expand-all.")]
  #[command(alias = "r")]
  Review(review::ReviewArgs),

  /// Show the signed-in GitHub identity
  Whoami,
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();

  match cli.command {
    Commands::Browse => browse::handle_browse_command(),
    Commands::Completion(completion) => completion::handle_completion_command(completion),
    Commands::Config(config) => config::handle_config_command(config),
    Commands::Repos(repos) => repos::handle_repos_command(repos),
    Commands::Review(review) => review::handle_review_command(review),
    Commands::Whoami => whoami::handle_whoami_command(),
  }
}
