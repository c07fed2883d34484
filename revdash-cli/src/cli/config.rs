//! # Config Command
//!
//! Creates the default configuration file or prints the effective settings.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use revdash_core::ConfigDirs;
use revdash_core::output::{format_header, print_info, print_success};

use crate::context::load_config;

/// Command for configuration management
#[derive(Args)]
pub struct ConfigArgs {
  #[command(subcommand)]
  pub subcommand: ConfigSubcommands,
}

#[derive(Subcommand)]
pub enum ConfigSubcommands {
  /// Write the default configuration file if none exists
  Init,
  /// Print the effective configuration, including environment overrides
  Show,
}

pub(super) fn handle_config_command(args: ConfigArgs) -> Result<()> {
  let dirs = ConfigDirs::new()?;

  match args.subcommand {
    ConfigSubcommands::Init => {
      if dirs.init()? {
        print_success(&format!("Created {}", dirs.config_path().display()));
      } else {
        print_info(&format!("{} already exists", dirs.config_path().display()));
      }
      Ok(())
    }
    ConfigSubcommands::Show => {
      let config = load_config()?;
      let rendered = toml::to_string_pretty(&config).context("Failed to serialize configuration")?;
      println!("{}", format_header(&format!("# {}", dirs.config_path().display())));
      print!("{rendered}");
      Ok(())
    }
  }
}
