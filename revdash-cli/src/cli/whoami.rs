//! # Whoami Command
//!
//! Shows who the dashboard is signed in as, or how to sign in.

use anyhow::Result;

use crate::context::CommandContext;
use crate::render::{render_identity, render_sign_in_hint};

pub(super) fn handle_whoami_command() -> Result<()> {
  let context = CommandContext::connect()?;
  context.report_connect_failure();

  match context.dashboard.bridge().current_session() {
    Some(session) => println!("{}", render_identity(session.identity())),
    None => println!("{}", render_sign_in_hint()),
  }

  Ok(())
}
