//! # Command Context
//!
//! Everything a command needs before it can fetch: a current-thread runtime,
//! both HTTP clients built from the effective configuration, and the session
//! bridge built from whatever token could be discovered.

use anyhow::{Context, Result};
use directories::BaseDirs;
use revdash_core::creds::{TokenSource, discover_token};
use revdash_core::{ConfigDirs, DashboardConfig, DashboardError, SessionTokenBridge, load_effective_config};
use revdash_gh::create_github_client;
use revdash_review::create_review_client;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info, warn};

use crate::dashboard::Dashboard;
use crate::render::render_connect_failure;

/// Create the single-threaded runtime every command runs its fetches on
pub fn create_runtime() -> Result<Runtime> {
  Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")
}

/// Load the configuration from the standard config directory
pub fn load_config() -> Result<DashboardConfig> {
  let dirs = ConfigDirs::new()?;
  load_effective_config(&dirs).with_context(|| format!("Failed to load {}", dirs.config_path().display()))
}

pub struct CommandContext {
  pub runtime: Runtime,
  pub dashboard: Dashboard,
  /// Why the session lookup failed, when GitHub could not be asked at all
  pub connect_error: Option<DashboardError>,
}

impl CommandContext {
  /// Discover a token, validate it against GitHub and build the dashboard.
  ///
  /// A missing or rejected token still yields a context; its dashboard is
  /// simply signed out. So does a session lookup that fails outright, in which
  /// case the failure is kept in `connect_error` for the command to report.
  pub fn connect() -> Result<Self> {
    let config = load_config()?;
    let runtime = create_runtime()?;

    let github = create_github_client(&config)?;
    let reviews = create_review_client(&config)?;

    let base_dirs = BaseDirs::new().context("Failed to determine the home directory")?;
    let token = match discover_token(base_dirs.home_dir(), &config.github_machine)? {
      Some((token, source)) => {
        match source {
          TokenSource::Env(name) => debug!(source = name, "Found GitHub token"),
          TokenSource::Netrc(path) => debug!(source = %path.display(), "Found GitHub token"),
        }
        Some(token)
      }
      None => None,
    };

    let (bridge, connect_error) = match runtime.block_on(revdash_gh::connect(&github, token)) {
      Ok(bridge) => (bridge, None),
      Err(error) => {
        warn!(url = %github.base_url(), error = %error, "Could not look up the GitHub session; continuing signed out");
        (SessionTokenBridge::new(), Some(error))
      }
    };
    if let Some(session) = bridge.current_session() {
      info!(user = %session.identity().name, "Connected to GitHub");
    }

    Ok(Self {
      runtime,
      dashboard: Dashboard::new(github, reviews, bridge),
      connect_error,
    })
  }

  /// Print the session lookup failure, if there was one
  pub fn report_connect_failure(&self) {
    if let Some(error) = &self.connect_error {
      println!("{}", render_connect_failure(error));
    }
  }
}
