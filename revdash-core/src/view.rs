//! # Repository View State
//!
//! State machine for a single repository view:
//!
//! ```text
//! Idle -> Loading(repo) -> Loaded(repo, data)
//!                       \-> Failed(repo, error)
//! ```
//!
//! Every call to [`RepositoryView::navigate`] hands out a [`LoadTicket`].
//! A fetch result is only applied if its ticket is still current, so a slow
//! response for a repository the user already left can never overwrite the
//! newer view.

use tracing::{debug, warn};

use crate::disclosure::DisclosureStateStore;
use crate::error::DashboardError;
use crate::models::PullRequest;
use crate::view_model::{self, ReviewViewModel};

/// What the repository view currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
  /// Nothing requested yet
  #[default]
  Idle,
  /// No session; the view asks the user to sign in
  Unauthenticated,
  Loading {
    repo_name: String,
  },
  Loaded {
    repo_name: String,
    model: ReviewViewModel,
  },
  Failed {
    repo_name: String,
    error: DashboardError,
  },
}

impl ViewState {
  /// Repository this state belongs to, if any
  pub fn repo_name(&self) -> Option<&str> {
    match self {
      Self::Loading { repo_name } | Self::Loaded { repo_name, .. } | Self::Failed { repo_name, .. } => Some(repo_name),
      Self::Idle | Self::Unauthenticated => None,
    }
  }

  pub const fn is_loading(&self) -> bool {
    matches!(self, Self::Loading { .. })
  }
}

/// Correlates a fetch result with the navigation that started it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
  generation: u64,
  repo_name: String,
}

impl LoadTicket {
  pub fn repo_name(&self) -> &str {
    &self.repo_name
  }
}

/// State, disclosure flags and staleness guard for one repository view
#[derive(Debug, Default)]
pub struct RepositoryView {
  state: ViewState,
  generation: u64,
  disclosure: DisclosureStateStore,
}

impl RepositoryView {
  pub fn new() -> Self {
    Self::default()
  }

  pub const fn state(&self) -> &ViewState {
    &self.state
  }

  pub const fn disclosure(&self) -> &DisclosureStateStore {
    &self.disclosure
  }

  /// Start viewing a repository.
  ///
  /// Enters `Loading`, invalidates any ticket handed out earlier and collapses
  /// all issue lists. Expansion state is never carried across navigations,
  /// even when returning to the same repository.
  pub fn navigate(&mut self, repo_name: &str) -> LoadTicket {
    self.generation += 1;
    self.disclosure.reset();
    self.state = ViewState::Loading {
      repo_name: repo_name.to_string(),
    };
    debug!(repo = repo_name, generation = self.generation, "Loading repository view");

    LoadTicket {
      generation: self.generation,
      repo_name: repo_name.to_string(),
    }
  }

  /// Show the sign-in state and drop any fetch still in flight
  pub fn require_sign_in(&mut self) {
    self.generation += 1;
    self.disclosure.reset();
    self.state = ViewState::Unauthenticated;
  }

  /// Apply the outcome of the fetch started by `ticket`.
  ///
  /// Returns `false` and leaves the view untouched when the ticket is stale.
  /// Failures replace whatever was shown before; disclosure state is not
  /// modified either way.
  pub fn complete(&mut self, ticket: LoadTicket, result: Result<Vec<PullRequest>, DashboardError>) -> bool {
    if ticket.generation != self.generation {
      debug!(
        repo = %ticket.repo_name,
        ticket = ticket.generation,
        current = self.generation,
        "Discarding stale fetch result"
      );
      return false;
    }

    self.state = match result {
      Ok(pull_requests) => ViewState::Loaded {
        model: view_model::build(&pull_requests),
        repo_name: ticket.repo_name,
      },
      Err(error) => {
        warn!(repo = %ticket.repo_name, error = %error, "Repository view failed to load");
        ViewState::Failed {
          repo_name: ticket.repo_name,
          error,
        }
      }
    };
    true
  }

  /// Flip the issue list of a pull request
  pub fn toggle(&mut self, pr_number: u64) {
    self.disclosure.toggle(pr_number);
  }

  pub fn is_expanded(&self, pr_number: u64) -> bool {
    self.disclosure.is_expanded(pr_number)
  }
}
