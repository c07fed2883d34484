//! # Dashboard Controller
//!
//! Ties the session bridge to the catalog and review fetchers. Every fetch
//! goes through [`observe_fetch`] and ends in an explicit state: a failed
//! fetch is never surfaced as a bare error, and an authentication failure
//! also revokes the session.

use revdash_core::{
  DashboardError, FetchObserver, FetchTarget, RepositorySummary, RepositoryView, SessionTokenBridge, TracingObserver,
  ViewState, observe_fetch,
};
use revdash_gh::GitHubClient;
use revdash_review::ReviewClient;
use tracing::debug;

/// Outcome of loading the repository catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogState {
  /// No session; the user has to connect GitHub first
  Unauthenticated,
  Loaded(Vec<RepositorySummary>),
  Failed(DashboardError),
}

/// The signed-in dashboard: catalog plus one repository view
pub struct Dashboard {
  github: GitHubClient,
  reviews: ReviewClient,
  bridge: SessionTokenBridge,
  view: RepositoryView,
  observer: Box<dyn FetchObserver>,
}

impl Dashboard {
  pub fn new(github: GitHubClient, reviews: ReviewClient, bridge: SessionTokenBridge) -> Self {
    Self {
      github,
      reviews,
      bridge,
      view: RepositoryView::new(),
      observer: Box::new(TracingObserver),
    }
  }

  /// Replace the collaborator that receives fetch events
  pub fn with_observer(mut self, observer: Box<dyn FetchObserver>) -> Self {
    self.observer = observer;
    self
  }

  pub const fn bridge(&self) -> &SessionTokenBridge {
    &self.bridge
  }

  pub const fn view(&self) -> &RepositoryView {
    &self.view
  }

  pub fn toggle(&mut self, pr_number: u64) {
    self.view.toggle(pr_number);
  }

  /// Fetch the repositories the signed-in identity can access
  pub async fn load_catalog(&mut self) -> CatalogState {
    let Some(session) = self.bridge.current_session() else {
      return CatalogState::Unauthenticated;
    };

    let result = observe_fetch(
      self.observer.as_ref(),
      FetchTarget::Catalog,
      self.github.fetch_repositories(session),
    )
    .await;

    match result {
      Ok(repos) => CatalogState::Loaded(repos),
      Err(error) => {
        if error.is_auth() {
          self.bridge.revoke("GitHub rejected the token while listing repositories");
        }
        CatalogState::Failed(error)
      }
    }
  }

  /// Navigate the repository view to `repo_name` and load its review data
  pub async fn open_repository(&mut self, repo_name: &str) -> &ViewState {
    let Some(session) = self.bridge.current_session() else {
      self.view.require_sign_in();
      return self.view.state();
    };

    let ticket = self.view.navigate(repo_name);
    let result = observe_fetch(
      self.observer.as_ref(),
      FetchTarget::Reviews {
        repo_name: repo_name.to_string(),
      },
      self.reviews.fetch_review_data(repo_name, session),
    )
    .await;

    let auth_failed = matches!(&result, Err(error) if error.is_auth());
    if !self.view.complete(ticket, result) {
      debug!(repo = repo_name, "Review data arrived for a view that moved on");
    }
    if auth_failed {
      self.bridge.revoke("The review service rejected the token");
    }

    self.view.state()
  }
}
