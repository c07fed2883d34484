//! # Repository Catalog
//!
//! Lists the repositories the signed-in identity can access. Only the first
//! page GitHub returns is used; pagination is not followed.

use revdash_core::{DashboardError, RepositorySummary, Session};
use tracing::{debug, instrument};

use crate::client::{GitHubClient, read_json, send};
use crate::models::GitHubRepository;

impl GitHubClient {
  /// Fetch the repository catalog for a session.
  ///
  /// One request per call. On any failure nothing is returned, not even the
  /// entries that did decode.
  #[instrument(skip(self, session), level = "debug")]
  pub async fn fetch_repositories(&self, session: &Session) -> Result<Vec<RepositorySummary>, DashboardError> {
    let response = send(self.get("/user/repos", session.token()), "repositories").await?;
    let repos: Vec<GitHubRepository> = read_json(response, "repositories").await?;

    debug!(count = repos.len(), "Fetched repository catalog");
    Ok(repos.into_iter().map(RepositorySummary::from).collect())
  }
}
