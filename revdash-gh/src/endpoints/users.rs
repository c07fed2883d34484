use revdash_core::{BearerToken, DashboardError};
use tracing::instrument;

use crate::client::{GitHubClient, read_json, send};
use crate::models::GitHubUser;

impl GitHubClient {
  /// Get the user the token belongs to
  #[instrument(skip(self, token), level = "debug")]
  pub async fn get_current_user(&self, token: &BearerToken) -> Result<GitHubUser, DashboardError> {
    let response = send(self.get("/user", token), "GitHub user").await?;
    read_json(response, "GitHub user").await
  }
}
