//! # Review Data
//!
//! Fetches the review results for one repository from
//! `GET /api/repositories/{name}`.

use reqwest::StatusCode;
use revdash_core::{DashboardError, PullRequest, Session, TokenScheme};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::client::ReviewClient;
use crate::consts::{JSON, USER_AGENT};
use crate::models::ReviewPayload;

impl ReviewClient {
  /// Fetch the pull requests and reviews recorded for a repository.
  ///
  /// The list comes back in backend order; ordering is applied when the view
  /// model is built.
  #[instrument(skip(self, session), level = "debug")]
  pub async fn fetch_review_data(&self, repo_name: &str, session: &Session) -> Result<Vec<PullRequest>, DashboardError> {
    let url = self.repository_url(repo_name)?;
    debug!(url = %url, "Requesting review data");

    let response = self
      .client
      .get(url)
      .header("Accept", JSON)
      .header("Content-Type", JSON)
      .header("User-Agent", USER_AGENT)
      .header("Authorization", session.token().authorization(TokenScheme::Bearer))
      .send()
      .await
      .map_err(|e| DashboardError::Network(format!("Failed to fetch review data: {e}")))?;

    let status = response.status();
    if !status.is_success() {
      debug!(status = status.as_u16(), "Review backend request failed");
      return Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
          DashboardError::Auth("The review service rejected the access token".to_string())
        }
        _ => DashboardError::Fetch {
          status_code: status.as_u16(),
        },
      });
    }

    let body = response
      .text()
      .await
      .map_err(|e| DashboardError::Network(format!("Failed to read review data: {e}")))?;
    let body: Value = serde_json::from_str(&body)
      .map_err(|e| DashboardError::DataShape(format!("Review data is not valid JSON: {e}")))?;

    let payload = ReviewPayload::from_value(body);
    debug!(
      count = payload.pull_requests.len(),
      dropped = payload.dropped,
      "Fetched review data"
    );
    Ok(payload.pull_requests)
  }
}
