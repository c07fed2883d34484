//! # GitHub HTTP Client
//!
//! HTTP client implementation for GitHub API interactions, handling request
//! building, status mapping, and response parsing. The client holds no
//! credentials; every call takes the token or session it should act as.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use revdash_core::{BearerToken, DashboardConfig, DashboardError, TokenScheme};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::consts::{ACCEPT, API_BASE_URL, USER_AGENT};

/// Represents a GitHub API client
pub struct GitHubClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
}

impl Default for GitHubClient {
  fn default() -> Self {
    Self::new()
  }
}

impl GitHubClient {
  /// Create a new GitHub client for api.github.com
  pub fn new() -> Self {
    Self::with_base_url(API_BASE_URL)
  }

  /// Create a client for another API root (GitHub Enterprise, tests)
  pub fn with_base_url(base_url: &str) -> Self {
    Self {
      client: Client::new(),
      base_url: base_url.trim_end_matches('/').to_string(),
    }
  }

  /// Create a client whose requests give up after `timeout`
  pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
    let client = Client::builder()
      .timeout(timeout)
      .build()
      .context("Failed to build GitHub HTTP client")?;

    Ok(Self {
      client,
      base_url: base_url.trim_end_matches('/').to_string(),
    })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Start an authenticated GET request to an API path
  pub(crate) fn get(&self, path: &str, token: &BearerToken) -> RequestBuilder {
    self
      .client
      .get(format!("{}{}", self.base_url, path))
      .header("Accept", ACCEPT)
      .header("User-Agent", USER_AGENT)
      .header("Authorization", token.authorization(TokenScheme::Token))
  }
}

/// Create a GitHub client from the dashboard configuration
pub fn create_github_client(config: &DashboardConfig) -> Result<GitHubClient> {
  GitHubClient::with_timeout(&config.github_api_url, config.request_timeout())
}

/// Send a request, mapping transport failures to [`DashboardError::Network`]
pub(crate) async fn send(request: RequestBuilder, what: &str) -> Result<Response, DashboardError> {
  request
    .send()
    .await
    .map_err(|e| DashboardError::Network(format!("Failed to fetch {what}: {e}")))
}

/// Decode a successful response or turn the status into an error
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T, DashboardError> {
  let status = response.status();
  if !status.is_success() {
    return Err(status_error(status, response).await);
  }

  // First get the response body as text
  let body = response
    .text()
    .await
    .map_err(|e| DashboardError::Network(format!("Failed to read {what} response body: {e}")))?;

  // Then try to parse it as JSON
  serde_json::from_str::<T>(&body).map_err(|e| {
    // Try to extract the error message from the response
    match api_message(&body) {
      Some(message) => DashboardError::DataShape(format!("Failed to parse {what}: GitHub API error: {message}")),
      None => DashboardError::DataShape(format!("Failed to parse {what}: {e}")),
    }
  })
}

async fn status_error(status: StatusCode, response: Response) -> DashboardError {
  let body = response.text().await.unwrap_or_default();
  debug!(status = status.as_u16(), body = %body, "GitHub request failed");

  match status {
    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DashboardError::Auth(
      api_message(&body).unwrap_or_else(|| "GitHub rejected the access token".to_string()),
    ),
    _ => DashboardError::Fetch {
      status_code: status.as_u16(),
    },
  }
}

/// The `message` field GitHub puts in error bodies
fn api_message(body: &str) -> Option<String> {
  serde_json::from_str::<serde_json::Value>(body)
    .ok()?
    .get("message")?
    .as_str()
    .map(str::to_string)
}
