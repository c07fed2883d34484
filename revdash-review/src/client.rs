use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use revdash_core::{DashboardConfig, DashboardError};
use url::Url;

/// Represents a client for the review-analysis backend
pub struct ReviewClient {
  pub(crate) client: Client,
  pub(crate) base_url: Url,
}

impl ReviewClient {
  /// Create a new backend client
  pub fn new(base_url: &str) -> Result<Self> {
    Self::with_client(base_url, Client::new())
  }

  /// Create a client whose requests give up after `timeout`
  pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
    let client = Client::builder()
      .timeout(timeout)
      .build()
      .context("Failed to build review backend HTTP client")?;
    Self::with_client(base_url, client)
  }

  fn with_client(base_url: &str, client: Client) -> Result<Self> {
    let base_url = Url::parse(base_url).with_context(|| format!("Invalid review backend URL: '{base_url}'"))?;
    if base_url.cannot_be_a_base() {
      return Err(anyhow::anyhow!("Review backend URL cannot be used as a base: '{base_url}'"));
    }
    Ok(Self { client, base_url })
  }

  pub const fn base_url(&self) -> &Url {
    &self.base_url
  }

  /// URL of the review data for one repository.
  ///
  /// The repository name is a single path segment, so `octo/app` is sent as
  /// `octo%2Fapp`.
  pub fn repository_url(&self, repo_name: &str) -> Result<Url, DashboardError> {
    let mut url = self.base_url.clone();
    let Ok(mut segments) = url.path_segments_mut() else {
      return Err(DashboardError::DataShape(format!(
        "Cannot build a request URL from '{}'",
        self.base_url
      )));
    };
    segments.pop_if_empty().extend(["api", "repositories", repo_name]);
    drop(segments);
    Ok(url)
  }
}

/// Create a backend client from the dashboard configuration
pub fn create_review_client(config: &DashboardConfig) -> Result<ReviewClient> {
  ReviewClient::with_timeout(&config.backend_url, config.request_timeout())
}
