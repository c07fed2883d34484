//! # Configuration Management
//!
//! Handles the dashboard configuration file, the directories it lives in, and
//! environment overrides for the two remote endpoints.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable overriding the GitHub API base URL
pub const ENV_GITHUB_API_URL: &str = "REVDASH_GITHUB_API_URL";

/// Environment variable overriding the review backend base URL
pub const ENV_BACKEND_URL: &str = "REVDASH_BACKEND_URL";

/// Settings for the remote services the dashboard talks to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
  /// Base URL of the GitHub REST API
  pub github_api_url: String,
  /// Base URL of the review-analysis backend
  pub backend_url: String,
  /// `.netrc` machine name holding the GitHub token
  pub github_machine: String,
  /// Per-request timeout in seconds
  pub request_timeout_secs: u64,
}

impl Default for DashboardConfig {
  fn default() -> Self {
    Self {
      github_api_url: "https://api.github.com".to_string(),
      backend_url: "http://localhost:3000".to_string(),
      github_machine: "github.com".to_string(),
      request_timeout_secs: 30,
    }
  }
}

impl DashboardConfig {
  pub const fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout_secs)
  }

  /// Apply overrides from a lookup function (normally `std::env::var`)
  pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    if let Some(url) = lookup(ENV_GITHUB_API_URL) {
      self.github_api_url = url;
    }
    if let Some(url) = lookup(ENV_BACKEND_URL) {
      self.backend_url = url;
    }
    self.normalize()
  }

  /// Ensure both base URLs carry a scheme and no trailing root slash, and that
  /// requests get a usable timeout
  pub fn normalize(mut self) -> Result<Self> {
    if self.request_timeout_secs == 0 {
      anyhow::bail!("request_timeout_secs must be at least 1");
    }
    self.github_api_url = ensure_scheme(&self.github_api_url).context("Invalid GitHub API URL")?;
    self.backend_url = ensure_scheme(&self.backend_url).context("Invalid backend URL")?;
    Ok(self)
  }
}

/// Represents the configuration directories for the dashboard
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("", "", "revdash").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Use an explicit directory, mostly for tests
  pub fn from_dir(config_dir: impl Into<PathBuf>) -> Self {
    Self {
      config_dir: config_dir.into(),
    }
  }

  pub fn config_dir(&self) -> &Path {
    &self.config_dir
  }

  /// Get the path to the configuration file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join("config.toml")
  }

  /// Load the configuration file, or the defaults if it doesn't exist
  pub fn load_config(&self) -> Result<DashboardConfig> {
    let config_path = self.config_path();

    if config_path.exists() {
      let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

      toml::from_str(&content).with_context(|| format!("Failed to parse config from {}", config_path.display()))
    } else {
      Ok(DashboardConfig::default())
    }
  }

  /// Save the configuration file
  pub fn save_config(&self, config: &DashboardConfig) -> Result<()> {
    let config_path = self.config_path();

    fs::create_dir_all(&self.config_dir)
      .with_context(|| format!("Failed to create config directory {}", self.config_dir.display()))?;

    let content = toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    Ok(())
  }

  /// Write the default configuration unless a file already exists.
  ///
  /// Returns whether a new file was written.
  pub fn init(&self) -> Result<bool> {
    if self.config_path().exists() {
      return Ok(false);
    }
    self.save_config(&DashboardConfig::default())?;
    Ok(true)
  }
}

/// Load the effective configuration: file, then environment overrides
pub fn load_effective_config(dirs: &ConfigDirs) -> Result<DashboardConfig> {
  dirs.load_config()?.with_overrides(|key| std::env::var(key).ok())
}

/// Remove trailing slash if it's just the root path
fn normalize_url(url: &Url) -> String {
  let mut result = url.to_string();
  if result.ends_with('/') && url.path() == "/" {
    result.pop();
  }
  result
}

/// Try to parse with https:// prefix
fn parse_with_https_prefix(input: &str) -> Result<Url> {
  let with_scheme = format!("https://{input}");
  Url::parse(&with_scheme).with_context(|| format!("Failed to parse URL: '{input}'. Ensure it has a valid scheme."))
}

/// Ensure a host URL has a scheme, defaulting to https:// if none is present
pub fn ensure_scheme(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(anyhow::anyhow!("Host cannot be empty"));
  }

  let url = match Url::parse(trimmed) {
    // "localhost:3000" parses as scheme "localhost" with no host
    Ok(url) if url.host().is_some() => url,
    _ => parse_with_https_prefix(trimmed)?,
  };

  Ok(normalize_url(&url))
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_missing_config_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let dirs = ConfigDirs::from_dir(temp_dir.path().join("revdash"));

    let config = dirs.load_config().unwrap();

    assert_eq!(config, DashboardConfig::default());
    assert_eq!(config.request_timeout(), Duration::from_secs(30));
  }

  #[test]
  fn test_save_and_load_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let dirs = ConfigDirs::from_dir(temp_dir.path().join("nested").join("revdash"));
    let config = DashboardConfig {
      backend_url: "https://reviews.example.com".to_string(),
      request_timeout_secs: 5,
      ..Default::default()
    };

    dirs.save_config(&config).unwrap();

    assert!(dirs.config_path().exists());
    assert_eq!(dirs.load_config().unwrap(), config);
  }

  #[test]
  fn test_partial_config_fills_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let dirs = ConfigDirs::from_dir(temp_dir.path());
    fs::write(dirs.config_path(), "backend_url = \"http://reviews.internal:8080\"\n").unwrap();

    let config = dirs.load_config().unwrap();

    assert_eq!(config.backend_url, "http://reviews.internal:8080");
    assert_eq!(config.github_api_url, "https://api.github.com");
    assert_eq!(config.github_machine, "github.com");
  }

  #[test]
  fn test_invalid_config_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let dirs = ConfigDirs::from_dir(temp_dir.path());
    fs::write(dirs.config_path(), "request_timeout_secs = \"soon\"\n").unwrap();

    let error = dirs.load_config().unwrap_err().to_string();
    assert!(error.contains("Failed to parse config"));
  }

  #[test]
  fn test_init_does_not_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let dirs = ConfigDirs::from_dir(temp_dir.path());

    assert!(dirs.init().unwrap());
    fs::write(dirs.config_path(), "backend_url = \"http://custom\"\n").unwrap();
    assert!(!dirs.init().unwrap());
    assert_eq!(dirs.load_config().unwrap().backend_url, "http://custom");
  }

  #[test]
  fn test_env_overrides() {
    let env: HashMap<&str, &str> = HashMap::from([
      (ENV_BACKEND_URL, "reviews.example.com/"),
      (ENV_GITHUB_API_URL, "http://127.0.0.1:9000"),
    ]);

    let config = DashboardConfig::default()
      .with_overrides(|key| env.get(key).map(|value| value.to_string()))
      .unwrap();

    assert_eq!(config.backend_url, "https://reviews.example.com");
    assert_eq!(config.github_api_url, "http://127.0.0.1:9000");
  }

  #[test]
  fn test_zero_timeout_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let dirs = ConfigDirs::from_dir(temp_dir.path());
    fs::write(dirs.config_path(), "request_timeout_secs = 0\n").unwrap();

    let error = load_effective_config(&dirs).unwrap_err();
    assert!(format!("{error:#}").contains("request_timeout_secs must be at least 1"));

    fs::write(dirs.config_path(), "request_timeout_secs = 5\n").unwrap();
    let config = load_effective_config(&dirs).unwrap();
    assert_eq!(config.request_timeout(), Duration::from_secs(5));
  }

  #[test]
  fn test_ensure_scheme() {
    assert_eq!(ensure_scheme("https://api.github.com").unwrap(), "https://api.github.com");
    assert_eq!(ensure_scheme("http://localhost:3000/").unwrap(), "http://localhost:3000");
    assert_eq!(ensure_scheme("localhost:3000").unwrap(), "https://localhost:3000");
    assert_eq!(
      ensure_scheme("https://ghe.example.com/api/v3").unwrap(),
      "https://ghe.example.com/api/v3"
    );
    assert!(ensure_scheme("   ").unwrap_err().to_string().contains("Host cannot be empty"));
  }
}
