//! # Repository References
//!
//! Resolves what the user typed (or picked) into the repository name that is
//! sent to the review backend.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

static GITHUB_REPO_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"github\.com[/:]([^/\s]+)/([^/\s#?]+?)(?:\.git)?(?:[/#?].*)?$").expect("Failed to compile GitHub repo regex")
});

/// Resolve a repository reference.
///
/// Accepts:
/// - a bare name: `app`
/// - an owner/name pair, kept as is: `octo/app`
/// - a GitHub URL, resolved to the repository name the way catalog
///   navigation does: `https://github.com/octo/app`, `git@github.com:octo/app.git`
pub fn parse_repo_reference(input: &str) -> Result<String> {
  let trimmed = input.trim().trim_end_matches('/');
  if trimmed.is_empty() {
    return Err(anyhow::anyhow!("Repository name cannot be empty"));
  }

  if let Some(captures) = GITHUB_REPO_REGEX.captures(trimmed) {
    if let Some(name) = captures.get(2) {
      return Ok(name.as_str().to_string());
    }
  }

  if trimmed.contains("://") {
    return Err(anyhow::anyhow!("Could not extract a repository from URL: {trimmed}"));
  }

  if trimmed.chars().any(char::is_whitespace) {
    return Err(anyhow::anyhow!("Invalid repository name: '{trimmed}'"));
  }

  Ok(trimmed.to_string())
}
