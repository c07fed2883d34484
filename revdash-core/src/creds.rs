//! # Token Discovery
//!
//! Finds an already issued GitHub token. The OAuth handshake itself happens
//! elsewhere (a browser flow, `gh auth login`, a personal access token); the
//! dashboard only picks up the result.
//!
//! Lookup order: `REVDASH_GITHUB_TOKEN`, `GITHUB_TOKEN`, then the password of
//! the matching `machine` entry in `~/.netrc`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::session::BearerToken;

/// Environment variables checked for a token, in order
pub const TOKEN_ENV_VARS: [&str; 2] = ["REVDASH_GITHUB_TOKEN", "GITHUB_TOKEN"];

/// Where a discovered token came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
  Env(&'static str),
  Netrc(PathBuf),
}

/// Returns the path to the `.netrc` file for the provided home directory.
pub fn get_netrc_path(home: &Path) -> PathBuf {
  home.join(".netrc")
}

/// Parses a `.netrc` file and returns the password for the requested machine.
///
/// Both single-line (`machine host login user password pass`) and multi-line
/// layouts are supported. A machine entry without a password yields `None`.
pub fn read_netrc_password(path: &Path, target_machine: &str) -> Result<Option<String>> {
  let file = File::open(path).context("Failed to open .netrc file")?;
  let reader = BufReader::new(file);

  let mut tokens = Vec::new();
  for line in reader.lines() {
    let line = line.context("Failed to read line from .netrc")?;
    tokens.extend(line.split_whitespace().map(str::to_string));
  }

  let mut in_target = false;
  let mut iter = tokens.iter();
  while let Some(token) = iter.next() {
    match token.as_str() {
      "machine" => {
        let machine = iter.next().map(String::as_str);
        in_target = machine == Some(target_machine);
      }
      "default" => in_target = false,
      "password" if in_target => return Ok(iter.next().cloned()),
      _ => {}
    }
  }

  Ok(None)
}

/// Discover a token from a lookup function and the given home directory
pub fn discover_token_with<F>(lookup: F, home: &Path, machine: &str) -> Result<Option<(BearerToken, TokenSource)>>
where
  F: Fn(&str) -> Option<String>,
{
  for name in TOKEN_ENV_VARS {
    if let Some(value) = lookup(name) {
      let token = BearerToken::new(value);
      if !token.is_empty() {
        debug!(source = name, "Using GitHub token from environment");
        return Ok(Some((token, TokenSource::Env(name))));
      }
    }
  }

  let netrc_path = get_netrc_path(home);
  if !netrc_path.exists() {
    return Ok(None);
  }

  let token = read_netrc_password(&netrc_path, machine)?
    .map(BearerToken::new)
    .filter(|token| !token.is_empty());

  Ok(token.map(|token| {
    debug!(path = %netrc_path.display(), "Using GitHub token from .netrc");
    (token, TokenSource::Netrc(netrc_path))
  }))
}

/// Discover a token from the process environment and `home`
pub fn discover_token(home: &Path, machine: &str) -> Result<Option<(BearerToken, TokenSource)>> {
  discover_token_with(|key| std::env::var(key).ok(), home, machine)
}
