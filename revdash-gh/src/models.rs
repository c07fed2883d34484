use revdash_core::{Identity, RepositoryOwner, RepositorySummary};
use serde::Deserialize;

/// Represents a GitHub user
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
  pub login: String,
  pub id: u64,
  pub name: Option<String>,
  pub avatar_url: Option<String>,
}

impl GitHubUser {
  /// The identity shown for this user; display name, falling back to login
  pub fn into_identity(self) -> Identity {
    let name = match self.name {
      Some(name) if !name.trim().is_empty() => name,
      _ => self.login,
    };
    Identity {
      name,
      avatar_url: self.avatar_url,
    }
  }
}

/// Owner block of a GitHub repository
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepositoryOwner {
  pub login: String,
  pub avatar_url: Option<String>,
}

/// Represents a GitHub repository as listed by `GET /user/repos`
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepository {
  pub id: u64,
  pub name: String,
  pub html_url: String,
  pub description: Option<String>,
  pub owner: GitHubRepositoryOwner,
}

impl From<GitHubRepository> for RepositorySummary {
  fn from(repo: GitHubRepository) -> Self {
    Self {
      id: repo.id,
      name: repo.name,
      url: repo.html_url,
      description: repo.description,
      owner: RepositoryOwner {
        login: repo.owner.login,
        avatar_url: repo.owner.avatar_url,
      },
    }
  }
}
