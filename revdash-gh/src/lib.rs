//! # GitHub API Client
//!
//! Provides the GitHub REST integration the dashboard needs: turning a token
//! into a session and listing the repositories that session can access.

pub mod auth;
pub mod client;
pub mod consts;
pub mod endpoints;
pub mod models;

// Re-export the client
pub use auth::{connect, establish_session};
pub use client::{GitHubClient, create_github_client};
// Re-export models
pub use models::{GitHubRepository, GitHubRepositoryOwner, GitHubUser};
