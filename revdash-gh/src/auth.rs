//! Session establishment against GitHub.
//!
//! A token obtained elsewhere only becomes a [`Session`] once GitHub accepts
//! it and tells us who it belongs to.

use revdash_core::{BearerToken, DashboardError, Session, SessionTokenBridge};
use tracing::{info, warn};

use crate::client::GitHubClient;

/// Exchange a token for a session by looking up the authenticated user
pub async fn establish_session(client: &GitHubClient, token: BearerToken) -> Result<Session, DashboardError> {
  let user = client.get_current_user(&token).await?;
  Ok(Session::new(user.into_identity(), token))
}

/// Build the session bridge for this process.
///
/// No token, or a token GitHub rejects, yields an unauthenticated bridge
/// rather than an error. Transport failures are returned.
pub async fn connect(client: &GitHubClient, token: Option<BearerToken>) -> Result<SessionTokenBridge, DashboardError> {
  let Some(token) = token else {
    info!("No GitHub token found; continuing signed out");
    return Ok(SessionTokenBridge::new());
  };

  match establish_session(client, token).await {
    Ok(session) => {
      let mut bridge = SessionTokenBridge::new();
      bridge.sign_in(session);
      Ok(bridge)
    }
    Err(DashboardError::Auth(reason)) => {
      warn!(reason = %reason, "GitHub rejected the token; continuing signed out");
      Ok(SessionTokenBridge::new())
    }
    Err(e) => Err(e),
  }
}
