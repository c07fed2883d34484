//! # Dashboard Errors
//!
//! Error taxonomy shared by every fetch in the dashboard. Each variant maps to
//! one explicit view state, so a failed fetch never leaves stale or partial
//! data on screen.

use thiserror::Error;

/// Errors raised while fetching or decoding dashboard data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
  /// The token is missing or was rejected by the provider. Only recoverable by
  /// signing in again; never retried automatically.
  #[error("Authentication failed: {0}")]
  Auth(String),

  /// The request never produced an HTTP response (connect, TLS, timeout).
  #[error("Network error: {0}")]
  Network(String),

  /// The server answered with a non-success status.
  #[error("Request failed with HTTP {status_code}")]
  Fetch { status_code: u16 },

  /// The response did not have the structure we expected.
  #[error("Unexpected response shape: {0}")]
  DataShape(String),
}

impl DashboardError {
  /// Whether the error means the session is no longer usable
  pub const fn is_auth(&self) -> bool {
    matches!(self, Self::Auth(_))
  }

  /// HTTP status carried by the error, when there is one
  pub const fn status_code(&self) -> Option<u16> {
    match self {
      Self::Fetch { status_code } => Some(*status_code),
      _ => None,
    }
  }

  /// Message suitable for showing in place of the data that failed to load
  pub fn user_message(&self) -> String {
    match self {
      Self::Auth(_) => "Your GitHub session is no longer valid. Please reconnect your GitHub account.".to_string(),
      Self::Network(_) => "Could not reach the server. Check your connection and reload.".to_string(),
      Self::Fetch { status_code } => format!("Failed to load data (HTTP {status_code}). Please reload."),
      Self::DataShape(_) => "The server returned data in an unexpected format.".to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_auth_error_is_auth() {
    assert!(DashboardError::Auth("Bad credentials".to_string()).is_auth());
    assert!(!DashboardError::Fetch { status_code: 500 }.is_auth());
  }

  #[test]
  fn test_status_code_only_for_fetch_errors() {
    assert_eq!(DashboardError::Fetch { status_code: 502 }.status_code(), Some(502));
    assert_eq!(DashboardError::Network("timed out".to_string()).status_code(), None);
  }

  #[test]
  fn test_user_messages() {
    assert!(
      DashboardError::Auth("revoked".to_string())
        .user_message()
        .contains("reconnect")
    );
    assert!(
      DashboardError::Fetch { status_code: 503 }
        .user_message()
        .contains("HTTP 503")
    );
  }

  #[test]
  fn test_display() {
    let error = DashboardError::Fetch { status_code: 404 };
    assert_eq!(error.to_string(), "Request failed with HTTP 404");
  }
}
