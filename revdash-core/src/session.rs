//! # Session Bridge
//!
//! Holds the authenticated identity and its bearer token for the lifetime of
//! the process. Fetchers receive the session explicitly; nothing reads it from
//! global state, so tests can hand in synthetic sessions.

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

/// The signed-in user as presented in the header of the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
  pub name: String,
  pub avatar_url: Option<String>,
}

/// How a token is presented in the `Authorization` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenScheme {
  /// `Authorization: token <t>`, used by the GitHub REST API
  Token,
  /// `Authorization: Bearer <t>`, used by the review backend
  Bearer,
}

/// Opaque credential issued by the identity provider.
///
/// The raw value is only reachable through [`BearerToken::authorization`],
/// which the HTTP clients call while building a request. `Debug` and
/// `Display` are redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
  pub fn new(token: impl Into<String>) -> Self {
    Self(token.into().trim().to_string())
  }

  /// Whether the token holds any characters at all
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// `Authorization` header value for the given scheme.
  ///
  /// This is the one place the raw token leaves this type. Call it only while
  /// building an outgoing request, pass the result straight to the request
  /// builder, and never log, store, or render it.
  pub fn authorization(&self, scheme: TokenScheme) -> String {
    match scheme {
      TokenScheme::Token => format!("token {}", self.0),
      TokenScheme::Bearer => format!("Bearer {}", self.0),
    }
  }
}

impl fmt::Debug for BearerToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("BearerToken(<redacted>)")
  }
}

impl fmt::Display for BearerToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("<redacted>")
  }
}

/// An authenticated identity plus the token proving it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
  identity: Identity,
  token: BearerToken,
}

impl Session {
  pub const fn new(identity: Identity, token: BearerToken) -> Self {
    Self { identity, token }
  }

  pub const fn identity(&self) -> &Identity {
    &self.identity
  }

  pub const fn token(&self) -> &BearerToken {
    &self.token
  }
}

/// Owner of the current session.
///
/// An absent session is a normal state: views render a sign-in hint instead
/// of failing.
#[derive(Debug, Default)]
pub struct SessionTokenBridge {
  session: Option<Session>,
}

impl SessionTokenBridge {
  /// A bridge with no one signed in
  pub const fn new() -> Self {
    Self { session: None }
  }

  /// A bridge that starts out signed in
  pub const fn with_session(session: Session) -> Self {
    Self { session: Some(session) }
  }

  pub const fn current_session(&self) -> Option<&Session> {
    self.session.as_ref()
  }

  pub const fn is_authenticated(&self) -> bool {
    self.session.is_some()
  }

  /// Replace the current session after a successful provider handshake
  pub fn sign_in(&mut self, session: Session) {
    info!(user = %session.identity.name, "Signed in");
    self.session = Some(session);
  }

  /// Drop the session at the user's request
  pub fn sign_out(&mut self) {
    if let Some(session) = self.session.take() {
      info!(user = %session.identity.name, "Signed out");
    }
  }

  /// Drop the session because the provider denied or revoked access.
  ///
  /// There is no automatic retry; the user has to authenticate again.
  pub fn revoke(&mut self, reason: &str) {
    if let Some(session) = self.session.take() {
      warn!(user = %session.identity.name, reason, "Session revoked by provider");
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn test_session() -> Session {
    Session::new(
      Identity {
        name: "Octo Cat".to_string(),
        avatar_url: Some("https://avatars.example.com/u/1".to_string()),
      },
      BearerToken::new("gho_secret"),
    )
  }

  #[test]
  fn test_new_bridge_is_unauthenticated() {
    let bridge = SessionTokenBridge::new();
    assert!(!bridge.is_authenticated());
    assert!(bridge.current_session().is_none());
  }

  #[test]
  fn test_sign_in_and_out() {
    let mut bridge = SessionTokenBridge::new();
    bridge.sign_in(test_session());
    assert!(bridge.is_authenticated());
    assert_eq!(bridge.current_session().unwrap().identity().name, "Octo Cat");

    bridge.sign_out();
    assert!(!bridge.is_authenticated());
  }

  #[test]
  fn test_revoke_clears_session() {
    let mut bridge = SessionTokenBridge::with_session(test_session());
    bridge.revoke("Bad credentials");
    assert!(bridge.current_session().is_none());

    // Revoking an absent session is a no-op
    bridge.revoke("Bad credentials");
    assert!(!bridge.is_authenticated());
  }

  #[test]
  fn test_token_is_redacted() {
    let session = test_session();
    let debug = format!("{session:?}");
    assert!(!debug.contains("gho_secret"));
    assert!(debug.contains("<redacted>"));
    assert_eq!(session.token().to_string(), "<redacted>");
  }

  #[test]
  fn test_bridge_debug_hides_token() {
    let bridge = SessionTokenBridge::with_session(test_session());
    let debug = format!("{bridge:?}");
    assert!(debug.contains("Octo Cat"));
    assert!(!debug.contains("gho_secret"));
  }

  #[test]
  fn test_authorization_header_values() {
    let token = BearerToken::new("  abc123\n");
    assert_eq!(token.authorization(TokenScheme::Token), "token abc123");
    assert_eq!(token.authorization(TokenScheme::Bearer), "Bearer abc123");
    assert!(BearerToken::new("   ").is_empty());
  }
}
