//! Test utilities shared across the revdash workspace
//!
//! This crate provides common testing infrastructure including:
//! - JSON payload builders for both remote APIs ([`fixtures`])
//! - Isolated home directories with optional `.netrc` files ([`NetrcGuard`], [`TestHome`])
//! - Mock server helpers ([`mock`])
//!
//! It deliberately does not depend on `revdash-core`, so core can use it as a
//! dev-dependency without ending up with two copies of its own types.

#![allow(dead_code)]

pub mod fixtures;
pub mod home;
pub mod mock;
pub mod netrc;

// Re-export commonly used items
pub use home::TestHome;
pub use netrc::NetrcGuard;
