//! # Revdash Review Client
//!
//! HTTP client for the review-analysis backend. Requests carry the session's
//! token as a bearer credential; responses are normalized into
//! [`revdash_core::PullRequest`] values.

pub mod client;
pub mod consts;
pub mod endpoints;
pub mod models;

pub use client::{ReviewClient, create_review_client};
pub use models::ReviewPayload;
