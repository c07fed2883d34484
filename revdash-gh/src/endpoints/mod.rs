//! # GitHub API Endpoints
//!
//! Endpoint implementations grouped by resource: the authenticated user and
//! the repositories they can access.

pub mod repos;
pub mod users;
