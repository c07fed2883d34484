//! # Revdash CLI Library
//!
//! Command handlers, the dashboard controller that ties the session bridge to
//! the two fetchers, and the text rendering of every view state.

pub mod cli;
pub mod completion;
pub mod context;
pub mod dashboard;
pub mod progress;
pub mod render;
