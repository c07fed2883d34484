//! # Revdash Core Library
//!
//! Shared building blocks of the review dashboard: the session bridge, the
//! provider-neutral models, the review view model, per-view state with
//! disclosure flags, configuration, and output formatting. The HTTP clients
//! in `revdash-gh` and `revdash-review` produce these types; the CLI renders
//! them.

pub mod config;
pub mod creds;
pub mod disclosure;
pub mod error;
pub mod models;
pub mod navigation;
pub mod observe;
pub mod output;
pub mod session;
pub mod view;
pub mod view_model;

// Re-export main types
pub use config::{ConfigDirs, DashboardConfig, load_effective_config};
pub use disclosure::DisclosureStateStore;
pub use error::DashboardError;
pub use models::{Issue, PullRequest, PullRequestStatus, RepositoryOwner, RepositorySummary, Review, Severity};
pub use navigation::parse_repo_reference;
pub use observe::{FetchEvent, FetchObserver, FetchTarget, TracingObserver, observe_fetch};
pub use session::{BearerToken, Identity, Session, SessionTokenBridge, TokenScheme};
pub use view::{LoadTicket, RepositoryView, ViewState};
pub use view_model::{PullRequestView, ReviewViewModel, build};
