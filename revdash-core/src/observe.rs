//! # Fetch Observability
//!
//! Hook for reporting the lifecycle of every fetch (started, succeeded,
//! failed) to an operational collaborator. The default collaborator turns the
//! events into structured tracing records.

use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::error::DashboardError;

/// What a fetch is loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchTarget {
  /// The repository catalog of the signed-in identity
  Catalog,
  /// Review data for one repository
  Reviews { repo_name: String },
}

impl fmt::Display for FetchTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Catalog => f.write_str("catalog"),
      Self::Reviews { repo_name } => write!(f, "reviews:{repo_name}"),
    }
  }
}

/// Lifecycle event of a single fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEvent {
  Started {
    target: FetchTarget,
  },
  Succeeded {
    target: FetchTarget,
    duration: Duration,
    items: usize,
  },
  Failed {
    target: FetchTarget,
    duration: Duration,
    error: DashboardError,
  },
}

/// Receives fetch lifecycle events
pub trait FetchObserver {
  fn on_event(&self, event: &FetchEvent);
}

/// Forwards fetch events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl FetchObserver for TracingObserver {
  fn on_event(&self, event: &FetchEvent) {
    match event {
      FetchEvent::Started { target } => {
        info!(target_name = %target, "fetch started");
      }
      FetchEvent::Succeeded {
        target,
        duration,
        items,
      } => {
        info!(
          target_name = %target,
          duration_ms = duration.as_millis() as u64,
          items,
          "fetch succeeded"
        );
      }
      FetchEvent::Failed {
        target,
        duration,
        error,
      } => {
        warn!(
          target_name = %target,
          duration_ms = duration.as_millis() as u64,
          error = %error,
          "fetch failed"
        );
      }
    }
  }
}

/// Run a fetch and report its lifecycle to `observer`
pub async fn observe_fetch<T, F>(
  observer: &dyn FetchObserver,
  target: FetchTarget,
  fetch: F,
) -> Result<Vec<T>, DashboardError>
where
  F: Future<Output = Result<Vec<T>, DashboardError>>,
{
  observer.on_event(&FetchEvent::Started { target: target.clone() });
  let started = Instant::now();

  let result = fetch.await;
  let duration = started.elapsed();

  match &result {
    Ok(items) => observer.on_event(&FetchEvent::Succeeded {
      target,
      duration,
      items: items.len(),
    }),
    Err(error) => observer.on_event(&FetchEvent::Failed {
      target,
      duration,
      error: error.clone(),
    }),
  }

  result
}
