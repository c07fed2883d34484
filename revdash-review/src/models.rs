//! Normalization of the backend's review payload.
//!
//! The backend answers `{"pull_requests": [...]}`. A missing, `null` or
//! non-array `pull_requests` means "no pull requests"; an entry that does not
//! decode is logged and dropped without failing the rest. Inside an entry, a bad
//! review issue only costs that issue.

use revdash_core::PullRequest;
use serde_json::Value;
use tracing::warn;

/// Pull requests decoded from one backend response
#[derive(Debug, Default)]
pub struct ReviewPayload {
  pub pull_requests: Vec<PullRequest>,
  /// Entries that were present but did not decode
  pub dropped: usize,
}

impl ReviewPayload {
  pub fn from_value(body: Value) -> Self {
    let entries = match body {
      Value::Object(mut map) => map.remove("pull_requests"),
      other => {
        warn!(kind = value_kind(&other), "Review payload is not an object; treating it as empty");
        None
      }
    };

    let entries = match entries {
      None | Some(Value::Null) => return Self::default(),
      Some(Value::Array(entries)) => entries,
      Some(other) => {
        warn!(kind = value_kind(&other), "pull_requests is not a list; treating it as empty");
        return Self::default();
      }
    };

    let mut payload = Self::default();
    for (index, entry) in entries.into_iter().enumerate() {
      match serde_json::from_value::<PullRequest>(entry) {
        Ok(pull_request) => payload.pull_requests.push(pull_request),
        Err(e) => {
          warn!(index, error = %e, "Dropping pull request that does not match the expected shape");
          payload.dropped += 1;
        }
      }
    }
    payload
  }
}

fn value_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}
