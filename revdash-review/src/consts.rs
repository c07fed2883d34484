//! Constants for the revdash-review client.

/// User-Agent header value for the review backend client
pub const USER_AGENT: &str = concat!("revdash/", env!("CARGO_PKG_VERSION"));

/// Content negotiation for every backend request
pub const JSON: &str = "application/json";
