//! Helpers around `wiremock` shared by the client and CLI tests

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mount a `GET` that answers with a JSON body and the given status
pub async fn mount_json(server: &MockServer, route: &str, status: u16, body: Value) {
  Mock::given(method("GET"))
    .and(path(route))
    .respond_with(ResponseTemplate::new(status).set_body_json(body))
    .mount(server)
    .await;
}

/// Mount a `GET` that must be hit exactly `times` times
pub async fn mount_json_expecting(server: &MockServer, route: &str, body: Value, times: u64) {
  Mock::given(method("GET"))
    .and(path(route))
    .respond_with(ResponseTemplate::new(200).set_body_json(body))
    .expect(times)
    .mount(server)
    .await;
}
