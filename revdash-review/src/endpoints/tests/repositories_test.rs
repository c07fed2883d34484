use revdash_core::{BearerToken, DashboardError, Identity, PullRequestStatus, Session};
use revdash_test_utils::fixtures;
use revdash_test_utils::mock::mount_json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::client::ReviewClient;

fn test_session(token: &str) -> Session {
  Session::new(
    Identity {
      name: "Test User".to_string(),
      avatar_url: None,
    },
    BearerToken::new(token),
  )
}

#[tokio::test]
async fn test_fetch_review_data() -> anyhow::Result<()> {
  let mock_server = MockServer::start().await;
  let client = ReviewClient::new(&mock_server.uri())?;

  Mock::given(method("GET"))
    .and(path("/api/repositories/app"))
    .and(header("Accept", "application/json"))
    .and(header("Content-Type", "application/json"))
    .and(header("Authorization", "Bearer test_token"))
    .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::review_payload(vec![
      fixtures::with_issues(
        fixtures::pull_request(1, "2024-01-01T00:00:00Z"),
        vec![fixtures::issue("high", "src/a.rs", 10, "Unchecked index")],
      ),
      fixtures::merged_pull_request(2, "2024-01-02T00:00:00Z", "2024-01-03T00:00:00Z"),
    ])))
    .expect(1)
    .mount(&mock_server)
    .await;

  let pull_requests = client.fetch_review_data("app", &test_session("test_token")).await?;

  // Backend order is preserved here
  assert_eq!(pull_requests.len(), 2);
  assert_eq!(pull_requests[0].number, 1);
  assert_eq!(pull_requests[0].review.issues.len(), 1);
  assert_eq!(pull_requests[1].status, PullRequestStatus::Merged);
  assert_eq!(pull_requests[1].merged_at.as_deref(), Some("2024-01-03T00:00:00Z"));

  Ok(())
}

#[tokio::test]
async fn test_repository_name_is_one_segment() -> anyhow::Result<()> {
  let mock_server = MockServer::start().await;
  let client = ReviewClient::new(&mock_server.uri())?;

  Mock::given(method("GET"))
    .and(path("/api/repositories/octo%2Fapp"))
    .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::review_payload(vec![])))
    .expect(1)
    .mount(&mock_server)
    .await;

  let pull_requests = client.fetch_review_data("octo/app", &test_session("t")).await?;
  assert!(pull_requests.is_empty());

  Ok(())
}

#[tokio::test]
async fn test_missing_list_is_empty() -> anyhow::Result<()> {
  let mock_server = MockServer::start().await;
  let client = ReviewClient::new(&mock_server.uri())?;
  mount_json(&mock_server, "/api/repositories/app", 200, serde_json::json!({})).await;

  let pull_requests = client.fetch_review_data("app", &test_session("t")).await?;
  assert!(pull_requests.is_empty());

  Ok(())
}

#[tokio::test]
async fn test_null_list_is_empty() -> anyhow::Result<()> {
  let mock_server = MockServer::start().await;
  let client = ReviewClient::new(&mock_server.uri())?;
  mount_json(
    &mock_server,
    "/api/repositories/app",
    200,
    serde_json::json!({ "pull_requests": null }),
  )
  .await;

  let pull_requests = client.fetch_review_data("app", &test_session("t")).await?;
  assert!(pull_requests.is_empty());

  Ok(())
}

#[tokio::test]
async fn test_malformed_entry_is_dropped() -> anyhow::Result<()> {
  let mock_server = MockServer::start().await;
  let client = ReviewClient::new(&mock_server.uri())?;
  mount_json(
    &mock_server,
    "/api/repositories/app",
    200,
    fixtures::review_payload(vec![
      serde_json::json!({ "title": "no number" }),
      fixtures::pull_request(5, "2024-02-01T00:00:00Z"),
    ]),
  )
  .await;

  let pull_requests = client.fetch_review_data("app", &test_session("t")).await?;
  assert_eq!(pull_requests.len(), 1);
  assert_eq!(pull_requests[0].number, 5);

  Ok(())
}

#[tokio::test]
async fn test_unauthorized() -> anyhow::Result<()> {
  let mock_server = MockServer::start().await;
  let client = ReviewClient::new(&mock_server.uri())?;
  mount_json(
    &mock_server,
    "/api/repositories/app",
    401,
    serde_json::json!({ "error": "expired" }),
  )
  .await;

  let result = client.fetch_review_data("app", &test_session("stale")).await;
  assert!(matches!(result, Err(DashboardError::Auth(_))));

  Ok(())
}

#[tokio::test]
async fn test_server_error() -> anyhow::Result<()> {
  let mock_server = MockServer::start().await;
  let client = ReviewClient::new(&mock_server.uri())?;

  Mock::given(method("GET"))
    .and(path("/api/repositories/app"))
    .respond_with(ResponseTemplate::new(500))
    .mount(&mock_server)
    .await;

  let result = client.fetch_review_data("app", &test_session("t")).await;
  match result {
    Err(DashboardError::Fetch { status_code }) => assert_eq!(status_code, 500),
    other => panic!("Expected a fetch error, got {other:?}"),
  }

  Ok(())
}

#[tokio::test]
async fn test_invalid_json() -> anyhow::Result<()> {
  let mock_server = MockServer::start().await;
  let client = ReviewClient::new(&mock_server.uri())?;

  Mock::given(method("GET"))
    .and(path("/api/repositories/app"))
    .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
    .mount(&mock_server)
    .await;

  let result = client.fetch_review_data("app", &test_session("t")).await;
  assert!(matches!(result, Err(DashboardError::DataShape(_))));

  Ok(())
}

#[tokio::test]
async fn test_network_error() -> anyhow::Result<()> {
  let client = ReviewClient::new("http://127.0.0.1:1")?;

  let result = client.fetch_review_data("app", &test_session("t")).await;
  assert!(matches!(result, Err(DashboardError::Network(_))));

  Ok(())
}
