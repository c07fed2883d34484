//! JSON payload builders for the GitHub API and the review backend

use serde_json::{Value, json};

/// `GET /user` response
pub fn github_user(login: &str, name: Option<&str>) -> Value {
  json!({
      "login": login,
      "id": 1,
      "name": name,
      "avatar_url": format!("https://avatars.githubusercontent.com/{login}"),
      "html_url": format!("https://github.com/{login}")
  })
}

/// One entry of a `GET /user/repos` response
pub fn github_repository(id: u64, owner: &str, name: &str, description: Option<&str>) -> Value {
  json!({
      "id": id,
      "name": name,
      "full_name": format!("{owner}/{name}"),
      "html_url": format!("https://github.com/{owner}/{name}"),
      "description": description,
      "private": false,
      "owner": {
          "login": owner,
          "id": 1,
          "avatar_url": format!("https://avatars.githubusercontent.com/{owner}")
      }
  })
}

/// An open pull request with an empty review
pub fn pull_request(number: u64, created_at: &str) -> Value {
  json!({
      "number": number,
      "title": format!("Pull request {number}"),
      "description": format!("Description of pull request {number}"),
      "status": "open",
      "created_at": created_at,
      "merged_at": null,
      "url": format!("https://github.com/octo/app/pull/{number}"),
      "review": {
          "content": "No major concerns.",
          "status": "completed",
          "issues": []
      }
  })
}

/// A merged pull request
pub fn merged_pull_request(number: u64, created_at: &str, merged_at: &str) -> Value {
  let mut pr = pull_request(number, created_at);
  pr["status"] = json!("merged");
  pr["merged_at"] = json!(merged_at);
  pr
}

/// A review issue
pub fn issue(severity: &str, file_path: &str, line_number: u64, description: &str) -> Value {
  json!({
      "category": "correctness",
      "severity": severity,
      "description": description,
      "file_path": file_path,
      "line_number": line_number
  })
}

/// Attach issues to a pull request built by [`pull_request`]
pub fn with_issues(mut pull_request: Value, issues: Vec<Value>) -> Value {
  pull_request["review"]["issues"] = Value::Array(issues);
  pull_request
}

/// Backend response body for `GET /api/repositories/{name}`
pub fn review_payload(pull_requests: Vec<Value>) -> Value {
  json!({ "pull_requests": pull_requests })
}
