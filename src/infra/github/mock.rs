//! wiremock-based GitHub mock server for testing.
//!
//! Provides `GitHubMockServer` for HTTP-level mocking of the issue endpoints.
//!
//! # Usage
//!
//! Use the builder pattern via `mock.repo(owner, repo)` for a fluent API:
//!
//! ```ignore
//! let mock = GitHubMockServer::start().await;
//! let ctx = mock.repo("owner", "repo");
//!
//! ctx.create_issue().created(5).await;
//! ctx.create_issue().require_headers("token").created(5).await;
//! ctx.create_issue().respond(ResponseTemplate::new(422)).await;
//! ctx.labels(&["bug"]).await;
//! ctx.milestones(&[(1, "v1.0", "open")]).await;
//! ```

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::client::GitHubClient;

pub const TEST_TOKEN: &str = "test-token";

/// Create a mock issue JSON object as returned by `POST .../issues`.
pub fn mock_issue(owner: &str, repo: &str, number: u64, title: &str) -> serde_json::Value {
    json!({
        "id": number * 1000,
        "node_id": "I_test",
        "url": format!("https://api.github.com/repos/{owner}/{repo}/issues/{number}"),
        "html_url": format!("https://github.com/{owner}/{repo}/issues/{number}"),
        "number": number,
        "state": "open",
        "title": title,
        "body": null,
        "labels": [],
        "assignees": [],
        "milestone": null,
        "locked": false,
        "comments": 0,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}

fn mock_label(owner: &str, repo: &str, name: &str) -> serde_json::Value {
    json!({
        "id": 1,
        "node_id": "LA_test",
        "url": format!("https://api.github.com/repos/{owner}/{repo}/labels/{name}"),
        "name": name,
        "color": "d73a4a",
        "default": false,
        "description": null
    })
}

fn mock_milestone(
    owner: &str,
    repo: &str,
    number: u64,
    title: &str,
    state: &str,
) -> serde_json::Value {
    json!({
        "id": number * 100,
        "node_id": "MI_test",
        "url": format!("https://api.github.com/repos/{owner}/{repo}/milestones/{number}"),
        "html_url": format!("https://github.com/{owner}/{repo}/milestone/{number}"),
        "number": number,
        "title": title,
        "state": state,
        "description": null,
        "open_issues": 0,
        "closed_issues": 0,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}

/// wiremock-based GitHub mock server for testing.
pub struct GitHubMockServer {
    server: MockServer,
}

impl GitHubMockServer {
    /// Start a new mock server.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Get a GitHubClient configured to use this mock server.
    pub fn client(&self) -> GitHubClient {
        GitHubClient::with_base_url(TEST_TOKEN, self.server.uri()).unwrap()
    }

    /// Get a client that gives up after `timeout`, for simulating slow networks.
    pub fn client_with_timeout(&self, timeout: Duration) -> GitHubClient {
        let http = reqwest::Client::builder().timeout(timeout).build().unwrap();
        GitHubClient::from_parts(http, TEST_TOKEN, self.server.uri())
    }

    /// Create a repository context for building mocks.
    pub fn repo<'a>(&'a self, owner: &'a str, repo: &'a str) -> MockRepoContext<'a> {
        MockRepoContext {
            server: &self.server,
            owner,
            repo,
        }
    }

    /// JSON bodies of every POST the server received, in order.
    pub async fn received_json_bodies(&self) -> Vec<serde_json::Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.method == wiremock::http::Method::POST)
            .map(|r| serde_json::from_slice(&r.body).unwrap())
            .collect()
    }

    /// Number of POST requests the server received.
    pub async fn post_count(&self) -> usize {
        self.received_json_bodies().await.len()
    }
}

// ============ Builder Pattern API ============

/// Repository context for building mocks.
pub struct MockRepoContext<'a> {
    server: &'a MockServer,
    owner: &'a str,
    repo: &'a str,
}

impl<'a> MockRepoContext<'a> {
    fn endpoint(&self, name: &str) -> String {
        format!("/repos/{}/{}/{name}", self.owner, self.repo)
    }

    /// Create an issue-creation mock builder.
    pub fn create_issue(&self) -> MockCreateIssueBuilder<'_> {
        MockCreateIssueBuilder {
            ctx: self,
            token: None,
        }
    }

    /// Mock GET .../labels returning the given label names.
    pub async fn labels(&self, names: &[&str]) {
        let body: Vec<_> = names
            .iter()
            .map(|n| mock_label(self.owner, self.repo, n))
            .collect();
        self.labels_response(ResponseTemplate::new(200).set_body_json(body))
            .await;
    }

    /// Mock GET .../labels with an arbitrary response.
    pub async fn labels_response(&self, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(self.endpoint("labels")))
            .respond_with(response)
            .mount(self.server)
            .await;
    }

    /// Mock GET .../milestones returning (number, title, state) entries.
    pub async fn milestones(&self, milestones: &[(u64, &str, &str)]) {
        let body: Vec<_> = milestones
            .iter()
            .map(|(number, title, state)| {
                mock_milestone(self.owner, self.repo, *number, title, state)
            })
            .collect();
        self.milestones_response(ResponseTemplate::new(200).set_body_json(body))
            .await;
    }

    /// Mock GET .../milestones with an arbitrary response.
    pub async fn milestones_response(&self, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(self.endpoint("milestones")))
            .respond_with(response)
            .mount(self.server)
            .await;
    }
}

/// Builder for `POST /repos/{owner}/{repo}/issues` mocks.
pub struct MockCreateIssueBuilder<'a> {
    ctx: &'a MockRepoContext<'a>,
    token: Option<&'a str>,
}

impl<'a> MockCreateIssueBuilder<'a> {
    /// Only match requests carrying the full set of GitHub headers for `token`.
    pub fn require_headers(mut self, token: &'a str) -> Self {
        self.token = Some(token);
        self
    }

    /// Respond with 201 and a created issue numbered `number`.
    pub async fn created(self, number: u64) {
        let body = mock_issue(self.ctx.owner, self.ctx.repo, number, "Created issue");
        self.respond(ResponseTemplate::new(201).set_body_json(body))
            .await;
    }

    /// Respond with an arbitrary response.
    pub async fn respond(self, response: ResponseTemplate) {
        let mut mock = Mock::given(method("POST")).and(path(self.ctx.endpoint("issues")));
        if let Some(token) = self.token {
            mock = mock
                .and(header("authorization", format!("Bearer {token}").as_str()))
                .and(header("accept", "application/vnd.github+json"))
                .and(header("x-github-api-version", "2022-11-28"))
                .and(header("content-type", "application/json"));
        }
        mock.respond_with(response).mount(self.ctx.server).await;
    }
}
