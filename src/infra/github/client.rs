//! GitHub REST client for the issue endpoints.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::error::{GitHubError, Result};
use super::models::{IssueRequest, IssueResult, Label, Milestone};
use crate::infra::git::RepositoryRef;

pub const GITHUB_API_BASE: &str = "https://api.github.com";

const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";
const GITHUB_JSON: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Characters escaped when owner or repo are used as a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Error body returned by the GitHub API.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

/// Issue operations against one GitHub API endpoint.
#[async_trait::async_trait]
pub trait IssueApi: Send + Sync {
    /// Create an issue. Only HTTP 201 counts as success.
    async fn create_issue(
        &self,
        repo: &RepositoryRef,
        request: &IssueRequest,
    ) -> Result<IssueResult>;

    /// Label names of the repository. Empty on any failure.
    async fn list_labels(&self, repo: &RepositoryRef) -> Vec<String>;

    /// Milestones of the repository. Empty on any failure.
    async fn list_milestones(&self, repo: &RepositoryRef) -> Vec<Milestone>;
}

/// Production implementation using reqwest.
///
/// Idle connections are not kept, so every call releases its connection
/// when it finishes.
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl GitHubClient {
    /// Create a client for another API root (GitHub Enterprise, mock servers).
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(GitHubError::ClientBuild)?;
        Ok(Self::from_parts(http, token, base_url))
    }

    pub(crate) fn from_parts(
        http: reqwest::Client,
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn repo_url(&self, repo: &RepositoryRef, endpoint: &str) -> String {
        format!(
            "{}/repos/{}/{}/{endpoint}",
            self.base_url,
            utf8_percent_encode(&repo.owner, PATH_SEGMENT),
            utf8_percent_encode(&repo.name, PATH_SEGMENT),
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_JSON)
            .header(API_VERSION_HEADER, API_VERSION)
    }

    /// GET a JSON array; anything but HTTP 200 is an error.
    async fn get_list<T: DeserializeOwned>(
        &self,
        repo: &RepositoryRef,
        endpoint: &str,
    ) -> Result<Vec<T>> {
        let url = self.repo_url(repo, endpoint);
        let response = self.request(Method::GET, &url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status != StatusCode::OK {
            return Err(GitHubError::Api {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait::async_trait]
impl IssueApi for GitHubClient {
    async fn create_issue(
        &self,
        repo: &RepositoryRef,
        request: &IssueRequest,
    ) -> Result<IssueResult> {
        let url = self.repo_url(repo, "issues");
        tracing::debug!(%repo, title = request.title(), "creating issue");

        let response = self.request(Method::POST, &url).json(request).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status != StatusCode::CREATED {
            tracing::debug!(%repo, status = status.as_u16(), "issue creation rejected");
            return Err(GitHubError::Api {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        let issue: IssueResult = serde_json::from_str(&text)?;
        tracing::info!(%repo, number = issue.number, "issue created");
        Ok(issue)
    }

    async fn list_labels(&self, repo: &RepositoryRef) -> Vec<String> {
        match self.get_list::<Label>(repo, "labels").await {
            Ok(labels) => labels.into_iter().map(|l| l.name).collect(),
            Err(e) => {
                tracing::warn!(%repo, error = %e, "failed to fetch labels");
                Vec::new()
            }
        }
    }

    async fn list_milestones(&self, repo: &RepositoryRef) -> Vec<Milestone> {
        match self.get_list::<Milestone>(repo, "milestones").await {
            Ok(milestones) => milestones,
            Err(e) => {
                tracing::warn!(%repo, error = %e, "failed to fetch milestones");
                Vec::new()
            }
        }
    }
}

/// Extract the API's `message` from an error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    if body.trim().is_empty() {
        return "Unknown error".to_string();
    }
    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.to_string())
}
