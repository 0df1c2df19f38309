//! Wiring shared by the commands: config, token storage, API client.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, anyhow};

use super::create::{Connector, RepoSource};
use crate::infra::git::{Git2Remotes, RepositoryRef, parse_repo};
use crate::infra::github::{GitHubClient, GitHubError, IssueApi};
use crate::infra::secret::{AuthManager, FileSecretStore};
use crate::shared::config::Config;
use crate::shared::dirs::app_config_dir;
use crate::shared::env_var::EnvVars;

pub struct AppContext {
    pub config: Config,
    pub env: EnvVars,
}

impl AppContext {
    pub fn new(config: Config, env: EnvVars) -> Self {
        Self { config, env }
    }

    /// Credentials file from the config, or the default in the config directory.
    pub fn credentials_store(&self) -> anyhow::Result<FileSecretStore> {
        if let Some(path) = &self.config.credentials.path {
            return Ok(FileSecretStore::new(path));
        }
        let dir = app_config_dir().ok_or_else(|| {
            anyhow!("Cannot determine the config directory; set HOME or XDG_CONFIG_HOME")
        })?;
        Ok(FileSecretStore::in_dir(&dir))
    }

    pub fn auth(&self) -> anyhow::Result<AuthManager> {
        let store = self.credentials_store()?;
        Ok(AuthManager::new(Box::new(store), self.env.token.clone()))
    }

    /// A configured token, or an error telling the user how to add one.
    pub fn require_token(&self) -> anyhow::Result<String> {
        self.auth()?.token()?.ok_or_else(|| {
            anyhow!(
                "No GitHub token configured. Run `ghi token set` or set {}.",
                EnvVars::token_name()
            )
        })
    }

    pub fn connector(&self) -> ApiConnector {
        ApiConnector {
            base_url: self.config.github.api_base_url.clone(),
        }
    }

    /// The repository given as `owner/repo`, or detection from the current directory.
    pub fn repo_source(&self, repo: Option<&str>) -> anyhow::Result<RepoSource> {
        match repo {
            Some(repo) => Ok(RepoSource::Explicit(parse_repo(repo)?)),
            None => {
                let cwd = std::env::current_dir().context("Failed to get current directory")?;
                Ok(RepoSource::Remotes(Box::new(Git2Remotes::new(cwd))))
            }
        }
    }
}

/// Connects to the configured API root.
pub struct ApiConnector {
    base_url: String,
}

impl ApiConnector {
    pub fn client(&self, token: &str) -> Result<GitHubClient, GitHubError> {
        GitHubClient::with_base_url(token, &self.base_url)
    }
}

impl Connector for ApiConnector {
    fn connect(&self, token: &str) -> Result<Arc<dyn IssueApi>, GitHubError> {
        Ok(Arc::new(self.client(token)?))
    }
}

/// Resolve the target repository or explain why there is none.
pub fn resolve_repository(source: &RepoSource) -> anyhow::Result<RepositoryRef> {
    source.resolve().ok_or_else(|| {
        anyhow!(
            "No GitHub repository detected. Pass --repo <owner>/<repo> \
             or run inside a clone of a GitHub repository."
        )
    })
}
