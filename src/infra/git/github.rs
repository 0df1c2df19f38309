//! GitHub repository references parsed from remote URLs.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::error::{GitError, Result};

#[allow(clippy::expect_used)] // static pattern
static HTTPS_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://github\.com/([^/]+)/([^/.]+)(?:\.git)?").expect("valid regex")
});

#[allow(clippy::expect_used)] // static pattern
static SSH_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"git@github\.com:([^/]+)/([^/.]+)(?:\.git)?").expect("valid regex")
});

/// A repository on GitHub, identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Parse owner and repo from a GitHub remote URL.
///
/// Recognizes `https://github.com/{owner}/{repo}` and
/// `git@github.com:{owner}/{repo}`, each with an optional `.git` suffix.
/// The host is matched case-sensitively and the repo name stops at the first
/// `.`. Anything else is not a GitHub remote and yields `None`.
pub fn parse_github_url(url: &str) -> Option<RepositoryRef> {
    [&*HTTPS_URL_RE, &*SSH_URL_RE].into_iter().find_map(|re| {
        let captures = re.captures(url)?;
        Some(RepositoryRef::new(&captures[1], &captures[2]))
    })
}

/// Parse an "owner/repo" argument into a repository reference.
///
/// Only the first slash splits, so "org/repo/extra" becomes ("org", "repo/extra").
pub fn parse_repo(repo: &str) -> Result<RepositoryRef> {
    repo.split_once('/')
        .filter(|(owner, name)| !owner.is_empty() && !name.is_empty())
        .map(|(owner, name)| RepositoryRef::new(owner, name))
        .ok_or_else(|| {
            GitError::InvalidInput(format!(
                "Invalid repository format: {repo}. Expected owner/repo"
            ))
        })
}
