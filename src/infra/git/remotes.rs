//! Remote listing and GitHub repository detection.

use std::path::{Path, PathBuf};

use git2::{ErrorCode, Repository, RepositoryOpenFlags};

use super::error::Result;
use super::github::{RepositoryRef, parse_github_url};

/// Remote preferred over all others when detecting the repository.
const PREFERRED_REMOTE: &str = "origin";

/// A named remote recorded in the repository configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub name: String,
    pub url: Option<String>,
}

impl Remote {
    #[cfg(test)]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: Some(url.into()),
        }
    }
}

/// Source of the remotes of the repository being worked on.
pub trait RemoteSource {
    fn remotes(&self) -> Result<Vec<Remote>>;
}

/// Reads remotes through libgit2 from the repository containing a directory.
pub struct Git2Remotes {
    start: PathBuf,
}

impl Git2Remotes {
    /// Look for the repository at `start` or any of its parents.
    pub fn new(start: impl Into<PathBuf>) -> Self {
        Self {
            start: start.into(),
        }
    }

    fn open(&self) -> Result<Option<Repository>> {
        match Repository::open_ext(
            &self.start,
            RepositoryOpenFlags::empty(),
            std::iter::empty::<&Path>(),
        ) {
            Ok(repo) => Ok(Some(repo)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl RemoteSource for Git2Remotes {
    /// Outside of a repository there are simply no remotes.
    fn remotes(&self) -> Result<Vec<Remote>> {
        let Some(repo) = self.open()? else {
            tracing::debug!(path = %self.start.display(), "not inside a git repository");
            return Ok(Vec::new());
        };

        let names = repo.remotes()?;
        let mut remotes = Vec::with_capacity(names.len());
        for name in names.iter().flatten() {
            let remote = repo.find_remote(name)?;
            remotes.push(Remote {
                name: name.to_string(),
                url: remote.url().map(str::to_string),
            });
        }
        Ok(remotes)
    }
}

/// Pick the GitHub repository the remotes point at.
///
/// Uses `origin` when present, otherwise the first remote. Only that one
/// remote is considered: if its URL is missing or not a GitHub URL the
/// result is `None`, even when a later remote would parse.
pub fn detect_repository(remotes: &[Remote]) -> Option<RepositoryRef> {
    let remote = remotes
        .iter()
        .find(|r| r.name == PREFERRED_REMOTE)
        .or_else(|| remotes.first())?;
    let url = remote.url.as_deref()?;

    let repo = parse_github_url(url);
    if repo.is_none() {
        tracing::debug!(remote = %remote.name, url, "remote does not point at GitHub");
    }
    repo
}
