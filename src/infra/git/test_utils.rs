//! Test utilities for creating temporary git repositories.

use git2::Repository;
use std::path::PathBuf;
use tempfile::TempDir;

/// A temporary git repository for testing.
pub struct TempRepo {
    pub dir: TempDir,
}

impl TempRepo {
    /// Create a new temporary git repository with the given remotes.
    pub fn with_remotes(remotes: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let repo = Repository::init(dir.path()).expect("init repo");

        for (name, url) in remotes {
            repo.remote(name, url).expect("add remote");
        }

        Self { dir }
    }

    /// Get the path to the repository.
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }
}
