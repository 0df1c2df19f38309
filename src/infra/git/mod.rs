//! Git operations using git2 (libgit2).
//!
//! Reads the remotes of the working tree and turns a GitHub remote URL into
//! a repository reference without spawning external git processes.

mod error;
mod github;
mod remotes;
#[cfg(test)]
pub mod test_utils;

pub use error::{GitError, Result};
pub use github::{RepositoryRef, parse_repo};
pub use remotes::{Git2Remotes, Remote, RemoteSource, detect_repository};
