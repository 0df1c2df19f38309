//! GitHub REST client module using reqwest.
//!
//! Provides GitHubClient for the issue endpoints, with the token supplied
//! by the caller.

mod client;
pub(crate) mod error;
#[cfg(test)]
pub mod mock;
mod models;

pub use client::{GITHUB_API_BASE, GitHubClient, IssueApi};
pub use error::{GitHubError, ValidationError};
pub use models::{IssueRequest, IssueResult, Milestone, MilestoneState};
