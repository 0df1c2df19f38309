//! Secret storage for the GitHub personal access token.
//!
//! The token lives under one fixed key in a `SecretStore`. The default store
//! is a JSON file readable only by the current user.

mod auth;
mod error;
mod file;
#[cfg(test)]
mod memory;

pub use auth::{AuthManager, TokenSource};
pub use error::Result;
pub use file::FileSecretStore;
#[cfg(test)]
pub use memory::MemorySecretStore;

/// Identifies one secret by service and account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialKey {
    pub service: &'static str,
    pub account: &'static str,
}

impl CredentialKey {
    /// Key the GitHub personal access token is stored under.
    pub const GITHUB_TOKEN: CredentialKey = CredentialKey {
        service: "GitHubIssueCreator",
        account: "github-pat",
    };

    pub fn id(&self) -> String {
        format!("{}/{}", self.service, self.account)
    }
}

/// Key-value store for secret strings.
pub trait SecretStore: Send + Sync {
    fn get(&self, key: &CredentialKey) -> Result<Option<String>>;

    /// Store `value` under `key`, or delete the entry when `value` is `None`.
    fn set(&self, key: &CredentialKey, value: Option<&str>) -> Result<()>;
}
