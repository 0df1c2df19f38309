//! Personal access token management on top of a secret store.

use super::error::Result;
use super::{CredentialKey, SecretStore};

/// Where the active token comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// `GHI_TOKEN` environment variable; never persisted.
    Environment,
    /// The secret store.
    Store,
}

/// Reads and writes the GitHub token.
///
/// A token from the environment wins over the stored one.
pub struct AuthManager {
    store: Box<dyn SecretStore>,
    env_token: Option<String>,
}

impl AuthManager {
    pub fn new(store: Box<dyn SecretStore>, env_token: Option<String>) -> Self {
        Self {
            store,
            env_token: env_token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn token(&self) -> Result<Option<String>> {
        Ok(self.token_with_source()?.map(|(token, _)| token))
    }

    pub fn token_source(&self) -> Result<Option<TokenSource>> {
        Ok(self.token_with_source()?.map(|(_, source)| source))
    }

    fn token_with_source(&self) -> Result<Option<(String, TokenSource)>> {
        if let Some(token) = &self.env_token {
            return Ok(Some((token.trim().to_string(), TokenSource::Environment)));
        }
        let stored = self
            .store
            .get(&CredentialKey::GITHUB_TOKEN)?
            .filter(|t| !t.trim().is_empty())
            .map(|t| (t, TokenSource::Store));
        Ok(stored)
    }

    /// Store a token. Returns `false` and stores nothing if it is blank.
    pub fn store_token(&self, token: &str) -> Result<bool> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(false);
        }
        self.store.set(&CredentialKey::GITHUB_TOKEN, Some(token))?;
        tracing::info!("GitHub token stored");
        Ok(true)
    }

    pub fn clear_token(&self) -> Result<()> {
        self.store.set(&CredentialKey::GITHUB_TOKEN, None)?;
        tracing::info!("GitHub token cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::secret::MemorySecretStore;
    use rstest::rstest;

    fn manager(store: MemorySecretStore, env: Option<&str>) -> AuthManager {
        AuthManager::new(Box::new(store), env.map(str::to_string))
    }

    #[test]
    fn no_token_anywhere() {
        let auth = manager(MemorySecretStore::default(), None);
        assert_eq!(auth.token().unwrap(), None);
        assert_eq!(auth.token().unwrap(), None);
        assert_eq!(auth.token_source().unwrap(), None);
    }

    #[test]
    fn stored_token_is_returned() {
        let auth = manager(MemorySecretStore::with_token("ghp_stored"), None);
        assert_eq!(auth.token().unwrap().as_deref(), Some("ghp_stored"));
        assert_eq!(auth.token_source().unwrap(), Some(TokenSource::Store));
    }

    #[test]
    fn environment_overrides_store() {
        let auth = manager(MemorySecretStore::with_token("ghp_stored"), Some("ghp_env"));
        assert_eq!(auth.token().unwrap().as_deref(), Some("ghp_env"));
        assert_eq!(auth.token_source().unwrap(), Some(TokenSource::Environment));
    }

    #[rstest]
    #[case::empty("")]
    #[case::spaces("   ")]
    fn blank_environment_token_is_ignored(#[case] env: &str) {
        let auth = manager(MemorySecretStore::with_token("ghp_stored"), Some(env));
        assert_eq!(auth.token_source().unwrap(), Some(TokenSource::Store));
    }

    #[test]
    fn store_token_trims() {
        let auth = manager(MemorySecretStore::default(), None);
        assert!(auth.store_token("  ghp_new \n").unwrap());
        assert_eq!(auth.token().unwrap().as_deref(), Some("ghp_new"));
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("  \t ")]
    fn store_token_ignores_blank(#[case] token: &str) {
        let auth = manager(MemorySecretStore::default(), None);
        assert!(!auth.store_token(token).unwrap());
        assert_eq!(auth.token().unwrap(), None);
    }

    #[test]
    fn clear_token_removes_stored_token() {
        let auth = manager(MemorySecretStore::with_token("ghp_stored"), None);
        auth.clear_token().unwrap();
        assert_eq!(auth.token().unwrap(), None);
    }
}
