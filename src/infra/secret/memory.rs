use std::collections::HashMap;
use std::sync::Mutex;

use super::error::Result;
use super::{CredentialKey, SecretStore};

/// In-process secret store for tests.
#[derive(Default)]
pub struct MemorySecretStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySecretStore {
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        store
            .entries
            .lock()
            .unwrap()
            .insert(CredentialKey::GITHUB_TOKEN.id(), token.to_string());
        store
    }
}

impl SecretStore for MemorySecretStore {
    fn get(&self, key: &CredentialKey) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(&key.id()).cloned())
    }

    fn set(&self, key: &CredentialKey, value: Option<&str>) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        match value {
            Some(value) => entries.insert(key.id(), value.to_string()),
            None => entries.remove(&key.id()),
        };
        Ok(())
    }
}
