//! File-backed secret store.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::error::{Result, SecretStoreError};
use super::{CredentialKey, SecretStore};

pub const CREDENTIALS_FILE: &str = "credentials.json";

/// Stores secrets as a JSON object in a single file.
///
/// The file is replaced atomically on every write and is created with
/// owner-only permissions on Unix.
pub struct FileSecretStore {
    path: PathBuf,
}

impl FileSecretStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in `credentials.json` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(CREDENTIALS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(SecretStoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| SecretStoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let write_error = |source| SecretStoreError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir).map_err(write_error)?;

        // NamedTempFile is created with mode 0600, and persist() keeps it.
        let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_error)?;
        let json = serde_json::to_string_pretty(entries).map_err(|e| write_error(e.into()))?;
        file.write_all(json.as_bytes()).map_err(write_error)?;
        file.persist(&self.path)
            .map_err(|e| write_error(e.error))?;
        Ok(())
    }
}

impl SecretStore for FileSecretStore {
    fn get(&self, key: &CredentialKey) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(&key.id()))
    }

    fn set(&self, key: &CredentialKey, value: Option<&str>) -> Result<()> {
        let mut entries = self.read_entries()?;
        match value {
            Some(value) => {
                entries.insert(key.id(), value.to_string());
            }
            None => {
                if entries.remove(&key.id()).is_none() {
                    return Ok(());
                }
            }
        }
        tracing::debug!(path = %self.path.display(), key = %key.id(), "updating credentials file");
        self.write_entries(&entries)
    }
}
