//! Centralized reader for GHI_* environment variables.
//!
//! Environment variable names are defined as private constants here;
//! external code accesses values through the `EnvVars` struct.

const TOKEN: &str = "GHI_TOKEN";
const LOG: &str = "GHI_LOG";

/// Snapshot of all GHI_* environment variables at load time.
#[derive(Debug, Default)]
pub struct EnvVars {
    /// GitHub token that overrides the stored one for this process.
    pub token: Option<String>,

    /// Log filter in EnvFilter syntax, overriding the config file.
    pub log: Option<String>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

impl EnvVars {
    /// Read all GHI_* environment variables from the current process.
    pub fn load() -> Self {
        Self {
            token: non_empty_var(TOKEN),
            log: non_empty_var(LOG),
        }
    }

    /// Returns the env var name for TOKEN (used in user-facing hints).
    pub fn token_name() -> &'static str {
        TOKEN
    }
}
