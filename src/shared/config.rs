use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::Deserialize;

use crate::infra::github::GITHUB_API_BASE;

/// Top-level configuration for gh-issue.
#[derive(Debug, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// GitHub API settings.
    #[serde(default)]
    pub github: GitHubConfig,

    /// Token storage settings.
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Diagnostic logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// GitHub API configuration.
#[derive(Debug, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GitHubConfig {
    /// REST API root (default: "https://api.github.com").
    /// Point this at `https://<host>/api/v3` for GitHub Enterprise Server.
    #[serde(default = "default_api_base_url")]
    #[schemars(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
        }
    }
}

/// Token storage configuration.
#[derive(Debug, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CredentialsConfig {
    /// Credentials file (default: credentials.json next to this config file).
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Log filter in `tracing` EnvFilter syntax (default: "warn").
    /// The GHI_LOG environment variable takes precedence.
    #[serde(default = "default_log_level")]
    #[schemars(default = "default_log_level")]
    pub level: String,

    /// Output format of log records on stderr (default: "text").
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log record format.
#[derive(Debug, Default, Clone, Copy, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

fn default_api_base_url() -> String {
    GITHUB_API_BASE.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read config file (permission error, etc.)
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parse error
    #[error("Invalid config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },
}

/// Load configuration from ~/.config/gh-issue/config.ya?ml.
/// Returns Config::default() if no config file exists.
pub fn load_config() -> anyhow::Result<Config> {
    let Some(dir) = super::dirs::app_config_dir() else {
        return Ok(Config::default());
    };
    load_config_from_dir(&dir)
}

/// Load configuration from a specific directory.
/// Searches for config.yaml, then config.yml in the given directory.
/// Returns Config::default() if neither file exists.
pub fn load_config_from_dir(dir: &Path) -> anyhow::Result<Config> {
    for filename in &["config.yaml", "config.yml"] {
        let path = dir.join(filename);
        match std::fs::read_to_string(&path) {
            Ok(content) => return parse_config(&content, &path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(ConfigError::ReadError { path, source: e }.into()),
        }
    }

    Ok(Config::default())
}

/// Parse YAML content into Config.
fn parse_config(content: &str, path: &Path) -> anyhow::Result<Config> {
    serde_yaml::from_str(content)
        .map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
        .map_err(Into::into)
}

/// Generate JSON Schema for the Config struct.
pub fn generate_schema() -> schemars::Schema {
    schemars::schema_for!(Config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn config_default_has_expected_values() {
        let config = Config::default();

        assert_eq!(config.github.api_base_url, "https://api.github.com");
        assert_eq!(config.credentials.path, None);
        assert_eq!(config.log.level, "warn");
        assert_eq!(config.log.format, LogFormat::Text);
    }

    #[test]
    fn parse_full_yaml_config() {
        let yaml = indoc! {"
            github:
              api_base_url: https://ghe.example.com/api/v3
            credentials:
              path: /secrets/gh-issue.json
            log:
              level: debug
              format: json
        "};
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.github.api_base_url, "https://ghe.example.com/api/v3");
        assert_eq!(
            config.credentials.path,
            Some(PathBuf::from("/secrets/gh-issue.json"))
        );
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn parse_partial_yaml_uses_defaults() {
        let yaml = "log:\n  level: info\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.log.level, "info");
        assert_eq!(config.github, GitHubConfig::default());
        assert_eq!(config.credentials, CredentialsConfig::default());
    }

    #[test]
    fn parse_empty_yaml_uses_all_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[rstest]
    #[case::top_level("unknown: true\n")]
    #[case::nested("github:\n  token: nope\n")]
    fn unknown_fields_are_rejected(#[case] yaml: &str) {
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }

    #[rstest]
    #[case::yaml("config.yaml")]
    #[case::yml("config.yml")]
    fn load_config_from_dir_reads_either_extension(#[case] filename: &str) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(filename), "log:\n  level: trace\n").unwrap();

        let config = load_config_from_dir(dir.path()).unwrap();
        assert_eq!(config.log.level, "trace");
    }

    #[test]
    fn load_config_from_dir_yaml_takes_precedence_over_yml() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.yaml"), "log:\n  level: info\n").unwrap();
        fs::write(dir.path().join("config.yml"), "log:\n  level: error\n").unwrap();

        let config = load_config_from_dir(dir.path()).unwrap();
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn load_config_from_dir_no_file_returns_default() {
        let dir = TempDir::new().unwrap();
        let config = load_config_from_dir(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_config_from_dir_parse_error_includes_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "github:\n  - [broken\n").unwrap();

        let err = load_config_from_dir(dir.path()).unwrap_err();
        let config_err = err.downcast_ref::<ConfigError>().unwrap();
        match config_err {
            ConfigError::ParseError {
                path: err_path,
                message,
            } => {
                assert_eq!(err_path, &path);
                assert!(!message.is_empty(), "error message should not be empty");
            }
            other => panic!("expected ParseError, got: {other:?}"),
        }
    }

    #[test]
    fn load_config_uses_xdg_config_home() {
        let dir = TempDir::new().unwrap();
        let app_dir = dir.path().join("gh-issue");
        fs::create_dir_all(&app_dir).unwrap();
        fs::write(app_dir.join("config.yaml"), "log:\n  level: debug\n").unwrap();

        temp_env::with_vars([("XDG_CONFIG_HOME", Some(dir.path()))], || {
            let config = load_config().unwrap();
            assert_eq!(config.log.level, "debug");
        });
    }

    #[test]
    fn generate_schema_contains_default_values() {
        let schema = generate_schema();
        let value: serde_json::Value = serde_json::to_value(&schema).unwrap();

        assert_eq!(value["title"], "Config");
        let defs = &value["$defs"];
        assert_eq!(
            defs["GitHubConfig"]["properties"]["api_base_url"]["default"],
            "https://api.github.com"
        );
        assert_eq!(defs["LogConfig"]["properties"]["level"]["default"], "warn");
    }
}
