//! Diagnostic logging to stderr via tracing-subscriber.

use tracing_subscriber::EnvFilter;

use super::config::{LogConfig, LogFormat};

const FALLBACK_FILTER: &str = "warn";

/// Pick the log filter: the environment override, then the config file.
/// A filter that does not parse is skipped.
fn build_filter(config: &LogConfig, env_override: Option<&str>) -> EnvFilter {
    env_override
        .into_iter()
        .chain(std::iter::once(config.level.as_str()))
        .find_map(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(FALLBACK_FILTER))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(config: &LogConfig, env_override: Option<&str>) {
    let filter = build_filter(config, env_override);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
