use std::path::PathBuf;

/// Directory name used under the XDG config directory.
pub const APP_DIR_NAME: &str = "gh-issue";

/// Returns the user's home directory from the HOME environment variable.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Returns the XDG config directory (~/.config or $XDG_CONFIG_HOME).
/// Empty values are treated as unset per XDG Base Directory Specification.
pub fn config_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var("XDG_CONFIG_HOME").ok().filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(xdg));
    }
    home_dir().map(|home| home.join(".config"))
}

/// Returns this tool's config directory (config file and stored token).
pub fn app_config_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(APP_DIR_NAME))
}
