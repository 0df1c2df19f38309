//! GitHub API error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitHubError {
    /// Non-success response; `message` is the API's own message when the
    /// body carries one, the raw body otherwise.
    #[error("Failed to create issue (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to reach GitHub: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response from GitHub: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),
}

pub type Result<T> = std::result::Result<T, GitHubError>;

/// Problems with issue fields caught before anything is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Issue title cannot be empty")]
    EmptyTitle,

    #[error("Unknown milestone: {0}")]
    UnknownMilestone(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_contains_status_and_message() {
        let err = GitHubError::Api {
            status: 422,
            message: "Validation Failed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to create issue (HTTP 422): Validation Failed"
        );
    }

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::EmptyTitle.to_string(),
            "Issue title cannot be empty"
        );
        assert_eq!(
            ValidationError::UnknownMilestone("v9".to_string()).to_string(),
            "Unknown milestone: v9"
        );
    }
}
