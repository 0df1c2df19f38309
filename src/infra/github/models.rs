//! Request and response models for the issue endpoints.

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// A validated request to create an issue.
///
/// The title is never empty: the only way to build one is [`IssueRequest::new`].
/// Optional fields that are absent or empty are left out of the JSON body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueRequest {
    title: String,
    #[serde(skip_serializing_if = "is_blank")]
    body: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    labels: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    assignees: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    milestone: Option<u64>,
}

fn is_blank(body: &Option<String>) -> bool {
    body.as_deref().is_none_or(str::is_empty)
}

impl IssueRequest {
    /// Start a request with a trimmed, non-empty title.
    pub fn new(title: &str) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(Self {
            title: title.to_string(),
            body: None,
            labels: Vec::new(),
            assignees: Vec::new(),
            milestone: None,
        })
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    pub fn assignees(mut self, assignees: Vec<String>) -> Self {
        self.assignees = assignees;
        self
    }

    pub fn milestone(mut self, number: u64) -> Self {
        self.milestone = Some(number);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    #[cfg(test)]
    pub fn body_text(&self) -> Option<&str> {
        self.body.as_deref()
    }

    #[cfg(test)]
    pub fn label_names(&self) -> &[String] {
        &self.labels
    }

    #[cfg(test)]
    pub fn assignee_logins(&self) -> &[String] {
        &self.assignees
    }

    #[cfg(test)]
    pub fn milestone_number(&self) -> Option<u64> {
        self.milestone
    }
}

/// The issue GitHub created.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueResult {
    pub number: u64,
    pub title: String,
    #[serde(rename = "html_url")]
    pub url: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneState {
    Open,
    Closed,
}

impl MilestoneState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Milestone {
    pub number: u64,
    pub title: String,
    pub state: MilestoneState,
}

impl Milestone {
    pub fn is_open(&self) -> bool {
        self.state == MilestoneState::Open
    }
}
