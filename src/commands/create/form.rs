//! Issue form fields, background-loaded choices and the presenter seam.

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use crate::infra::git::RepositoryRef;
use crate::infra::github::{IssueRequest, IssueResult, Milestone, ValidationError};

/// Raw field text as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueForm {
    pub title: String,
    pub body: String,
    /// Comma-separated label names.
    pub labels: String,
    /// Comma-separated user logins.
    pub assignees: String,
    /// Milestone number, or the title of an open milestone.
    pub milestone: String,
}

impl IssueForm {
    /// Validate the form and turn it into a request.
    ///
    /// `choices` is used to resolve a milestone given by title; without it
    /// only numeric milestones are accepted.
    pub fn to_request(
        &self,
        choices: Option<&FormChoices>,
    ) -> Result<IssueRequest, ValidationError> {
        let mut request = IssueRequest::new(&self.title)?
            .labels(split_list(&self.labels))
            .assignees(split_list(&self.assignees));

        let body = self.body.trim();
        if !body.is_empty() {
            request = request.body(body);
        }

        if let Some(number) = resolve_milestone(&self.milestone, choices)? {
            request = request.milestone(number);
        }
        Ok(request)
    }

    /// Whether the milestone is given by title, so resolving it needs the
    /// loaded milestones.
    pub fn names_milestone(&self) -> bool {
        let input = milestone_input(&self.milestone);
        !input.is_empty() && input.parse::<u64>().is_err()
    }
}

/// Milestone text without surrounding blanks or a leading `#`.
fn milestone_input(input: &str) -> &str {
    input.trim().trim_start_matches('#')
}

/// Split comma-separated input, dropping blank entries.
fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn resolve_milestone(
    input: &str,
    choices: Option<&FormChoices>,
) -> Result<Option<u64>, ValidationError> {
    let input = milestone_input(input);
    if input.is_empty() {
        return Ok(None);
    }
    if let Ok(number) = input.parse::<u64>() {
        return Ok(Some(number));
    }
    choices
        .and_then(|c| c.open_milestones().find(|m| m.title == input))
        .map(|m| Some(m.number))
        .ok_or_else(|| ValidationError::UnknownMilestone(input.to_string()))
}

/// Labels and milestones offered while filling in the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormChoices {
    pub labels: Vec<String>,
    pub milestones: Vec<Milestone>,
}

impl FormChoices {
    pub fn open_milestones(&self) -> impl Iterator<Item = &Milestone> {
        self.milestones.iter().filter(|m| m.is_open())
    }
}

/// Choices that are still being fetched in the background.
///
/// Prompting never has to wait: `try_ready` returns immediately with whatever
/// has arrived. Only a milestone given by title waits for `ready`. A fetch
/// that went away without answering counts as empty.
pub struct PendingChoices {
    rx: Option<oneshot::Receiver<FormChoices>>,
    ready: Option<FormChoices>,
}

impl PendingChoices {
    pub fn new(rx: oneshot::Receiver<FormChoices>) -> Self {
        Self {
            rx: Some(rx),
            ready: None,
        }
    }

    /// Choices that are already known, with nothing left to fetch.
    pub fn resolved(choices: FormChoices) -> Self {
        Self {
            rx: None,
            ready: Some(choices),
        }
    }

    /// The choices if they have arrived, without blocking.
    pub fn try_ready(&mut self) -> Option<&FormChoices> {
        if self.ready.is_none()
            && let Some(rx) = self.rx.as_mut()
        {
            match rx.try_recv() {
                Ok(choices) => self.ready = Some(choices),
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Closed) => self.ready = Some(FormChoices::default()),
            }
            self.rx = None;
        }
        self.ready.as_ref()
    }

    /// Wait until the choices have arrived.
    pub async fn ready(&mut self) -> &FormChoices {
        if self.ready.is_none() {
            let choices = match self.rx.take() {
                Some(rx) => rx.await.unwrap_or_default(),
                None => FormChoices::default(),
            };
            self.ready = Some(choices);
        }
        self.ready.get_or_insert_with(FormChoices::default)
    }
}

/// Terminal state of one issue flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created(IssueResult),
    /// Submission failed; the message is shown to the user as is.
    Failed(String),
    /// The user interrupted the submission.
    Cancelled,
    /// The user left the form without submitting.
    Abandoned,
    NoRepository,
    /// No token was configured and the user chose not to add one.
    TokenDeclined,
}

/// The user-facing side of the issue flow.
#[async_trait::async_trait]
pub trait FormPresenter: Send {
    /// Ask whether to configure a token now.
    async fn confirm_configure_token(&mut self) -> anyhow::Result<bool>;

    /// Ask for the token. `None` means the user gave up.
    async fn prompt_token(&mut self) -> anyhow::Result<Option<String>>;

    /// Collect the issue fields. `None` means the user abandoned the form.
    async fn collect_fields(
        &mut self,
        repo: &RepositoryRef,
        choices: &mut PendingChoices,
    ) -> anyhow::Result<Option<IssueForm>>;

    fn show_validation_error(&mut self, error: &ValidationError);

    fn notify_no_repository(&mut self);

    /// Called once the request is valid and about to be sent.
    fn submitting(&mut self, repo: &RepositoryRef, request: &IssueRequest);

    /// Show the result of the form: created, failed, cancelled or abandoned.
    fn report(&mut self, outcome: &Outcome);
}
