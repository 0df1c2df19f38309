//! The issue creation flow: token, repository, form, submission.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::form::{FormChoices, FormPresenter, Outcome, PendingChoices};
use crate::infra::git::{RemoteSource, RepositoryRef, detect_repository};
use crate::infra::github::{GitHubError, IssueApi};
use crate::infra::secret::AuthManager;

/// Builds an API client once the token is known.
pub trait Connector: Send + Sync {
    fn connect(&self, token: &str) -> Result<Arc<dyn IssueApi>, GitHubError>;
}

/// Where the target repository comes from.
pub enum RepoSource {
    /// Given on the command line.
    Explicit(RepositoryRef),
    /// Detected from the remotes of the current repository.
    Remotes(Box<dyn RemoteSource>),
}

impl RepoSource {
    pub fn resolve(&self) -> Option<RepositoryRef> {
        match self {
            Self::Explicit(repo) => Some(repo.clone()),
            Self::Remotes(source) => match source.remotes() {
                Ok(remotes) => detect_repository(&remotes),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read git remotes");
                    None
                }
            },
        }
    }
}

pub struct IssueFlow<'a> {
    auth: &'a AuthManager,
    repo_source: RepoSource,
    connector: &'a dyn Connector,
}

impl<'a> IssueFlow<'a> {
    pub fn new(
        auth: &'a AuthManager,
        repo_source: RepoSource,
        connector: &'a dyn Connector,
    ) -> Self {
        Self {
            auth,
            repo_source,
            connector,
        }
    }

    /// Run the flow to completion.
    ///
    /// `cancel` aborts an in-flight submission when it resolves; it is only
    /// polled while the request is being sent.
    pub async fn run<P, C>(&self, presenter: &mut P, cancel: C) -> anyhow::Result<Outcome>
    where
        P: FormPresenter + ?Sized,
        C: Future<Output = ()>,
    {
        let Some(token) = self.ensure_token(presenter).await? else {
            tracing::info!("token setup declined");
            return Ok(Outcome::TokenDeclined);
        };

        let Some(repo) = self.repo_source.resolve() else {
            presenter.notify_no_repository();
            return Ok(Outcome::NoRepository);
        };
        tracing::debug!(%repo, "target repository");

        let api = self.connector.connect(&token)?;
        let (mut choices, enrichment) = spawn_enrichment(Arc::clone(&api), repo.clone());

        let outcome = submit(presenter, api.as_ref(), &repo, &mut choices, cancel).await;
        enrichment.abort();

        let outcome = outcome?;
        presenter.report(&outcome);
        Ok(outcome)
    }

    /// The configured token, or one entered by the user now.
    async fn ensure_token<P>(&self, presenter: &mut P) -> anyhow::Result<Option<String>>
    where
        P: FormPresenter + ?Sized,
    {
        if let Some(token) = self.auth.token()? {
            return Ok(Some(token));
        }

        if !presenter.confirm_configure_token().await? {
            return Ok(None);
        }
        let Some(token) = presenter.prompt_token().await? else {
            return Ok(None);
        };
        if !self.auth.store_token(&token)? {
            return Ok(None);
        }
        Ok(Some(token.trim().to_string()))
    }
}

/// Fetch labels and milestones in the background while the form is open.
fn spawn_enrichment(
    api: Arc<dyn IssueApi>,
    repo: RepositoryRef,
) -> (PendingChoices, JoinHandle<()>) {
    let (tx, rx) = oneshot::channel();
    let handle = tokio::spawn(async move {
        let labels = api.list_labels(&repo).await;
        let milestones = api.list_milestones(&repo).await;
        tracing::debug!(
            labels = labels.len(),
            milestones = milestones.len(),
            "form choices loaded"
        );
        let _ = tx.send(FormChoices { labels, milestones });
    });
    (PendingChoices::new(rx), handle)
}

async fn submit<P, C>(
    presenter: &mut P,
    api: &dyn IssueApi,
    repo: &RepositoryRef,
    choices: &mut PendingChoices,
    cancel: C,
) -> anyhow::Result<Outcome>
where
    P: FormPresenter + ?Sized,
    C: Future<Output = ()>,
{
    let request = loop {
        let Some(form) = presenter.collect_fields(repo, choices).await? else {
            return Ok(Outcome::Abandoned);
        };
        let loaded = if form.names_milestone() {
            Some(choices.ready().await)
        } else {
            choices.try_ready()
        };
        match form.to_request(loaded) {
            Ok(request) => break request,
            Err(e) => {
                tracing::debug!(error = %e, "issue form rejected");
                presenter.show_validation_error(&e);
            }
        }
    };

    presenter.submitting(repo, &request);
    tokio::select! {
        biased;
        () = cancel => {
            tracing::info!("issue submission cancelled");
            Ok(Outcome::Cancelled)
        }
        result = api.create_issue(repo, &request) => Ok(match result {
            Ok(issue) => {
                tracing::info!(number = issue.number, url = %issue.url, "issue created");
                Outcome::Created(issue)
            }
            Err(e) => {
                tracing::warn!(error = %e, "issue creation failed");
                Outcome::Failed(e.to_string())
            }
        }),
    }
}
