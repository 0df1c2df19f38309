mod flow;
mod form;
mod presenter;

pub use flow::{Connector, RepoSource};

use flow::IssueFlow;
use form::{IssueForm, Outcome};
use presenter::{PresenterOptions, TerminalPresenter};

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Args;

use super::context::AppContext;

#[derive(Args, Clone, PartialEq, Eq, Debug)]
pub struct CreateArgs {
    /// Target repository as <owner>/<repo> (default: detected from git remotes)
    #[arg(short = 'R', long)]
    pub repo: Option<String>,

    /// Issue title; skips the interactive form when given
    #[arg(short, long)]
    pub title: Option<String>,

    /// Issue body
    #[arg(short, long, conflicts_with = "body_file")]
    pub body: Option<String>,

    /// Read the issue body from a file
    #[arg(short = 'F', long)]
    pub body_file: Option<PathBuf>,

    /// Label to add (repeatable or comma separated)
    #[arg(short, long = "label", value_delimiter = ',')]
    pub labels: Vec<String>,

    /// User to assign (repeatable or comma separated)
    #[arg(short, long = "assignee", value_delimiter = ',')]
    pub assignees: Vec<String>,

    /// Milestone number or open milestone title
    #[arg(short, long)]
    pub milestone: Option<String>,

    /// Configure a missing token without asking first
    #[arg(short, long)]
    pub yes: bool,

    /// Never prompt; give up where input would be needed
    #[arg(long)]
    pub no_input: bool,

    /// Open the created issue in the browser
    #[arg(short, long)]
    pub web: bool,
}

impl CreateArgs {
    pub async fn run(&self, ctx: &AppContext) -> anyhow::Result<ExitCode> {
        let auth = ctx.auth()?;
        let repo_source = ctx.repo_source(self.repo.as_deref())?;
        let connector = ctx.connector();

        let mut presenter = TerminalPresenter::stdio(self.prefill()?, self.presenter_options());
        let flow = IssueFlow::new(&auth, repo_source, &connector);
        let outcome = flow.run(&mut presenter, ctrl_c()).await?;

        Ok(match outcome {
            Outcome::Failed(_) => ExitCode::FAILURE,
            _ => ExitCode::SUCCESS,
        })
    }

    fn prefill(&self) -> anyhow::Result<IssueForm> {
        let body = match &self.body_file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read body file {}", path.display()))?,
            None => self.body.clone().unwrap_or_default(),
        };
        Ok(IssueForm {
            title: self.title.clone().unwrap_or_default(),
            body,
            labels: self.labels.join(", "),
            assignees: self.assignees.join(", "),
            milestone: self.milestone.clone().unwrap_or_default(),
        })
    }

    fn presenter_options(&self) -> PresenterOptions {
        PresenterOptions {
            assume_yes: self.yes,
            no_input: self.no_input,
            open_in_browser: self.web,
        }
    }
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
