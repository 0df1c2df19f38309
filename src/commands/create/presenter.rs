//! Line-based terminal presenter for the issue flow.

use std::io::{IsTerminal, Write};

use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use super::form::{FormPresenter, IssueForm, Outcome, PendingChoices};
use crate::infra::git::RepositoryRef;
use crate::infra::github::{IssueRequest, ValidationError};
use crate::shared::hidden_input::read_hidden_line;

const TOKEN_SETTINGS_URL: &str = "https://github.com/settings/tokens";

/// Answer that empties a pre-filled field.
const CLEAR_ANSWER: &str = "-";

#[derive(Debug, Clone, Copy, Default)]
pub struct PresenterOptions {
    /// Answer the configure-token question with yes.
    pub assume_yes: bool,
    /// Never prompt; questions are declined and the form is abandoned.
    pub no_input: bool,
    /// Open the created issue in the browser.
    pub open_in_browser: bool,
}

pub struct TerminalPresenter<R, W> {
    input: Lines<R>,
    out: W,
    /// Values from the command line, consumed by the first collection.
    prefill: Option<IssueForm>,
    /// Defaults offered at the prompts.
    last: IssueForm,
    options: PresenterOptions,
    /// Read the token from the terminal with echo off.
    hide_token: bool,
    spinner: Option<ProgressBar>,
}

impl TerminalPresenter<BufReader<Stdin>, std::io::Stdout> {
    pub fn stdio(prefill: IssueForm, options: PresenterOptions) -> Self {
        let mut presenter = Self::new(
            BufReader::new(tokio::io::stdin()),
            std::io::stdout(),
            prefill,
            options,
        );
        presenter.hide_token = std::io::stdin().is_terminal();
        presenter
    }
}

impl<R, W> TerminalPresenter<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    pub fn new(input: R, out: W, prefill: IssueForm, options: PresenterOptions) -> Self {
        Self {
            input: input.lines(),
            out,
            prefill: Some(prefill),
            last: IssueForm::default(),
            options,
            hide_token: false,
            spinner: None,
        }
    }

    /// Prompt for one line. `None` on end of input.
    async fn ask(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        write!(self.out, "{prompt}: ")?;
        self.out.flush()?;
        match self.input.next_line().await? {
            Some(line) => Ok(Some(line.trim().to_string())),
            None => {
                writeln!(self.out)?;
                Ok(None)
            }
        }
    }

    /// Prompt with a default kept on an empty answer.
    async fn ask_field(&mut self, prompt: &str, default: &str) -> anyhow::Result<Option<String>> {
        let prompt = if default.is_empty() {
            prompt.to_string()
        } else {
            format!("{prompt} [{default}]")
        };
        let answer = self.ask(&prompt).await?;
        Ok(answer.map(|answer| match answer.as_str() {
            "" => default.to_string(),
            CLEAR_ANSWER => String::new(),
            _ => answer,
        }))
    }

    async fn prompt_form(
        &mut self,
        repo: &RepositoryRef,
        choices: &mut PendingChoices,
    ) -> anyhow::Result<Option<IssueForm>> {
        writeln!(
            self.out,
            "New issue in {repo} (Enter keeps [value], '{CLEAR_ANSWER}' clears it)"
        )?;
        let defaults = self.last.clone();

        let Some(title) = self.ask_field("Title", &defaults.title).await? else {
            return Ok(None);
        };
        let Some(body) = self.ask_field("Body", &defaults.body).await? else {
            return Ok(None);
        };

        let label_hint = choices
            .try_ready()
            .filter(|c| !c.labels.is_empty())
            .map(|c| c.labels.join(", "));
        if let Some(hint) = label_hint {
            writeln!(self.out, "Available labels: {hint}")?;
        }
        let Some(labels) = self
            .ask_field("Labels (comma separated)", &defaults.labels)
            .await?
        else {
            return Ok(None);
        };
        let Some(assignees) = self
            .ask_field("Assignees (comma separated)", &defaults.assignees)
            .await?
        else {
            return Ok(None);
        };

        let milestone_hint = choices.try_ready().map(|c| {
            c.open_milestones()
                .map(|m| format!("#{} {}", m.number, m.title))
                .collect::<Vec<_>>()
                .join(", ")
        });
        if let Some(hint) = milestone_hint.filter(|h| !h.is_empty()) {
            writeln!(self.out, "Open milestones: {hint}")?;
        }
        let Some(milestone) = self
            .ask_field("Milestone (number or title, blank for none)", &defaults.milestone)
            .await?
        else {
            return Ok(None);
        };

        Ok(Some(IssueForm {
            title,
            body,
            labels,
            assignees,
            milestone,
        }))
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

#[async_trait::async_trait]
impl<R, W> FormPresenter for TerminalPresenter<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    async fn confirm_configure_token(&mut self) -> anyhow::Result<bool> {
        writeln!(self.out, "GitHub token is not configured.")?;
        if self.options.assume_yes {
            return Ok(true);
        }
        if self.options.no_input {
            return Ok(false);
        }
        let answer = self.ask("Would you like to configure it now? [y/N]").await?;
        Ok(matches!(
            answer.as_deref().map(str::to_lowercase).as_deref(),
            Some("y" | "yes")
        ))
    }

    async fn prompt_token(&mut self) -> anyhow::Result<Option<String>> {
        if self.options.no_input {
            return Ok(None);
        }
        writeln!(
            self.out,
            "Create a personal access token with the 'repo' scope at {TOKEN_SETTINGS_URL}"
        )?;
        if !self.hide_token {
            return self.ask("GitHub token").await;
        }
        write!(self.out, "GitHub token (input hidden): ")?;
        self.out.flush()?;
        let token = tokio::task::spawn_blocking(read_hidden_line).await??;
        writeln!(self.out)?;
        Ok(token.map(|token| token.trim().to_string()))
    }

    async fn collect_fields(
        &mut self,
        repo: &RepositoryRef,
        choices: &mut PendingChoices,
    ) -> anyhow::Result<Option<IssueForm>> {
        if let Some(prefill) = self.prefill.take() {
            self.last = prefill.clone();
            if self.options.no_input || !prefill.title.trim().is_empty() {
                return Ok(Some(prefill));
            }
        }
        if self.options.no_input {
            return Ok(None);
        }

        let form = self.prompt_form(repo, choices).await?;
        if let Some(form) = &form {
            self.last = form.clone();
        }
        Ok(form)
    }

    fn show_validation_error(&mut self, error: &ValidationError) {
        let _ = writeln!(self.out, "Error: {error}");
    }

    fn notify_no_repository(&mut self) {
        let _ = writeln!(
            self.out,
            "No GitHub repository detected. Make sure the project has a git remote \
             pointing to GitHub, or pass --repo <owner>/<repo>."
        );
    }

    fn submitting(&mut self, repo: &RepositoryRef, _request: &IssueRequest) {
        let spinner = if std::io::stderr().is_terminal() {
            let s = ProgressBar::new_spinner();
            #[allow(clippy::expect_used)] // static template string
            s.set_style(
                ProgressStyle::default_spinner()
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                    .template("{spinner} {msg}")
                    .expect("valid template"),
            );
            s.set_message(format!("Creating issue in {repo}..."));
            s.enable_steady_tick(std::time::Duration::from_millis(80));
            s
        } else {
            ProgressBar::hidden()
        };
        self.spinner = Some(spinner);
    }

    fn report(&mut self, outcome: &Outcome) {
        self.stop_spinner();
        let _ = match outcome {
            Outcome::Created(issue) => {
                let written = writeln!(self.out, "Issue created successfully!\n\n{}", issue.url);
                if self.options.open_in_browser
                    && let Err(e) = open::that(&issue.url)
                {
                    tracing::warn!(error = %e, url = %issue.url, "failed to open browser");
                }
                written
            }
            Outcome::Failed(message) => writeln!(self.out, "Error: {message}"),
            Outcome::Cancelled => writeln!(self.out, "Issue creation cancelled"),
            Outcome::Abandoned => writeln!(self.out, "Issue not created"),
            Outcome::NoRepository | Outcome::TokenDeclined => Ok(()),
        };
    }
}
