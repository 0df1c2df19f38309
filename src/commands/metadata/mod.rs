//! `ghi labels` and `ghi milestones`: what the issue form offers as choices.

use clap::Args;

use super::context::{AppContext, resolve_repository};
use crate::infra::git::RepositoryRef;
use crate::infra::github::{GitHubClient, IssueApi, Milestone};

#[derive(Args, Clone, PartialEq, Eq, Debug)]
pub struct LabelsArgs {
    /// Repository as <owner>/<repo> (default: detected from git remotes)
    #[arg(short = 'R', long)]
    pub repo: Option<String>,
}

#[derive(Args, Clone, PartialEq, Eq, Debug)]
pub struct MilestonesArgs {
    /// Repository as <owner>/<repo> (default: detected from git remotes)
    #[arg(short = 'R', long)]
    pub repo: Option<String>,
}

impl LabelsArgs {
    pub async fn run(&self, ctx: &AppContext) -> anyhow::Result<()> {
        let (client, repo) = connect(ctx, self.repo.as_deref())?;
        let labels = client.list_labels(&repo).await;
        print!("{}", render_labels(&labels));
        Ok(())
    }
}

impl MilestonesArgs {
    pub async fn run(&self, ctx: &AppContext) -> anyhow::Result<()> {
        let (client, repo) = connect(ctx, self.repo.as_deref())?;
        let milestones = client.list_milestones(&repo).await;
        print!("{}", render_milestones(&milestones));
        Ok(())
    }
}

fn connect(ctx: &AppContext, repo: Option<&str>) -> anyhow::Result<(GitHubClient, RepositoryRef)> {
    let token = ctx.require_token()?;
    let repo = resolve_repository(&ctx.repo_source(repo)?)?;
    Ok((ctx.connector().client(&token)?, repo))
}

fn render_labels(labels: &[String]) -> String {
    if labels.is_empty() {
        return "No labels found\n".to_string();
    }
    labels.iter().map(|name| format!("{name}\n")).collect()
}

fn render_milestones(milestones: &[Milestone]) -> String {
    if milestones.is_empty() {
        return "No milestones found\n".to_string();
    }
    milestones
        .iter()
        .map(|m| format!("#{}\t{}\t{}\n", m.number, m.title, m.state.as_str()))
        .collect()
}
