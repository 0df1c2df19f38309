use std::io::{BufRead, IsTerminal, Write};

use anyhow::{anyhow, bail};
use clap::Subcommand;

use super::context::AppContext;
use crate::infra::secret::{AuthManager, TokenSource};
use crate::shared::env_var::EnvVars;
use crate::shared::hidden_input::read_hidden_line;

/// GitHub token management commands.
#[derive(Subcommand, Clone, PartialEq, Eq, Debug)]
pub enum TokenCommands {
    /// Store a personal access token (read from stdin when not given)
    Set {
        /// Token value; prefer stdin to keep it out of shell history
        #[arg(long)]
        token: Option<String>,
    },

    /// Remove the stored token
    Clear,

    /// Show whether a token is configured, without printing it
    Status,
}

impl TokenCommands {
    pub fn run(&self, ctx: &AppContext) -> anyhow::Result<()> {
        let auth = ctx.auth()?;
        let mut out = std::io::stdout();
        match self {
            Self::Set { token } => {
                let token = match token {
                    Some(token) => token.clone(),
                    None if std::io::stdin().is_terminal() => {
                        read_hidden_token(&mut std::io::stderr())?
                    }
                    None => read_token(std::io::stdin().lock(), &mut std::io::stderr())?,
                };
                set(&auth, &token, &mut out)
            }
            Self::Clear => clear(&auth, &mut out),
            Self::Status => {
                let location = ctx.credentials_store()?.path().display().to_string();
                status(&auth, &location, &mut out)
            }
        }
    }
}

fn read_token(mut input: impl BufRead, prompt: &mut impl Write) -> anyhow::Result<String> {
    write!(prompt, "GitHub token: ")?;
    prompt.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}

fn read_hidden_token(prompt: &mut impl Write) -> anyhow::Result<String> {
    write!(prompt, "GitHub token (input hidden): ")?;
    prompt.flush()?;
    let token = read_hidden_line()?;
    writeln!(prompt)?;
    token.ok_or_else(|| anyhow!("No token entered"))
}

fn set(auth: &AuthManager, token: &str, out: &mut impl Write) -> anyhow::Result<()> {
    if !auth.store_token(token)? {
        bail!("Token cannot be empty");
    }
    writeln!(out, "GitHub token saved")?;
    if auth.token_source()? == Some(TokenSource::Environment) {
        writeln!(
            out,
            "Note: {} is set and takes precedence over the saved token",
            EnvVars::token_name()
        )?;
    }
    Ok(())
}

fn clear(auth: &AuthManager, out: &mut impl Write) -> anyhow::Result<()> {
    auth.clear_token()?;
    writeln!(out, "GitHub token removed")?;
    Ok(())
}

fn status(auth: &AuthManager, location: &str, out: &mut impl Write) -> anyhow::Result<()> {
    match auth.token_source()? {
        Some(TokenSource::Environment) => writeln!(
            out,
            "GitHub token configured (from {})",
            EnvVars::token_name()
        )?,
        Some(TokenSource::Store) => {
            writeln!(out, "GitHub token configured (stored in {location})")?
        }
        None => writeln!(out, "No GitHub token configured")?,
    }
    Ok(())
}
