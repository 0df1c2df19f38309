mod cli;
mod commands;
mod infra;
mod shared;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use commands::context::AppContext;
use shared::env_var::EnvVars;

#[tokio::main]
async fn main() -> ExitCode {
    let Cli { command } = Cli::parse();

    match run(command).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> anyhow::Result<ExitCode> {
    // These work even when the config file is broken.
    match &command {
        Commands::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "ghi", &mut std::io::stdout());
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Config(config_cmd) => {
            config_cmd.run()?;
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let env = EnvVars::load();
    let config = shared::config::load_config()?;
    shared::logging::init(&config.log, env.log.as_deref());
    let ctx = AppContext::new(config, env);

    match command {
        Commands::Create(args) => return args.run(&ctx).await,
        Commands::Labels(args) => args.run(&ctx).await?,
        Commands::Milestones(args) => args.run(&ctx).await?,
        Commands::Token(token_cmd) => token_cmd.run(&ctx)?,
        Commands::Completions { .. } | Commands::Config(_) => {}
    }

    Ok(ExitCode::SUCCESS)
}
