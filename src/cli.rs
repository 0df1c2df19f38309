use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::commands::config::ConfigCommands;
use crate::commands::create::CreateArgs;
use crate::commands::metadata::{LabelsArgs, MilestonesArgs};
use crate::commands::token::TokenCommands;

#[derive(Parser)]
#[command(
    name = "gh-issue",
    bin_name = "ghi",
    version,
    about,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, PartialEq, Eq, Debug)]
pub enum Commands {
    /// Create an issue in the current repository
    Create(CreateArgs),

    /// List the labels of the repository
    Labels(LabelsArgs),

    /// List the milestones of the repository
    Milestones(MilestonesArgs),

    /// Manage the GitHub token
    #[command(subcommand)]
    Token(TokenCommands),

    /// Configuration file tools
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}
