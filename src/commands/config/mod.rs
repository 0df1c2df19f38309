use clap::Subcommand;

/// Configuration file commands.
#[derive(Subcommand, Clone, PartialEq, Eq, Debug)]
pub enum ConfigCommands {
    /// Print JSON Schema for the configuration file
    Schema,

    /// Print where the configuration file is looked up
    Path,
}

impl ConfigCommands {
    pub fn run(&self) -> anyhow::Result<()> {
        match self {
            Self::Schema => {
                let schema = crate::shared::config::generate_schema();
                let json = serde_json::to_string_pretty(&schema)?;
                println!("{json}");
            }
            Self::Path => {
                let dir = crate::shared::dirs::app_config_dir().ok_or_else(|| {
                    anyhow::anyhow!(
                        "Cannot determine the config directory; set HOME or XDG_CONFIG_HOME"
                    )
                })?;
                println!("{}", dir.join("config.yaml").display());
            }
        }
        Ok(())
    }
}
