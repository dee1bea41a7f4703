use crate::config::{default_config_path, models::ConfigOpts};
use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Inspect the merged configuration.
#[derive(Debug, Args)]
#[clap(name = "config")]
pub struct ConfigCmd {
    #[clap(subcommand)]
    action: ConfigSubcommands,
}

impl ConfigCmd {
    pub async fn run(
        self,
        opts: &ConfigOpts,
        config: Option<PathBuf>,
    ) -> Result<()> {
        match self.action {
            ConfigSubcommands::Show => println!("{opts}"),
            ConfigSubcommands::Path => {
                let path = config.unwrap_or_else(default_config_path);
                let note = if path.exists() { "" } else { " (not found)" };
                println!("{}{note}", path.display());
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Subcommand)]
enum ConfigSubcommands {
    /// Show the merged configuration, with the API key masked.
    Show,
    /// Print the config file location.
    Path,
}
