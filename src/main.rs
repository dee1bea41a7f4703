// Clippy
#![deny(clippy::unwrap_used)] // use context/with_context
#![deny(clippy::expect_used)] // use context/with_context
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::models::{
    ConfigOpts, ConfigOptsAuth, ConfigOptsDeploy, ConfigOptsStore,
};
use std::path::PathBuf;
use tracing::{error, Level};
use tracing_subscriber::prelude::*;
mod cloudflare;
mod cmd;
mod config;
mod credentials;
mod deployer;
mod io;
mod store;
#[cfg(test)]
mod testing;

/// Cloudflare Worker deployment command line utility
#[derive(Parser, Debug)]
#[clap(about, author, version, name = "cfworker")]
struct Args {
    /// The command to run. Opens the interactive menu when omitted.
    #[clap(subcommand)]
    action: Option<Subcommands>,
    /// A config file to use. [default: $XDG_CONFIG_HOME/cfworker/config.toml]
    #[clap(short, long, env = "CFWORKER_CONFIG", value_name = "file")]
    pub config: Option<PathBuf>,
    /// Enable verbose logging.
    #[clap(short, global = true)]
    pub v: bool,
    #[clap(flatten)]
    pub auth: ConfigOptsAuth,
    #[clap(flatten)]
    pub store: ConfigOptsStore,
    #[clap(flatten)]
    pub deploy: ConfigOptsDeploy,
}

impl Args {
    #[tracing::instrument(level = "trace", skip(self))]
    pub async fn run(self) -> Result<()> {
        // Apply CLI configuration layering
        let default_cfg = ConfigOpts::default();
        let toml_cfg = ConfigOpts::from_file(self.config.clone())?;
        let env_cfg = ConfigOpts::from_env()?;
        let cli_cfg = ConfigOpts::builder()
            .auth_email(self.auth.email)
            .auth_key(self.auth.key)
            .store_accounts(self.store.accounts)
            .store_scripts(self.store.scripts)
            .deploy_url(self.deploy.url)
            .deploy_api_base(self.deploy.api_base)
            .deploy_timeout(self.deploy.timeout)
            .build();
        let opts = ConfigOpts::builder()
            .merge(default_cfg)
            .merge(toml_cfg)
            .merge(env_cfg)
            .merge(cli_cfg)
            .build();

        match self.action {
            Some(Subcommands::Deploy(inner)) => inner.run(&opts).await,
            Some(Subcommands::Bulk(inner)) => inner.run(&opts).await,
            Some(Subcommands::Account(inner)) => inner.run(&opts).await,
            Some(Subcommands::Script(inner)) => inner.run(&opts).await,
            Some(Subcommands::Verify(inner)) => inner.run(&opts).await,
            Some(Subcommands::Status) => cmd::status::status(&opts).await,
            Some(Subcommands::Config(inner)) => {
                inner.run(&opts, self.config).await
            }
            None => cmd::menu::run(&opts).await,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Subcommands {
    Deploy(cmd::DeployCmd),
    Bulk(cmd::BulkCmd),
    Account(cmd::AccountCmd),
    Script(cmd::ScriptCmd),
    Verify(cmd::VerifyCmd),
    /// Show store locations and counts.
    Status,
    Config(cmd::ConfigCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    #[cfg(windows)]
    if let Err(err) = ansi_term::enable_ansi_support() {
        eprintln!("error enabling ANSI support: {:?}", err);
    }

    // Filter spans based on the RUST_LOG env var or -v flag.
    let (verbose, log_filter) =
        match tracing_subscriber::EnvFilter::try_from_default_env() {
            Ok(filter) => (
                filter.max_level_hint().is_some_and(|f| f >= Level::DEBUG),
                filter,
            ),
            Err(_) => (
                args.v,
                tracing_subscriber::EnvFilter::new(if args.v {
                    "info,cfworker=trace"
                } else {
                    "info"
                }),
            ),
        };

    // Enable tracing/logging
    tracing_subscriber::registry()
        .with(log_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .try_init()
        .context("error initializing logging")?;

    if let Err(err) = args.run().await {
        if verbose {
            error!("{err:?}");
        } else {
            error!(
                "{err}\n\nEnable verbose logging (-v) for the full stack trace."
            );
        }
        std::process::exit(1);
    }
    Ok(())
}
