//! Clap commands handled by the CLI.

use crate::{
    config::models::ConfigOpts,
    credentials::Credentials,
    io::{term, Scanner},
    store::AccountStore,
};
use anyhow::{Context, Result};

pub mod account;
pub use account::AccountCmd;

pub mod bulk;
pub use bulk::BulkCmd;

pub mod config;
pub use config::ConfigCmd;

pub mod deploy;
pub use deploy::DeployCmd;

pub mod menu;

pub mod script;
pub use script::ScriptCmd;

pub mod status;

pub mod verify;
pub use verify::VerifyCmd;

/// Resolve the credentials for an authenticated call.
///
/// Configured credentials win, then a stored account named by `selector`,
/// then an interactive choice among stored accounts. Fails before any
/// request is made when nothing can be resolved.
pub async fn resolve_credentials(
    opts: &ConfigOpts,
    accounts: &AccountStore,
    selector: Option<&str>,
    scanner: &mut Scanner,
) -> Result<Credentials> {
    if let Some(credentials) = opts.credentials() {
        return credentials;
    }
    if let Some(selector) = selector {
        let idx = accounts
            .find(selector)
            .with_context(|| format!("no account matches '{selector}'"))?;
        return Ok(accounts.accounts()[idx].clone());
    }
    anyhow::ensure!(
        !accounts.is_empty(),
        "no credentials were provided, add an account or pass --email and --key"
    );
    if let [only] = accounts.accounts() {
        return Ok(only.clone());
    }

    println!("Select account:");
    term::numbered(accounts.accounts(), false);
    let idx = scanner
        .prompt_choice("Select account", accounts.len())
        .await?
        .context("invalid choice")?;
    Ok(accounts.accounts()[idx].clone())
}

/// Ask for confirmation. Anything but a yes declines.
pub async fn confirm(
    scanner: &mut Scanner,
    prompt: impl std::fmt::Display,
) -> Result<bool> {
    Ok(scanner.prompt_yes_or_no(prompt, "y/N").await?.unwrap_or(false))
}

/// Wait for the user to press enter.
pub async fn pause(scanner: &mut Scanner) -> Result<()> {
    println!();
    scanner.prompt("⏎ Press Enter to continue", "enter").await?;
    Ok(())
}
