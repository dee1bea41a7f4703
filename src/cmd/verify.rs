use crate::{
    cloudflare::{self, requests::client},
    cmd::resolve_credentials,
    config::models::ConfigOpts,
    io::{term, Scanner},
    store::AccountStore,
};
use anyhow::Result;
use clap::Args;
use reqwest::Client;
use tracing::info;

/// Verify credentials against the Cloudflare API.
#[derive(Debug, Args)]
#[clap(name = "verify")]
pub struct VerifyCmd {
    /// A stored account number or email. Prompts when omitted.
    #[clap(short, long, value_name = "account")]
    pub account: Option<String>,
}

impl VerifyCmd {
    #[tracing::instrument(level = "trace", skip(self, opts))]
    pub async fn run(self, opts: &ConfigOpts) -> Result<()> {
        let client = client(opts.timeout())?;
        let mut scanner = Scanner::new();
        verify(opts, &client, self.account.as_deref(), &mut scanner).await
    }
}

/// Check the resolved credentials and list the accounts they reach.
pub async fn verify(
    opts: &ConfigOpts,
    client: &Client,
    selector: Option<&str>,
    scanner: &mut Scanner,
) -> Result<()> {
    let accounts = AccountStore::load(opts.accounts_file()).await?;
    let credentials =
        resolve_credentials(opts, &accounts, selector, scanner).await?;

    info!("Verifying {}...", credentials.email());
    let api_base = opts.api_base();
    let user =
        cloudflare::endpoints::verify(client, &api_base, &credentials).await?;
    term::success(format!("Credentials are valid for {user}"));

    let accounts =
        cloudflare::endpoints::accounts(client, &api_base, &credentials)
            .await?;
    if accounts.is_empty() {
        term::warning("No Cloudflare accounts are reachable with this key.");
    } else {
        println!("\n👥 REACHABLE ACCOUNTS:");
        for account in accounts {
            println!("  • {account}");
        }
    }
    Ok(())
}
