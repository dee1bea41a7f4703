use crate::{
    config::models::ConfigOpts,
    credentials::Credentials,
    io::{term, Scanner},
    store::AccountStore,
};
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tracing::info;

/// Manage stored Cloudflare accounts.
#[derive(Debug, Args)]
#[clap(name = "account")]
pub struct AccountCmd {
    #[clap(subcommand)]
    action: AccountSubcommands,
}

#[derive(Clone, Debug, Subcommand)]
enum AccountSubcommands {
    /// List stored accounts.
    List,
    /// Add an account. Uses --email/--key when given, otherwise prompts.
    Add,
    /// Remove an account.
    Remove {
        /// The account number or email. Prompts when omitted.
        account: Option<String>,
    },
}

impl AccountCmd {
    #[tracing::instrument(level = "trace", skip(self, opts))]
    pub async fn run(self, opts: &ConfigOpts) -> Result<()> {
        let mut accounts = AccountStore::load(opts.accounts_file()).await?;
        match self.action {
            AccountSubcommands::List => {
                list(&accounts);
                Ok(())
            }
            AccountSubcommands::Add => {
                let mut scanner = Scanner::new();
                add(opts, &mut accounts, &mut scanner).await
            }
            AccountSubcommands::Remove { account } => {
                let mut scanner = Scanner::new();
                remove(&mut accounts, account.as_deref(), &mut scanner).await
            }
        }
    }
}

/// Print the stored accounts with their keys masked.
pub fn list(accounts: &AccountStore) {
    if accounts.is_empty() {
        term::warning("No accounts found. Add an account first.");
        return;
    }
    println!("{:<40}{}", "No.  Email", "API Key");
    println!("{}", term::LIGHT_RULE);
    for (i, account) in accounts.accounts().iter().enumerate() {
        println!(
            "{:<40}{}",
            format!("{:2}.  {}", i + 1, account.email()),
            account.masked_key()
        );
    }
}

/// Add an account from configured or prompted credentials and save it.
pub async fn add(
    opts: &ConfigOpts,
    accounts: &mut AccountStore,
    scanner: &mut Scanner,
) -> Result<()> {
    let credentials = match opts.credentials() {
        Some(credentials) => credentials?,
        None => {
            let email = scanner
                .prompt("📧 Cloudflare Email", "email")
                .await?
                .unwrap_or_default();
            let key = scanner
                .prompt("🔑 Global API Key", "key")
                .await?
                .unwrap_or_default();
            Credentials::new(email, key)?
        }
    };
    let email = credentials.email().to_owned();
    accounts.add(credentials)?;
    accounts.save().await?;
    info!("added account {}", email);
    term::success(format!("Account {email} added successfully!"));
    Ok(())
}

/// Remove an account named by `selector`, or chosen interactively.
pub async fn remove(
    accounts: &mut AccountStore,
    selector: Option<&str>,
    scanner: &mut Scanner,
) -> Result<()> {
    if accounts.is_empty() {
        term::warning("No accounts to remove.");
        return Ok(());
    }
    let idx = match selector {
        Some(selector) => accounts
            .find(selector)
            .with_context(|| format!("no account matches '{selector}'"))?,
        None => {
            println!("Select account to remove:");
            let emails: Vec<&str> =
                accounts.accounts().iter().map(|a| a.email()).collect();
            term::numbered(&emails, true);
            match scanner
                .prompt_t::<usize>("Select account to remove", "number")
                .await?
            {
                Some(n) if n >= 1 && n <= accounts.len() => n - 1,
                Some(n) if n == accounts.len() + 1 => {
                    term::info("Cancelled");
                    return Ok(());
                }
                _ => anyhow::bail!("invalid choice"),
            }
        }
    };
    let removed = accounts.remove(idx)?;
    accounts.save().await?;
    info!("removed account {}", removed.email());
    term::success(format!(
        "Account {} removed successfully!",
        removed.email()
    ));
    Ok(())
}
