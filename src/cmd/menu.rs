//! The interactive menu, run when no command is given.

use crate::{
    cloudflare::requests::client,
    cmd::{
        account, bulk, deploy, pause,
        script::{self, AddScript},
        status::status,
    },
    config::models::ConfigOpts,
    io::{is_aborted, term, Scanner},
    store::{AccountStore, ScriptStore},
};
use anyhow::Result;
use reqwest::Client;
use tracing::debug;

/// A choice of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainChoice {
    Single,
    Bulk,
    Accounts,
    Scripts,
    Status,
    Exit,
}

impl MainChoice {
    fn from_number(n: usize) -> Option<Self> {
        Some(match n {
            1 => Self::Single,
            2 => Self::Bulk,
            3 => Self::Accounts,
            4 => Self::Scripts,
            5 => Self::Status,
            6 => Self::Exit,
            _ => return None,
        })
    }
}

/// Run the menu until the user exits.
#[tracing::instrument(level = "trace", skip(opts))]
pub async fn run(opts: &ConfigOpts) -> Result<()> {
    let client = client(opts.timeout())?;
    let mut scanner = Scanner::new();
    match main_menu(opts, &client, &mut scanner).await {
        Err(err) if is_aborted(&err) => {
            debug!("menu aborted");
            println!();
            term::info("Program interrupted by user");
            Ok(())
        }
        other => other,
    }
}

fn screen(title: &str, subtitle: &str) {
    if let Err(err) = term::clear_screen() {
        debug!("{err:#}");
    }
    term::header(title, Some(subtitle));
}

/// Report the result of a menu action. Errors are shown and the menu
/// carries on, unless the user aborted.
async fn report(scanner: &mut Scanner, result: Result<()>) -> Result<()> {
    if let Err(err) = result {
        if is_aborted(&err) {
            return Err(err);
        }
        term::error(format!("{err:#}"));
    }
    pause(scanner).await
}

async fn main_menu(
    opts: &ConfigOpts,
    client: &Client,
    scanner: &mut Scanner,
) -> Result<()> {
    loop {
        screen("CF Worker CLI", "Cloudflare Worker Deployment Tool");
        println!("Please select an option:");
        println!("1. 🚀 Single Deployment");
        println!("2. 📦 Bulk Deployment");
        println!("3. 👥 Manage Accounts");
        println!("4. 🔗 Manage Script URLs");
        println!("5. 📊 System Status");
        println!("6. ❌ Exit");
        println!();

        let choice = scanner
            .prompt_t::<usize>("Select action", "1-6")
            .await?
            .and_then(MainChoice::from_number);
        let Some(choice) = choice else {
            term::error("Please select option 1-6");
            pause(scanner).await?;
            continue;
        };

        match choice {
            MainChoice::Single => {
                screen("SINGLE DEPLOYMENT", "Deploy Single Worker");
                let args = Default::default();
                let result = deploy::single(opts, client, args, scanner).await;
                report(scanner, result).await?;
            }
            MainChoice::Bulk => {
                screen("BULK DEPLOYMENT", "Deploy Multiple Workers");
                let args = Default::default();
                let result = bulk::bulk(opts, client, args, scanner).await;
                report(scanner, result).await?;
            }
            MainChoice::Accounts => accounts_menu(opts, scanner).await?,
            MainChoice::Scripts => scripts_menu(opts, scanner).await?,
            MainChoice::Status => {
                screen("SYSTEM STATUS", "Current Configuration Overview");
                let result = status(opts).await;
                report(scanner, result).await?;
            }
            MainChoice::Exit => {
                screen("GOODBYE", "Thank you for using CF Worker CLI");
                term::success("👋 Thank you for using CF Worker CLI!");
                println!("{}", term::HEAVY_RULE);
                return Ok(());
            }
        }
    }
}

async fn accounts_menu(
    opts: &ConfigOpts,
    scanner: &mut Scanner,
) -> Result<()> {
    loop {
        screen("ACCOUNT MANAGEMENT", "Manage Cloudflare Accounts");
        println!("1. 📋 List Accounts");
        println!("2. ➕ Add Account");
        println!("3. 🗑️ Remove Account");
        println!("4. 🔙 Back to Main Menu");
        println!();

        let choice = scanner.prompt_t::<usize>("Select action", "1-4").await?;
        let result = match choice {
            Some(1) => {
                screen("ACCOUNT LIST", "Registered Cloudflare Accounts");
                AccountStore::load(opts.accounts_file())
                    .await
                    .map(|accounts| account::list(&accounts))
            }
            Some(2) => {
                screen("ADD NEW ACCOUNT", "Add Cloudflare Account Credentials");
                match AccountStore::load(opts.accounts_file()).await {
                    Ok(mut accounts) => {
                        // Menu additions always prompt for fresh values.
                        let fresh = ConfigOpts::default();
                        account::add(&fresh, &mut accounts, scanner).await
                    }
                    Err(err) => Err(err),
                }
            }
            Some(3) => {
                screen("REMOVE ACCOUNT", "Delete Cloudflare Account");
                match AccountStore::load(opts.accounts_file()).await {
                    Ok(mut accounts) => {
                        account::remove(&mut accounts, None, scanner).await
                    }
                    Err(err) => Err(err),
                }
            }
            Some(4) => return Ok(()),
            _ => Err(anyhow::anyhow!("Invalid choice")),
        };
        report(scanner, result).await?;
    }
}

async fn scripts_menu(opts: &ConfigOpts, scanner: &mut Scanner) -> Result<()> {
    loop {
        screen("SCRIPT URL MANAGEMENT", "Manage Worker Scripts");
        println!("1. 📋 List Script URLs");
        println!("2. ➕ Add Script URL");
        println!("3. 🗑️ Remove Script URL");
        println!("4. ⭐ Set Default URL");
        println!("5. 🔙 Back to Main Menu");
        println!();

        let choice = scanner.prompt_t::<usize>("Select action", "1-5").await?;
        if choice == Some(5) {
            return Ok(());
        }
        let result = match ScriptStore::load_or_init(opts.scripts_file()).await
        {
            Err(err) => Err(err),
            Ok(mut scripts) => match choice {
                Some(1) => {
                    screen("SCRIPT URL LIST", "Available Worker Scripts");
                    script::list(&scripts);
                    Ok(())
                }
                Some(2) => {
                    screen("ADD SCRIPT URL", "Add Custom Worker Script URL");
                    script::add(&mut scripts, AddScript::default(), scanner)
                        .await
                }
                Some(3) => {
                    screen("REMOVE SCRIPT URL", "Delete Worker Script");
                    script::remove(&mut scripts, None, scanner).await
                }
                Some(4) => {
                    screen(
                        "SET DEFAULT SCRIPT URL",
                        "Choose Default Worker Script",
                    );
                    script::set_default(&mut scripts, None, scanner).await
                }
                _ => Err(anyhow::anyhow!("Invalid choice")),
            },
        };
        report(scanner, result).await?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::models::ConfigOptsStore, testing::test_client};

    fn opts_for(dir: &tempfile::TempDir) -> ConfigOpts {
        ConfigOpts {
            store: Some(ConfigOptsStore {
                accounts: Some(dir.path().join("accounts.json")),
                scripts: Some(dir.path().join("github_urls.json")),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_main_choice_numbers() {
        assert_eq!(MainChoice::from_number(1), Some(MainChoice::Single));
        assert_eq!(MainChoice::from_number(6), Some(MainChoice::Exit));
        assert_eq!(MainChoice::from_number(0), None);
        assert_eq!(MainChoice::from_number(7), None);
    }

    #[tokio::test]
    async fn test_add_account_then_exit() {
        let dir = tempfile::tempdir().unwrap();
        let opts = opts_for(&dir);
        let mut scanner = Scanner::from_lines([
            "3",
            "2",
            "me@example.com",
            "0123456789abcdefXYZW",
            "",
            "4",
            "6",
        ]);
        main_menu(&opts, &test_client(), &mut scanner).await.unwrap();

        let accounts = AccountStore::load(opts.accounts_file()).await.unwrap();
        assert_eq!(accounts.len(), 1);
    }

    #[tokio::test]
    async fn test_errors_return_to_menu() {
        let dir = tempfile::tempdir().unwrap();
        let opts = opts_for(&dir);
        // An invalid email is reported, then the menu carries on.
        let mut scanner = Scanner::from_lines([
            "9", "", "3", "2", "bad", "key", "", "4", "5", "", "6",
        ]);
        main_menu(&opts, &test_client(), &mut scanner).await.unwrap();
        assert!(AccountStore::load(opts.accounts_file())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_abort_leaves_menu() {
        let dir = tempfile::tempdir().unwrap();
        let opts = opts_for(&dir);
        let mut scanner = Scanner::from_lines(["4", "exit"]);
        let err = main_menu(&opts, &test_client(), &mut scanner)
            .await
            .unwrap_err();
        assert!(is_aborted(&err));
    }
}
