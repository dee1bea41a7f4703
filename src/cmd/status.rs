use crate::{
    config::models::ConfigOpts,
    io::term,
    store::{AccountStore, ScriptStore},
};
use anyhow::Result;

/// Print file locations, counts and the default script.
pub async fn status(opts: &ConfigOpts) -> Result<()> {
    let accounts = AccountStore::load(opts.accounts_file()).await?;
    let scripts = ScriptStore::load_or_init(opts.scripts_file()).await?;

    println!("📊 SYSTEM STATUS");
    println!("{}", term::HEAVY_RULE);
    println!("📁 Accounts file: {}", accounts.path().display());
    println!("📁 Scripts file: {}", scripts.path().display());
    println!("🚀 Deploy URL: {}", opts.deploy_url());
    println!("🔗 Default script URL: {}", scripts.default_url());
    println!("👥 Accounts count: {}", accounts.len());
    println!("📦 Script URLs count: {}", scripts.len());

    if !accounts.is_empty() {
        println!("\n📋 REGISTERED ACCOUNTS:");
        for account in accounts.accounts() {
            println!("  • {}", account.email());
        }
    }
    if !scripts.is_empty() {
        println!("\n📦 SCRIPT URLS:");
        for script in scripts.scripts() {
            println!("  • {script}");
        }
    }
    println!("{}", term::HEAVY_RULE);
    Ok(())
}
