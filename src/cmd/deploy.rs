use crate::{
    cloudflare::requests::client,
    cmd::{account, confirm, resolve_credentials, script::select_url},
    config::models::ConfigOpts,
    deployer::{self, DeployResult},
    io::{term, Scanner},
    store::{AccountStore, ScriptStore},
};
use anyhow::{Context, Result};
use clap::Args;
use reqwest::Client;
use tracing::info;

/// Deploy a worker to one account.
#[derive(Debug, Clone, Default, Args)]
#[clap(name = "deploy")]
pub struct DeployCmd {
    /// The account number or email. Prompts when omitted.
    #[clap(short, long, value_name = "account")]
    pub account: Option<String>,
    /// The worker name. Prompts when omitted.
    #[clap(short, long, value_name = "name")]
    pub name: Option<String>,
    /// The script number, name or URL. Prompts when omitted.
    #[clap(short, long, value_name = "script")]
    pub script: Option<String>,
    /// Deploy without asking for confirmation.
    #[clap(short, long)]
    pub force: bool,
}

impl DeployCmd {
    #[tracing::instrument(level = "trace", skip(self, opts))]
    pub async fn run(self, opts: &ConfigOpts) -> Result<()> {
        let client = client(opts.timeout())?;
        let mut scanner = Scanner::new();
        single(opts, &client, self, &mut scanner).await
    }
}

/// Run a single deployment, prompting for anything not given in `args`.
///
/// A forced deployment without a script uses the default script URL.
pub async fn single(
    opts: &ConfigOpts,
    client: &Client,
    args: DeployCmd,
    scanner: &mut Scanner,
) -> Result<()> {
    let mut accounts = AccountStore::load(opts.accounts_file()).await?;
    let scripts = ScriptStore::load_or_init(opts.scripts_file()).await?;

    if opts.credentials().is_none() && accounts.is_empty() {
        term::warning("No accounts found. Please add an account first.");
        if confirm(scanner, "Do you want to add an account now?").await? {
            account::add(opts, &mut accounts, scanner).await?;
        }
    }
    let credentials =
        resolve_credentials(opts, &accounts, args.account.as_deref(), scanner)
            .await?;

    let worker_name = match args.name {
        Some(name) => name,
        None => scanner
            .prompt("\n🔧 Worker name", "text")
            .await?
            .unwrap_or_default(),
    };
    let worker_name = worker_name.trim().to_owned();
    anyhow::ensure!(!worker_name.is_empty(), "worker name is required");

    let script_url = match args.script.as_deref() {
        None if args.force => scripts.default_url().to_owned(),
        selector => select_url(&scripts, selector, scanner).await?,
    };

    println!("📊 DEPLOYMENT SUMMARY");
    println!("{}", term::LIGHT_RULE);
    println!("📧 Account: {}", credentials.email());
    println!("🔧 Worker: {}", worker_name);
    println!("📦 Script URL: {}", script_url);
    println!("{}", term::LIGHT_RULE);

    if !args.force && !confirm(scanner, "Proceed with deployment?").await? {
        term::info("Cancelled");
        return Ok(());
    }

    println!("🔄 Deploying {}...", worker_name);
    let result = deployer::deploy(
        client,
        &opts.deploy_url(),
        &credentials,
        &worker_name,
        &script_url,
    )
    .await
    .with_context(|| format!("deploying {worker_name}"))?;
    info!(worker = %worker_name, account = credentials.email(), "deployed");
    term::success("Worker deployed successfully!");
    print_result(&result)
}

/// Print the links of a deployed worker.
pub fn print_result(result: &DeployResult) -> Result<()> {
    println!("{}", term::HEAVY_RULE);
    term::success("DEPLOYMENT SUCCESSFUL");
    println!("{}", term::HEAVY_RULE);

    if let Some(sub) = result.subscription() {
        println!("\n📋 SUBSCRIPTION LINK");
        println!("🔗 {sub}");
    }
    if let Some(vless) = result.vless() {
        println!("\n🔰 VLESS CONFIG");
        println!("🔗 {vless}");
        if let Some(uuid) = result.vless_uuid()? {
            println!("🔑 UUID: {uuid}");
        }
    }
    if let Some(trojan) = result.trojan() {
        println!("\n⚡ TROJAN CONFIG");
        println!("🔗 {trojan}");
        if let Some(password) = result.trojan_password()? {
            println!("🔑 Password: {password}");
        }
    }

    println!("\n{}", term::HEAVY_RULE);
    term::info("Copy the URLs above into your client apps");
    println!("{}", term::HEAVY_RULE);
    Ok(())
}
