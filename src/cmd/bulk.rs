use crate::{
    cloudflare::requests::client,
    cmd::{confirm, script::select_url},
    config::models::ConfigOpts,
    credentials::Credentials,
    deployer::{self, parse_worker_names, Deployment},
    io::{term, Scanner},
    store::{AccountStore, ScriptStore},
};
use anyhow::Result;
use clap::Args;
use reqwest::Client;
use tracing::{info, warn};

/// Deploy workers to every stored account.
#[derive(Debug, Clone, Default, Args)]
#[clap(name = "bulk")]
pub struct BulkCmd {
    /// Comma separated worker names. Prompts when omitted.
    #[clap(short, long, value_name = "names")]
    pub names: Option<String>,
    /// The script number, name or URL. Prompts when omitted.
    #[clap(short, long, value_name = "script")]
    pub script: Option<String>,
    /// Deploy without asking for confirmation.
    #[clap(short, long)]
    pub force: bool,
}

impl BulkCmd {
    #[tracing::instrument(level = "trace", skip(self, opts))]
    pub async fn run(self, opts: &ConfigOpts) -> Result<()> {
        let client = client(opts.timeout())?;
        let mut scanner = Scanner::new();
        bulk(opts, &client, self, &mut scanner).await
    }
}

/// Deploy every worker name to every account, one after another.
///
/// Configured credentials replace the stored accounts. A forced run
/// without a script uses the default script URL. Fails when any
/// deployment failed.
pub async fn bulk(
    opts: &ConfigOpts,
    client: &Client,
    args: BulkCmd,
    scanner: &mut Scanner,
) -> Result<()> {
    let accounts: Vec<Credentials> = match opts.credentials() {
        Some(credentials) => vec![credentials?],
        None => AccountStore::load(opts.accounts_file())
            .await?
            .accounts()
            .to_vec(),
    };
    anyhow::ensure!(
        !accounts.is_empty(),
        "no credentials were provided, add accounts first"
    );
    let scripts = ScriptStore::load_or_init(opts.scripts_file()).await?;

    let names_input = match args.names {
        Some(names) => names,
        None => scanner
            .prompt("🔧 Worker names (separate with comma)", "text")
            .await?
            .unwrap_or_default(),
    };
    let worker_names = parse_worker_names(&names_input);
    anyhow::ensure!(
        !worker_names.is_empty(),
        "please enter at least one worker name"
    );

    let script_url = match args.script.as_deref() {
        None if args.force => scripts.default_url().to_owned(),
        selector => select_url(&scripts, selector, scanner).await?,
    };
    let total = worker_names.len() * accounts.len();

    println!("📊 BULK DEPLOYMENT SUMMARY");
    println!("{}", term::LIGHT_RULE);
    println!("🔧 Workers: {}", worker_names.join(", "));
    println!("👥 Accounts: {} accounts", accounts.len());
    println!("📦 Script URL: {}", script_url);
    println!("📊 Total deployments: {}", total);
    println!("{}", term::LIGHT_RULE);

    if !args.force && !confirm(scanner, "Proceed with bulk deployment?").await?
    {
        term::info("Cancelled");
        return Ok(());
    }

    let deploy_url = opts.deploy_url();
    let mut deployments = Vec::with_capacity(total);
    for credentials in &accounts {
        for worker_name in &worker_names {
            println!(
                "\n🔄 [{}/{}] Deploying {} to {}",
                deployments.len() + 1,
                total,
                worker_name,
                credentials.email()
            );
            let outcome = deployer::deploy(
                client,
                &deploy_url,
                credentials,
                worker_name,
                &script_url,
            )
            .await
            .map_err(|err| format!("{err:#}"));
            match &outcome {
                Ok(_) => {
                    info!(
                        worker = %worker_name,
                        account = credentials.email(),
                        "deployed"
                    );
                    println!("✅ Success");
                }
                Err(err) => {
                    warn!(
                        worker = %worker_name,
                        account = credentials.email(),
                        "deploy failed: {err}"
                    );
                    println!("❌ Failed");
                }
            }
            deployments.push(Deployment {
                account: credentials.email().to_owned(),
                worker: worker_name.clone(),
                outcome,
            });
        }
    }

    let failed = print_summary(&deployments);
    anyhow::ensure!(
        failed == 0,
        "{} of {} deployments failed",
        failed,
        deployments.len()
    );
    Ok(())
}

/// Print the bulk summary and return the number of failures.
pub fn print_summary(deployments: &[Deployment]) -> usize {
    let successful = deployments.iter().filter(|d| d.is_success()).count();
    let failed = deployments.len() - successful;

    println!("\n📊 BULK DEPLOYMENT SUMMARY");
    println!("{}", term::HEAVY_RULE);
    term::success(format!("Successful: {successful}"));
    term::error(format!("Failed: {failed}"));
    term::info(format!("Total: {}", deployments.len()));
    println!("{}", term::HEAVY_RULE);

    if successful > 0 {
        println!("\n✅ SUCCESSFUL DEPLOYMENTS:");
        for d in deployments.iter().filter(|d| d.is_success()) {
            println!("• {} on {}", d.worker, d.account);
        }
    }
    if failed > 0 {
        println!("\n❌ FAILED DEPLOYMENTS:");
        for d in deployments {
            if let Err(err) = &d.outcome {
                println!("• {} on {}: {}", d.worker, d.account, err);
            }
        }
    }
    failed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::models::{ConfigOptsDeploy, ConfigOptsStore},
        deployer::DeployResult,
        testing::{serve, test_client},
    };

    fn opts_for(dir: &tempfile::TempDir, deploy_url: &str) -> ConfigOpts {
        ConfigOpts {
            auth: None,
            store: Some(ConfigOptsStore {
                accounts: Some(dir.path().join("accounts.json")),
                scripts: Some(dir.path().join("github_urls.json")),
            }),
            deploy: Some(ConfigOptsDeploy {
                url: Some(deploy_url.to_owned()),
                api_base: None,
                timeout: Some(5),
            }),
        }
    }

    async fn seed_account(opts: &ConfigOpts) {
        let mut accounts =
            AccountStore::load(opts.accounts_file()).await.unwrap();
        accounts
            .add(Credentials::new("a@example.com", "k").unwrap())
            .unwrap();
        accounts.save().await.unwrap();
    }

    #[test]
    fn test_print_summary_counts_failures() {
        let deployments = vec![
            Deployment {
                account: "a@example.com".into(),
                worker: "one".into(),
                outcome: Ok(DeployResult::default()),
            },
            Deployment {
                account: "a@example.com".into(),
                worker: "two".into(),
                outcome: Err("HTTP 500: down".into()),
            },
        ];
        assert_eq!(print_summary(&deployments), 1);
        assert_eq!(print_summary(&deployments[..1]), 0);
    }

    #[tokio::test]
    async fn test_requires_accounts() {
        let dir = tempfile::tempdir().unwrap();
        let opts = opts_for(&dir, "http://127.0.0.1:9/");
        let mut scanner = Scanner::from_lines(Vec::<String>::new());
        let err = bulk(&opts, &test_client(), BulkCmd::default(), &mut scanner)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no credentials were provided"));
    }

    #[tokio::test]
    async fn test_requires_worker_names() {
        let dir = tempfile::tempdir().unwrap();
        let opts = opts_for(&dir, "http://127.0.0.1:9/");
        seed_account(&opts).await;

        let mut scanner = Scanner::from_lines([" , "]);
        let err = bulk(&opts, &test_client(), BulkCmd::default(), &mut scanner)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("at least one worker name"));
    }

    #[tokio::test]
    async fn test_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        let opts = opts_for(&dir, "http://127.0.0.1:9/");
        seed_account(&opts).await;

        let mut scanner = Scanner::from_lines(["a, b", "", "n"]);
        bulk(&opts, &test_client(), BulkCmd::default(), &mut scanner)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_partial_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let (url, server) = serve(&[
            (200, r#"{"success": true, "sub": "https://one.example/sub"}"#),
            (500, "upstream down"),
        ])
        .await;
        let opts = opts_for(&dir, &url);
        seed_account(&opts).await;

        let args = BulkCmd {
            names: Some("one, two".into()),
            script: None,
            force: true,
        };
        // Forced runs never prompt, even for the script.
        let mut scanner = Scanner::from_lines(Vec::<String>::new());
        let err = bulk(&opts, &test_client(), args, &mut scanner)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 deployments failed");

        let requests = server.await.unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].contains(r#""workerName":"one""#));
        assert!(requests[1].contains(r#""workerName":"two""#));
    }

    #[tokio::test]
    async fn test_all_deployed() {
        let dir = tempfile::tempdir().unwrap();
        let ok = r#"{"success": true}"#;
        let (url, server) = serve(&[(200, ok), (200, ok)]).await;
        let opts = opts_for(&dir, &url);
        seed_account(&opts).await;

        let args = BulkCmd {
            names: Some("one,two".into()),
            script: Some("1".into()),
            force: true,
        };
        let mut scanner = Scanner::from_lines(Vec::<String>::new());
        bulk(&opts, &test_client(), args, &mut scanner)
            .await
            .unwrap();
        assert_eq!(server.await.unwrap().len(), 2);
    }
}
