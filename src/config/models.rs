use crate::{
    cloudflare::API_BASE,
    config::{
        builder::ConfigBuilder, default_config_path, DEFAULT_ACCOUNTS_FILE,
        DEFAULT_DEPLOY_URL, DEFAULT_SCRIPTS_FILE, DEFAULT_TIMEOUT_SECS,
    },
    credentials::Credentials,
};
use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};
use tracing::debug;

/// A model of all potential configuration options for the CFWORKER CLI
/// system.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConfigOpts {
    pub auth: Option<ConfigOptsAuth>,
    pub store: Option<ConfigOptsStore>,
    pub deploy: Option<ConfigOptsDeploy>,
}

impl ConfigOpts {
    /// Create a new builder for configuration options.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Read runtime config from a target path.
    ///
    /// A missing file is not an error and yields an empty layer.
    pub fn from_file(path: Option<PathBuf>) -> Result<Self> {
        let mut cfg_path = path.unwrap_or_else(default_config_path);
        if !cfg_path.exists() {
            debug!("no config file at {}", cfg_path.display());
            return Ok(Default::default());
        }
        if !cfg_path.is_absolute() {
            cfg_path = cfg_path.canonicalize().with_context(|| {
                format!(
                    "could not canonicalize path to config file {:?}",
                    &cfg_path
                )
            })?;
        }
        debug!("reading config file {}", cfg_path.display());
        let contents = std::fs::read_to_string(&cfg_path)
            .context("reading config file")?;
        Self::from_toml(&contents)
    }

    /// Parse a config layer from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .context("reading config file contents as TOML data")
    }

    /// Read runtime config from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(ConfigOpts {
            auth: Some(
                envy::prefixed("CFWORKER_AUTH_")
                    .from_env::<ConfigOptsAuth>()
                    .context("reading auth env var config")?,
            ),
            store: Some(
                envy::prefixed("CFWORKER_STORE_")
                    .from_env::<ConfigOptsStore>()
                    .context("reading store env var config")?,
            ),
            deploy: Some(
                envy::prefixed("CFWORKER_DEPLOY_")
                    .from_env::<ConfigOptsDeploy>()
                    .context("reading deploy env var config")?,
            ),
        })
    }

    /// The credentials named by configuration, if any were provided.
    ///
    /// Returns `None` when neither an email nor a key is configured, and an
    /// error when only one half is present or the values are invalid.
    pub fn credentials(&self) -> Option<Result<Credentials>> {
        let auth = self.auth.as_ref()?;
        match (auth.email.as_ref(), auth.key.as_ref()) {
            (None, None) => None,
            (Some(email), Some(key)) => Some(Credentials::new(email, key)),
            (Some(_), None) => Some(Err(anyhow::anyhow!(
                "an email was configured without an API key"
            ))),
            (None, Some(_)) => Some(Err(anyhow::anyhow!(
                "an API key was configured without an email"
            ))),
        }
    }

    /// The location of the account store.
    pub fn accounts_file(&self) -> PathBuf {
        self.store
            .as_ref()
            .and_then(|s| s.accounts.clone())
            .unwrap_or_else(|| DEFAULT_ACCOUNTS_FILE.into())
    }

    /// The location of the script store.
    pub fn scripts_file(&self) -> PathBuf {
        self.store
            .as_ref()
            .and_then(|s| s.scripts.clone())
            .unwrap_or_else(|| DEFAULT_SCRIPTS_FILE.into())
    }

    /// The deploy API endpoint.
    pub fn deploy_url(&self) -> String {
        self.deploy
            .as_ref()
            .and_then(|d| d.url.clone())
            .unwrap_or_else(|| DEFAULT_DEPLOY_URL.to_string())
    }

    /// The Cloudflare API base URL.
    pub fn api_base(&self) -> String {
        self.deploy
            .as_ref()
            .and_then(|d| d.api_base.clone())
            .unwrap_or_else(|| API_BASE.to_string())
    }

    /// The timeout applied to every HTTP request.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.deploy
                .as_ref()
                .and_then(|d| d.timeout)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }
}

/// Config options for authenticating with Cloudflare.
#[derive(Clone, Default, Serialize, Deserialize, Args)]
pub struct ConfigOptsAuth {
    /// Your Cloudflare account email.
    #[clap(short, long, global = true, value_name = "email")]
    pub email: Option<String>,
    /// Your Cloudflare Global API Key.
    #[clap(short, long, global = true, value_name = "key")]
    pub key: Option<String>,
}

impl std::fmt::Debug for ConfigOptsAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigOptsAuth")
            .field("email", &self.email)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Config options for the local account and script stores.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Args)]
pub struct ConfigOptsStore {
    /// The account store file. [default: accounts.json]
    #[clap(long = "accounts-file", global = true, value_name = "file")]
    pub accounts: Option<PathBuf>,
    /// The script URL store file. [default: github_urls.json]
    #[clap(long = "scripts-file", global = true, value_name = "file")]
    pub scripts: Option<PathBuf>,
}

/// Config options for the HTTP endpoints.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Args)]
pub struct ConfigOptsDeploy {
    /// The deploy API endpoint.
    #[clap(long = "deploy-url", global = true, value_name = "url")]
    pub url: Option<String>,
    /// The Cloudflare API base URL.
    #[clap(long, global = true, value_name = "url")]
    pub api_base: Option<String>,
    /// The HTTP request timeout.
    #[clap(long, global = true, value_name = "seconds")]
    pub timeout: Option<u64>,
}
