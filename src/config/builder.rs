use crate::config::models::{
    ConfigOpts, ConfigOptsAuth, ConfigOptsDeploy, ConfigOptsStore,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A builder for configuration options.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConfigBuilder {
    pub auth: Option<ConfigOptsAuth>,
    pub store: Option<ConfigOptsStore>,
    pub deploy: Option<ConfigOptsDeploy>,
}

impl ConfigBuilder {
    /// Create a new config opts builder.
    pub(crate) fn new() -> Self {
        Self {
            auth: None,
            store: None,
            deploy: None,
        }
    }

    /// Merge config layers, where the `greater` layer takes precedence.
    pub fn merge(&mut self, greater: impl Into<Self>) -> &mut Self {
        let mut greater = greater.into();
        self.auth = match (self.auth.take(), greater.auth.take()) {
            (None, None) => None,
            (Some(val), None) | (None, Some(val)) => Some(val),
            (Some(l), Some(mut g)) => {
                g.email = g.email.or(l.email);
                g.key = g.key.or(l.key);
                Some(g)
            }
        };
        self.store = match (self.store.take(), greater.store.take()) {
            (None, None) => None,
            (Some(val), None) | (None, Some(val)) => Some(val),
            (Some(l), Some(mut g)) => {
                g.accounts = g.accounts.or(l.accounts);
                g.scripts = g.scripts.or(l.scripts);
                Some(g)
            }
        };
        self.deploy = match (self.deploy.take(), greater.deploy.take()) {
            (None, None) => None,
            (Some(val), None) | (None, Some(val)) => Some(val),
            (Some(l), Some(mut g)) => {
                g.url = g.url.or(l.url);
                g.api_base = g.api_base.or(l.api_base);
                g.timeout = g.timeout.or(l.timeout);
                Some(g)
            }
        };
        self
    }

    /// Initialize the account email.
    pub fn auth_email(
        &mut self,
        email: Option<impl Into<String>>,
    ) -> &mut Self {
        self.auth.get_or_insert_with(Default::default).email =
            email.map(|e| e.into());
        self
    }

    /// Initialize the Global API Key.
    pub fn auth_key(&mut self, key: Option<impl Into<String>>) -> &mut Self {
        self.auth.get_or_insert_with(Default::default).key =
            key.map(|k| k.into());
        self
    }

    /// Initialize the account store path.
    pub fn store_accounts(&mut self, path: Option<PathBuf>) -> &mut Self {
        self.store.get_or_insert_with(Default::default).accounts = path;
        self
    }

    /// Initialize the script store path.
    pub fn store_scripts(&mut self, path: Option<PathBuf>) -> &mut Self {
        self.store.get_or_insert_with(Default::default).scripts = path;
        self
    }

    /// Initialize the deploy API endpoint.
    pub fn deploy_url(&mut self, url: Option<impl Into<String>>) -> &mut Self {
        self.deploy.get_or_insert_with(Default::default).url =
            url.map(|u| u.into());
        self
    }

    /// Initialize the Cloudflare API base URL.
    pub fn deploy_api_base(
        &mut self,
        api_base: Option<impl Into<String>>,
    ) -> &mut Self {
        self.deploy.get_or_insert_with(Default::default).api_base =
            api_base.map(|b| b.into());
        self
    }

    /// Initialize the request timeout, in seconds.
    pub fn deploy_timeout(&mut self, timeout: Option<u64>) -> &mut Self {
        self.deploy.get_or_insert_with(Default::default).timeout = timeout;
        self
    }

    /// Build a configuration options model.
    pub fn build(&self) -> ConfigOpts {
        ConfigOpts {
            auth: {
                let auth = self.auth.as_ref();
                Some(ConfigOptsAuth {
                    email: auth.and_then(|o| o.email.clone()),
                    key: auth.and_then(|o| o.key.clone()),
                })
            },
            store: {
                let store = self.store.as_ref();
                Some(ConfigOptsStore {
                    accounts: store.and_then(|o| o.accounts.clone()),
                    scripts: store.and_then(|o| o.scripts.clone()),
                })
            },
            deploy: {
                let deploy = self.deploy.as_ref();
                Some(ConfigOptsDeploy {
                    url: deploy.and_then(|o| o.url.clone()),
                    api_base: deploy.and_then(|o| o.api_base.clone()),
                    timeout: deploy.and_then(|o| o.timeout),
                })
            },
        }
    }
}

impl From<ConfigOpts> for ConfigBuilder {
    fn from(opts: ConfigOpts) -> Self {
        Self {
            auth: opts.auth,
            store: opts.store,
            deploy: opts.deploy,
        }
    }
}

impl From<Option<ConfigOpts>> for ConfigBuilder {
    fn from(opts: Option<ConfigOpts>) -> Self {
        match opts {
            None => Self::new(),
            Some(o) => o.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greater_layer_wins() {
        let file = ConfigOpts::builder()
            .auth_email(Some("file@example.com"))
            .auth_key(Some("file-key"))
            .deploy_timeout(Some(10))
            .build();
        let cli = ConfigOpts::builder()
            .auth_email(Some("cli@example.com"))
            .build();
        let opts = ConfigOpts::builder().merge(file).merge(cli).build();

        let auth = opts.auth.unwrap();
        assert_eq!(auth.email.as_deref(), Some("cli@example.com"));
        assert_eq!(auth.key.as_deref(), Some("file-key"));
        assert_eq!(opts.deploy.unwrap().timeout, Some(10));
    }

    #[test]
    fn test_empty_layers_keep_values() {
        let file = ConfigOpts::builder()
            .store_accounts(Some("/data/accounts.json".into()))
            .build();
        let opts = ConfigOpts::builder()
            .merge(file)
            .merge(ConfigOpts::default())
            .merge(None::<ConfigOpts>)
            .build();
        assert_eq!(
            opts.store.unwrap().accounts,
            Some(PathBuf::from("/data/accounts.json"))
        );
    }

    #[test]
    fn test_build_fills_every_section() {
        let opts = ConfigOpts::builder().build();
        assert!(opts.auth.is_some());
        assert!(opts.store.is_some());
        assert!(opts.deploy.is_some());
    }
}
