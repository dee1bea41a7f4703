use crate::{credentials::Credentials, io, store::parse_index};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The stored Cloudflare accounts, backed by a JSON file.
#[derive(Debug, Clone)]
pub struct AccountStore {
    path: PathBuf,
    accounts: Vec<Credentials>,
}

impl AccountStore {
    /// Load the store at `path`. A missing file is an empty store.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_owned();
        let accounts = io::fs::load_json::<Vec<Credentials>>(&path)
            .await
            .with_context(|| {
                format!("loading accounts from {}", path.display())
            })?
            .unwrap_or_default();
        debug!("loaded {} accounts from {}", accounts.len(), path.display());
        Ok(Self { path, accounts })
    }

    /// Write the store back to its file.
    pub async fn save(&self) -> Result<()> {
        io::fs::save_json(&self.accounts, &self.path)
            .await
            .with_context(|| {
                format!("saving accounts to {}", self.path.display())
            })?;
        debug!(
            "saved {} accounts to {}",
            self.accounts.len(),
            self.path.display()
        );
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn accounts(&self) -> &[Credentials] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Add an account. Emails must be unique, ignoring case.
    pub fn add(&mut self, credentials: Credentials) -> Result<()> {
        anyhow::ensure!(
            self.find_by_email(credentials.email()).is_none(),
            "account {} already exists",
            credentials.email()
        );
        self.accounts.push(credentials);
        Ok(())
    }

    /// Remove the account at a 0-based position.
    pub fn remove(&mut self, idx: usize) -> Result<Credentials> {
        anyhow::ensure!(
            idx < self.accounts.len(),
            "no account at position {}",
            idx + 1
        );
        Ok(self.accounts.remove(idx))
    }

    /// Find the position of an account by 1-based number or email.
    pub fn find(&self, selector: &str) -> Option<usize> {
        parse_index(selector, self.accounts.len())
            .or_else(|| self.find_by_email(selector))
    }

    fn find_by_email(&self, email: &str) -> Option<usize> {
        let email = email.trim();
        self.accounts
            .iter()
            .position(|a| a.email().eq_ignore_ascii_case(email))
    }
}
