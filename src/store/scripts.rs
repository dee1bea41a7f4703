use crate::{io, store::parse_index};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// The worker script used when no other is known.
pub const DEFAULT_SCRIPT_URL: &str =
    "https://raw.githubusercontent.com/vapaxemu/cli/refs/heads/main/worker.js";

/// A named worker script source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub is_default: bool,
}

impl Script {
    fn builtin() -> Self {
        Self {
            name: "Default Worker".to_string(),
            url: DEFAULT_SCRIPT_URL.to_string(),
            is_default: true,
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.is_default {
            write!(f, " (default)")?;
        }
        Ok(())
    }
}

/// The known worker scripts, backed by a JSON file.
#[derive(Debug, Clone)]
pub struct ScriptStore {
    path: PathBuf,
    scripts: Vec<Script>,
}

impl ScriptStore {
    /// Load the store at `path`, creating it with the built-in script when
    /// the file does not exist.
    pub async fn load_or_init(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_owned();
        let loaded = io::fs::load_json::<Vec<Script>>(&path)
            .await
            .with_context(|| {
                format!("loading script URLs from {}", path.display())
            })?;
        let store = match loaded {
            Some(scripts) => Self { path, scripts },
            None => {
                info!("creating script store at {}", path.display());
                let store = Self {
                    path,
                    scripts: vec![Script::builtin()],
                };
                store.save().await?;
                store
            }
        };
        debug!(
            "loaded {} script URLs from {}",
            store.scripts.len(),
            store.path.display()
        );
        Ok(store)
    }

    /// Write the store back to its file.
    pub async fn save(&self) -> Result<()> {
        io::fs::save_json(&self.scripts, &self.path)
            .await
            .with_context(|| {
                format!("saving script URLs to {}", self.path.display())
            })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn scripts(&self) -> &[Script] {
        &self.scripts
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// The URL deployments use when none is chosen: the flagged default,
    /// else the first entry, else the built-in script.
    pub fn default_url(&self) -> &str {
        self.scripts
            .iter()
            .find(|s| s.is_default)
            .or_else(|| self.scripts.first())
            .map(|s| s.url.as_str())
            .unwrap_or(DEFAULT_SCRIPT_URL)
    }

    /// Add a script. Names must be unique, ignoring case. The first script
    /// of an empty store becomes the default. Returns whether the new
    /// script is the default.
    pub fn add(
        &mut self,
        name: impl AsRef<str>,
        url: impl AsRef<str>,
    ) -> Result<bool> {
        let name = name.as_ref().trim();
        let url = url.as_ref().trim();
        anyhow::ensure!(!name.is_empty(), "script name is required");
        anyhow::ensure!(!url.is_empty(), "script URL is required");
        anyhow::ensure!(
            self.find_by_name(name).is_none(),
            "script name '{}' already exists",
            name
        );
        self.scripts.push(Script {
            name: name.to_owned(),
            url: url.to_owned(),
            is_default: false,
        });
        if self.scripts.len() == 1 {
            self.set_default(0)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Remove the script at a 0-based position. When the default is
    /// removed, the first remaining script becomes the default.
    pub fn remove(&mut self, idx: usize) -> Result<Script> {
        anyhow::ensure!(
            idx < self.scripts.len(),
            "no script at position {}",
            idx + 1
        );
        let removed = self.scripts.remove(idx);
        if removed.is_default && !self.scripts.is_empty() {
            self.set_default(0)?;
        }
        Ok(removed)
    }

    /// Make the script at a 0-based position the only default.
    pub fn set_default(&mut self, idx: usize) -> Result<&Script> {
        anyhow::ensure!(
            idx < self.scripts.len(),
            "no script at position {}",
            idx + 1
        );
        for (i, script) in self.scripts.iter_mut().enumerate() {
            script.is_default = i == idx;
        }
        Ok(&self.scripts[idx])
    }

    /// Find the position of a script by 1-based number, name or URL.
    pub fn find(&self, selector: &str) -> Option<usize> {
        parse_index(selector, self.scripts.len())
            .or_else(|| self.find_by_name(selector))
            .or_else(|| {
                let selector = selector.trim();
                self.scripts.iter().position(|s| s.url == selector)
            })
    }

    /// Resolve a selector to a script URL. Unknown `http(s)://` selectors
    /// are taken as URLs verbatim.
    pub fn resolve_url(&self, selector: &str) -> Option<String> {
        match self.find(selector) {
            Some(idx) => Some(self.scripts[idx].url.clone()),
            None => {
                let selector = selector.trim();
                (selector.starts_with("https://")
                    || selector.starts_with("http://"))
                .then(|| selector.to_owned())
            }
        }
    }

    fn find_by_name(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.scripts
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(name))
    }
}
