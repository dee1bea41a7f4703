//! CFWORKER config.
//!
//! CFWORKER takes the typical layered configuration approach. There are 3
//! layers. The config file is the base, which is then superseded by
//! environment variables, which are finally superseded by CLI arguments and
//! options.

use directories::ProjectDirs;
use std::path::PathBuf;

pub mod builder;
pub mod display;
pub mod models;

/// The deploy API used when none is configured.
pub const DEFAULT_DEPLOY_URL: &str = "https://api.cflifetime.workers.dev/";

/// The request timeout in seconds used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The account store file used when none is configured.
pub const DEFAULT_ACCOUNTS_FILE: &str = "accounts.json";

/// The script store file used when none is configured.
pub const DEFAULT_SCRIPTS_FILE: &str = "github_urls.json";

/// Returns the default configuration path,
/// `$XDG_CONFIG_HOME/cfworker/config.toml` on Linux.
pub fn default_config_path() -> PathBuf {
    ProjectDirs::from("", "", "cfworker")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("cfworker.toml"))
}
