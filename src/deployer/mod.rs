//! Worker deploy API client.
//!
//! The deploy API takes the account credentials, a worker name and the URL
//! of a worker script, performs the deployment on the account and answers
//! with the connection links of the new worker.

pub mod models;
pub mod requests;

pub use models::{DeployResult, Deployment};
pub use requests::deploy;

/// Split a comma separated list of worker names, dropping blanks.
pub fn parse_worker_names(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}
