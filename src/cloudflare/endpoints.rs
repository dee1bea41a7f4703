use crate::{
    cloudflare::{
        models::{Account, ResultResponse, User},
        requests,
    },
    credentials::Credentials,
};
use anyhow::{Context, Result};
use reqwest::Client;
use std::fmt::Display;
use tracing::debug;

/// Return the user the credentials belong to.
pub async fn verify(
    client: &Client,
    base: impl Display,
    credentials: &Credentials,
) -> Result<User> {
    let resp: ResultResponse<User> =
        requests::get(client, base, "user", credentials)
            .await
            .context("error verifying credentials")?;
    Ok(resp.result)
}

/// Return the accounts the credentials can reach.
pub async fn accounts(
    client: &Client,
    base: impl Display,
    credentials: &Credentials,
) -> Result<Vec<Account>> {
    let resp: ResultResponse<Vec<Account>> =
        requests::get(client, base, "accounts?per_page=50", credentials)
            .await
            .context("error resolving accounts endpoint")?;
    debug!("collected {} accounts", resp.result.len());
    Ok(resp.result)
}
