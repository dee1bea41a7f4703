use crate::{cloudflare::models::CloudflareResponse, credentials::Credentials};
use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::{fmt::Display, time::Duration};
use tracing::debug;

/// Build the HTTP client shared by every request of a run.
pub fn client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("cfworker/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("error building HTTP client")
}

/// Join a base URL and an endpoint with exactly one slash between them.
pub fn join(base: impl Display, endpoint: impl Display) -> String {
    let base = base.to_string();
    let endpoint = endpoint.to_string();
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Issue an authenticated GET and decode the Cloudflare envelope.
pub async fn get<T>(
    client: &Client,
    base: impl Display,
    endpoint: impl Display,
    credentials: &Credentials,
) -> Result<T>
where
    T: DeserializeOwned,
{
    let url = join(base, endpoint);
    debug!(email = credentials.email(), "GET {}", url);
    let bytes = client
        .get(&url)
        .header("X-Auth-Email", credentials.email())
        .header("X-Auth-Key", credentials.api_key())
        .header("Content-Type", "application/json")
        .send()
        .await
        .context("error sending HTTP request")?
        .bytes()
        .await
        .context("error retrieving HTTP response bytes")?;
    decode(&bytes)
}

/// Decode a Cloudflare payload, turning `success: false` into an error
/// whose context lists every reported error.
pub fn decode<T>(bytes: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let cf_resp: CloudflareResponse = serde_json::from_slice(bytes)
        .context("error deserializing cloudflare metadata")?;
    if cf_resp.success {
        return serde_json::from_slice(bytes)
            .context("error deserializing cloudflare payload");
    }
    let mut context_chain = anyhow!("unsuccessful cloudflare status");
    for err in cf_resp.errors {
        if let Some(ref messages) = err.error_chain {
            for message in messages {
                context_chain =
                    context_chain.context(format!("  - error {}", message));
            }
        }
        context_chain = context_chain.context(format!("error {}", err));
    }
    Err(context_chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloudflare::models::{ResultResponse, User};

    #[test]
    fn test_join() {
        assert_eq!(join("https://a/v4/", "/user"), "https://a/v4/user");
        assert_eq!(join("https://a/v4", "user"), "https://a/v4/user");
    }

    #[test]
    fn test_decode_success() {
        let resp: ResultResponse<User> = decode(
            br#"{"success": true, "errors": [], "messages": [],
                 "result": {"id": "u1", "email": "me@example.com"}}"#,
        )
        .unwrap();
        assert_eq!(resp.result.email, "me@example.com");
    }

    #[test]
    fn test_decode_failure_chain() {
        let err = decode::<ResultResponse<User>>(
            br#"{"success": false, "result": null, "errors": [
                {"code": 9103, "message": "Unknown X-Auth-Key or X-Auth-Email",
                 "error_chain": [{"code": 6003, "message": "Invalid request headers"}]}
            ]}"#,
        )
        .unwrap_err();
        let chain = format!("{:?}", err);
        assert!(err.to_string().contains("9103"));
        assert!(chain.contains("6003: Invalid request headers"));
        assert!(chain.contains("unsuccessful cloudflare status"));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(decode::<ResultResponse<User>>(b"<html>").is_err());
    }
}
