use crate::{
    credentials::Credentials,
    deployer::models::{DeployRequest, DeployResponse, DeployResult},
};
use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

/// Deploy `worker_name` built from `script_url` to the account behind
/// `credentials`.
#[instrument(level = "trace", skip(client, credentials))]
pub async fn deploy(
    client: &Client,
    deploy_url: &str,
    credentials: &Credentials,
    worker_name: &str,
    script_url: &str,
) -> Result<DeployResult> {
    let worker_name = worker_name.trim();
    anyhow::ensure!(!worker_name.is_empty(), "worker name is required");

    let body = DeployRequest {
        email: credentials.email(),
        global_api_key: credentials.api_key(),
        worker_name,
        github_url: script_url,
    };
    debug!(email = credentials.email(), "POST {}", deploy_url);
    let resp = client
        .post(deploy_url)
        .json(&body)
        .send()
        .await
        .context("error sending deploy request")?;

    let status = resp.status();
    let text = resp
        .text()
        .await
        .context("error retrieving deploy response")?;
    debug!(%status, "deploy API answered");
    anyhow::ensure!(
        status == StatusCode::OK,
        "HTTP {}: {}",
        status.as_u16(),
        text
    );

    let resp: DeployResponse = serde_json::from_str(&text)
        .context("error deserializing deploy response")?;
    anyhow::ensure!(
        resp.success,
        "deployment failed: {}",
        resp.error.as_deref().unwrap_or("Unknown error")
    );
    Ok(resp.result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{serve_once, test_client};

    fn creds() -> Credentials {
        Credentials::new("me@example.com", "0123456789abcdefXYZW").unwrap()
    }

    #[tokio::test]
    async fn test_deploy_success() {
        let (url, server) = serve_once(
            200,
            r#"{"success": true, "sub": "https://edge.example/sub",
                "vless": "vless://uuid-1@edge.example:443",
                "trojan": "trojan://pw@edge.example:443"}"#,
        )
        .await;

        let result =
            deploy(&test_client(), &url, &creds(), " edge ", "https://x/w.js")
                .await
                .unwrap();
        assert_eq!(result.vless_uuid().unwrap().as_deref(), Some("uuid-1"));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST / "));
        assert!(request.contains(r#""workerName":"edge""#));
        assert!(request.contains(r#""globalAPIKey":"0123456789abcdefXYZW""#));
        assert!(request.contains(r#""githubUrl":"https://x/w.js""#));
    }

    #[tokio::test]
    async fn test_deploy_reported_failure() {
        let (url, _server) =
            serve_once(200, r#"{"success": false, "error": "quota exceeded"}"#)
                .await;
        let err = deploy(&test_client(), &url, &creds(), "edge", "https://x")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "deployment failed: quota exceeded");
    }

    #[tokio::test]
    async fn test_deploy_failure_without_message() {
        let (url, _server) = serve_once(200, r#"{"success": false}"#).await;
        let err = deploy(&test_client(), &url, &creds(), "edge", "https://x")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "deployment failed: Unknown error");
    }

    #[tokio::test]
    async fn test_deploy_http_error() {
        let (url, _server) = serve_once(500, "upstream down").await;
        let err = deploy(&test_client(), &url, &creds(), "edge", "https://x")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500: upstream down");
    }

    #[tokio::test]
    async fn test_blank_worker_name_sends_nothing() {
        let err = deploy(
            &test_client(),
            "http://127.0.0.1:9/",
            &creds(),
            "   ",
            "https://x",
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("worker name is required"));
    }
}
