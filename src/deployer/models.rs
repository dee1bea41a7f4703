use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The body posted to the deploy API.
#[derive(Debug, Serialize)]
pub struct DeployRequest<'a> {
    pub email: &'a str,
    #[serde(rename = "globalAPIKey")]
    pub global_api_key: &'a str,
    #[serde(rename = "workerName")]
    pub worker_name: &'a str,
    #[serde(rename = "githubUrl")]
    pub github_url: &'a str,
}

/// The deploy API answer.
#[derive(Debug, Deserialize)]
pub struct DeployResponse {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
    #[serde(flatten)]
    pub result: DeployResult,
}

/// The links of a deployed worker.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeployResult {
    pub sub: Option<String>,
    pub vless: Option<String>,
    pub trojan: Option<String>,
}

/// The credential between `scheme://` and `@` of a proxy link.
fn link_credential(link: &str, scheme: &str) -> Result<Option<String>> {
    let pattern = Regex::new(r"(vless|trojan)://([^@]*)@")
        .context("error compiling link pattern")?;
    Ok(pattern
        .captures(link)
        .filter(|caps| &caps[1] == scheme)
        .map(|caps| caps[2].to_owned()))
}

impl DeployResult {
    /// The subscription link, if one was returned.
    pub fn subscription(&self) -> Option<&str> {
        non_empty(&self.sub)
    }

    pub fn vless(&self) -> Option<&str> {
        non_empty(&self.vless)
    }

    pub fn trojan(&self) -> Option<&str> {
        non_empty(&self.trojan)
    }

    /// The UUID embedded in the VLESS link.
    pub fn vless_uuid(&self) -> Result<Option<String>> {
        match self.vless() {
            Some(link) => link_credential(link, "vless"),
            None => Ok(None),
        }
    }

    /// The password embedded in the Trojan link.
    pub fn trojan_password(&self) -> Result<Option<String>> {
        match self.trojan() {
            Some(link) => link_credential(link, "trojan"),
            None => Ok(None),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// The outcome of deploying one worker to one account.
#[derive(Debug)]
pub struct Deployment {
    pub account: String,
    pub worker: String,
    pub outcome: Result<DeployResult, String>,
}

impl Deployment {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_field_names() {
        let req = DeployRequest {
            email: "me@example.com",
            global_api_key: "key",
            worker_name: "edge",
            github_url: "https://x/worker.js",
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({
                "email": "me@example.com",
                "globalAPIKey": "key",
                "workerName": "edge",
                "githubUrl": "https://x/worker.js",
            })
        );
    }

    #[test]
    fn test_response_ignores_unknown_fields() {
        let resp: DeployResponse = serde_json::from_str(
            r#"{"success": true, "sub": "https://edge.workers.dev/sub",
                "vless": "", "worker": {"id": 1}}"#,
        )
        .unwrap();
        assert!(resp.success);
        assert_eq!(
            resp.result.subscription(),
            Some("https://edge.workers.dev/sub")
        );
        assert_eq!(resp.result.vless(), None);
    }

    #[test]
    fn test_link_credentials() {
        let result = DeployResult {
            sub: None,
            vless: Some(
                "vless://1b6e-42@edge.workers.dev:443?path=%2F#edge".into(),
            ),
            trojan: Some("trojan://s3cret@edge.workers.dev:443#edge".into()),
        };
        assert_eq!(result.vless_uuid().unwrap().as_deref(), Some("1b6e-42"));
        assert_eq!(
            result.trojan_password().unwrap().as_deref(),
            Some("s3cret")
        );
    }

    #[test]
    fn test_link_without_credential() {
        let result = DeployResult {
            vless: Some("vless://edge.workers.dev".into()),
            trojan: Some("https://not-trojan".into()),
            ..Default::default()
        };
        assert_eq!(result.vless_uuid().unwrap(), None);
        assert_eq!(result.trojan_password().unwrap(), None);

        let swapped = DeployResult {
            vless: Some("trojan://pw@edge.workers.dev:443".into()),
            ..Default::default()
        };
        assert_eq!(swapped.vless_uuid().unwrap(), None);
    }
}
