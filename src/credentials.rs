//! Cloudflare account credentials.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An account email paired with its Global API Key.
///
/// Values are validated on construction and on deserialization, so holding a
/// `Credentials` means both halves are present.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCredentials")]
pub struct Credentials {
    email: String,
    #[serde(rename = "global_api_key")]
    api_key: String,
}

#[derive(Deserialize)]
struct RawCredentials {
    email: String,
    global_api_key: String,
}

impl TryFrom<RawCredentials> for Credentials {
    type Error = anyhow::Error;

    fn try_from(raw: RawCredentials) -> Result<Self> {
        Self::new(raw.email, raw.global_api_key)
    }
}

impl Credentials {
    /// Validate and pair an email with an API key.
    pub fn new(
        email: impl AsRef<str>,
        api_key: impl AsRef<str>,
    ) -> Result<Self> {
        let email = email.as_ref().trim();
        let api_key = api_key.as_ref().trim();
        anyhow::ensure!(
            !email.is_empty() && email.contains('@'),
            "please enter a valid email"
        );
        anyhow::ensure!(!api_key.is_empty(), "API key is required");
        Ok(Self {
            email: email.to_owned(),
            api_key: api_key.to_owned(),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The API key with its middle hidden, safe to print.
    pub fn masked_key(&self) -> String {
        mask_key(&self.api_key)
    }
}

/// Hide all but the first 8 and last 4 characters of a key.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len().max(3));
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("api_key", &self.masked_key())
            .finish()
    }
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_input() {
        let creds = Credentials::new("  me@example.com ", " abc\n").unwrap();
        assert_eq!(creds.email(), "me@example.com");
        assert_eq!(creds.api_key(), "abc");
    }

    #[test]
    fn test_new_rejects_invalid_email() {
        let err = Credentials::new("example.com", "abc").unwrap_err();
        assert!(err.to_string().contains("valid email"));
        assert!(Credentials::new("", "abc").is_err());
    }

    #[test]
    fn test_new_rejects_empty_key() {
        let err = Credentials::new("me@example.com", "   ").unwrap_err();
        assert!(err.to_string().contains("API key is required"));
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("0123456789abcdefXYZW"), "01234567...XYZW");
        assert_eq!(mask_key("short"), "*****");
        assert_eq!(mask_key(""), "***");
    }

    #[test]
    fn test_debug_hides_key() {
        let creds =
            Credentials::new("me@example.com", "0123456789abcdefXYZW").unwrap();
        let out = format!("{:?}", creds);
        assert!(!out.contains("0123456789abcdefXYZW"));
    }

    #[test]
    fn test_json_shape() {
        let creds = Credentials::new("me@example.com", "abc").unwrap();
        let json = serde_json::to_value(&creds).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "email": "me@example.com",
                "global_api_key": "abc",
            })
        );

        let bad = serde_json::from_str::<Credentials>(
            r#"{"email": "nope", "global_api_key": "abc"}"#,
        );
        assert!(bad.is_err());
    }
}
