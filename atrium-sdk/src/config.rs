#![forbid(unsafe_code)]

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// Backend base URL, e.g. `https://admin.example.com/api`.
    #[serde(default = "ClientConfig::default_base_url")]
    pub base_url: String,
    /// Uniform per-request timeout. No retries happen at this layer.
    #[serde(default = "ClientConfig::default_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Tenant client id sent as the `clientid` header on every request.
    #[serde(default)]
    pub client_id: String,
    /// Global switch for request encryption; per-call opt-in still required.
    #[serde(default)]
    pub encrypt_requests: bool,
    /// Base64 X25519 public key request bodies are sealed to.
    /// Required when `encrypt_requests` is set.
    #[serde(default)]
    pub encrypt_public_key: Option<String>,
    /// `Content-Language` fallback when no locale provider is installed.
    #[serde(default = "ClientConfig::default_language")]
    pub default_language: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            request_timeout_ms: Self::default_timeout_ms(),
            client_id: String::new(),
            encrypt_requests: false,
            encrypt_public_key: None,
            default_language: Self::default_language(),
        }
    }
}

impl ClientConfig {
    pub fn default_base_url() -> String {
        "http://127.0.0.1:8080".to_string()
    }
    pub const fn default_timeout_ms() -> u64 {
        10_000
    }
    pub fn default_language() -> String {
        "en-US".to_string()
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let cfg: Self =
            toml::from_str(&data).map_err(|e| Error::config(format!("toml parse error: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::default();
        if let Ok(v) = std::env::var("ATRIUM_BASE_URL") {
            cfg.base_url = v;
        }
        if let Ok(v) = std::env::var("ATRIUM_TIMEOUT_MS") {
            cfg.request_timeout_ms = v
                .parse()
                .map_err(|_| Error::config(format!("invalid ATRIUM_TIMEOUT_MS: {v}")))?;
        }
        if let Ok(v) = std::env::var("ATRIUM_CLIENT_ID") {
            cfg.client_id = v;
        }
        if let Ok(v) = std::env::var("ATRIUM_ENCRYPT") {
            cfg.encrypt_requests = v == "1" || v.eq_ignore_ascii_case("true");
        }
        if let Ok(v) = std::env::var("ATRIUM_ENCRYPT_PUBLIC_KEY") {
            cfg.encrypt_public_key = Some(v);
        }
        if let Ok(v) = std::env::var("ATRIUM_LANGUAGE") {
            cfg.default_language = v;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::config("base_url must not be empty"));
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("invalid base_url: {e}")))?;
        if self.request_timeout_ms == 0 {
            return Err(Error::config("request_timeout_ms must be positive"));
        }
        if self.encrypt_requests {
            let Some(key) = self.encrypt_public_key.as_deref() else {
                return Err(Error::config(
                    "encrypt_requests set but encrypt_public_key missing",
                ));
            };
            atrium_crypto::RecipientPublic::from_base64(key)
                .map_err(|e| Error::config(format!("invalid encrypt_public_key: {e}")))?;
        }
        Ok(())
    }
}
