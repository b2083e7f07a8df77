//! Adapter configuration and pre-flight credential validation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_API_BASE: &str = "https://cloud.hostup.se";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for one reseller account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root of the HostUp order API.
    pub api_base: String,
    /// Bearer token with read/write domain scopes.
    pub api_key: String,
    /// Per-request timeout in seconds; non-positive falls back to 30.
    pub timeout_secs: u64,
    /// Log API request/response bodies at debug level.
    pub debug: bool,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: api_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            debug: false,
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> String {
        let base = if self.api_base.trim().is_empty() {
            DEFAULT_API_BASE
        } else {
            self.api_base.trim()
        };
        base.trim_end_matches('/').to_string()
    }

    pub fn timeout(&self) -> Duration {
        let secs = if self.timeout_secs > 0 {
            self.timeout_secs
        } else {
            DEFAULT_TIMEOUT_SECS
        };
        Duration::from_secs(secs)
    }

    /// Validate the configuration by probing the product listing
    /// endpoint. 401/403 means the key is bad; any other non-2xx is an
    /// API-side problem.
    pub async fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Validation("API Key is required".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        let response = client
            .get(format!("{}/api/domain-products", self.base_url()))
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Connection failed: {e}")))?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(Error::Api {
                message: "Invalid API Key - authentication failed".to_string(),
                status: Some(status.as_u16()),
            });
        }
        if !status.is_success() {
            return Err(Error::Api {
                message: format!("API error (HTTP {})", status.as_u16()),
                status: Some(status.as_u16()),
            });
        }

        Ok(())
    }
}
