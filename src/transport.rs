//! JSON HTTP transport for the HostUp API.
//!
//! Every endpoint answers with the same envelope:
//! `{ success, data|message|error, details?[{field,message}] }`.
//! The transport decodes and validates the envelope so callers only ever
//! see the `data` payload or a structured error.

use async_trait::async_trait;
use reqwest::Client;
pub use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};

/// Authenticated request/response boundary the rest of the crate
/// depends on. Implementations return the envelope's `data` on success.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(
        &self,
        method: Method,
        path: &str,
        payload: Option<Value>,
        query: &[(&str, String)],
    ) -> Result<Value>;
}

/// Production transport over `reqwest` with bearer-token auth.
pub struct HttpTransport {
    client: Client,
    base: String,
    api_key: String,
    debug: bool,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base: config.base_url(),
            api_key: config.api_key.clone(),
            debug: config.debug,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(
        &self,
        method: Method,
        path: &str,
        payload: Option<Value>,
        query: &[(&str, String)],
    ) -> Result<Value> {
        let url = format!("{}{}", self.base, path);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key);

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = &payload {
            request = request.json(body);
        }
        if self.debug {
            debug!(%method, path, payload = ?payload, "api request");
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        let status = response.status().as_u16();

        let body: Value = response
            .json()
            .await
            .map_err(|_| Error::Decode { status })?;

        if self.debug {
            debug!(%method, path, status, body = %body, "api response");
        }

        decode_envelope(status, body)
    }
}

/// Turn a decoded envelope into the `data` payload or an API error with
/// validation details folded into the message.
pub(crate) fn decode_envelope(status: u16, body: Value) -> Result<Value> {
    let succeeded = (200..300).contains(&status)
        && body
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false);

    if succeeded {
        let data = body.get("data").filter(|v| !v.is_null()).cloned();
        return Ok(data.unwrap_or(body));
    }

    let mut message = body
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| body.get("error").and_then(Value::as_str))
        .unwrap_or("Unknown error")
        .to_string();

    let details = format_validation_details(&body);
    if !details.is_empty() {
        message.push_str(&format!(" ({details})"));
    }

    Err(Error::Api {
        message,
        status: Some(status),
    })
}

/// Concatenate `details[] {field, message}` as `"field: message"` joined
/// by `"; "`.
fn format_validation_details(body: &Value) -> String {
    let Some(details) = body.get("details").and_then(Value::as_array) else {
        return String::new();
    };

    let mut messages = Vec::new();
    for detail in details {
        let field = detail.get("field").and_then(Value::as_str);
        let message = detail.get("message").and_then(Value::as_str);
        match (field, message) {
            (Some(field), Some(message)) => messages.push(format!("{field}: {message}")),
            (None, Some(message)) => messages.push(message.to_string()),
            _ => {}
        }
    }
    messages.join("; ")
}
