//! FQDN → upstream domain-id resolution.
//!
//! The API only exposes numeric domain ids, so every operation first
//! lists the account's domains and matches the name. No cache: ids are
//! resolved fresh per operation.

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::transport::{Method, Transport};
use crate::types::opaque_id;

/// Resolve the upstream id for `fqdn`, matching case-insensitively
/// against the account's domain listing. A listing failure is surfaced
/// as-is; a missing domain is `NotFound`.
pub async fn find_domain_id(transport: &dyn Transport, fqdn: &str) -> Result<String> {
    let data = transport
        .call(
            Method::GET,
            "/api/client-domains",
            None,
            &[("page", "0".to_string()), ("limit", "1000".to_string())],
        )
        .await?;

    if let Some(domains) = data.get("domains").and_then(Value::as_array) {
        for domain in domains {
            let matches = domain
                .get("name")
                .and_then(Value::as_str)
                .is_some_and(|name| name.eq_ignore_ascii_case(fqdn));
            if !matches {
                continue;
            }
            let id = domain
                .get("id")
                .or_else(|| domain.get("domainid"))
                .and_then(opaque_id);
            if let Some(id) = id {
                debug!(fqdn, id = %id, "resolved domain id");
                return Ok(id);
            }
        }
    }

    Err(Error::NotFound(format!(
        "Domain {fqdn} not found for this API key"
    )))
}
