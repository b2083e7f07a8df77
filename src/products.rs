//! TLD → product-id lookup with an injectable cache.
//!
//! The mapping changes rarely relative to process lifetime, so the
//! default cache never expires. Callers that want fresher data own the
//! cache and give it a TTL.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::{Error, Result};
use crate::transport::{Method, Transport};
use crate::types::opaque_id;

struct CacheEntry {
    loaded_at: Instant,
    by_tld: HashMap<String, String>,
}

/// Caching resolver for the upstream product catalogue.
pub struct ProductCache {
    ttl: Option<Duration>,
    inner: Mutex<Option<CacheEntry>>,
}

impl Default for ProductCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductCache {
    /// Cache for the lifetime of the value, never refreshed.
    pub fn new() -> Self {
        Self::with_ttl(None)
    }

    /// Cache that refetches the catalogue once `ttl` has elapsed.
    pub fn with_ttl(ttl: Option<Duration>) -> Self {
        Self {
            ttl,
            inner: Mutex::new(None),
        }
    }

    /// Look up the product id for a TLD (leading dot optional),
    /// populating or refreshing the cache as needed.
    pub async fn product_id(&self, transport: &dyn Transport, tld: &str) -> Result<String> {
        let mut guard = self.inner.lock().await;

        let stale = match (guard.as_ref(), self.ttl) {
            (None, _) => true,
            (Some(entry), Some(ttl)) => entry.loaded_at.elapsed() >= ttl,
            (Some(_), None) => false,
        };

        if stale {
            let data = transport
                .call(Method::GET, "/api/domain-products", None, &[])
                .await?;
            *guard = Some(CacheEntry {
                loaded_at: Instant::now(),
                by_tld: index_products(&data),
            });
        }

        let key = format!(".{}", tld.trim().trim_start_matches('.').to_lowercase());
        guard
            .as_ref()
            .and_then(|entry| entry.by_tld.get(&key))
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("No product id found for TLD {key}")))
    }
}

fn index_products(data: &Value) -> HashMap<String, String> {
    let mut by_tld = HashMap::new();
    if let Some(products) = data.get("tlds").and_then(Value::as_array) {
        for product in products {
            let tld = product
                .get("tld")
                .and_then(Value::as_str)
                .map(str::to_lowercase);
            let id = product.get("productId").and_then(opaque_id);
            if let (Some(tld), Some(id)) = (tld, id) {
                if !tld.is_empty() {
                    by_tld.insert(tld, id);
                }
            }
        }
    }
    by_tld
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn indexing_lowercases_and_keeps_dot() {
        let data = json!({"tlds": [
            {"tld": ".SE", "productId": 7},
            {"tld": ".nu", "productId": "9"},
            {"tld": "", "productId": 3},
            {"tld": ".com"},
        ]});
        let index = index_products(&data);
        assert_eq!(index.get(".se"), Some(&"7".to_string()));
        assert_eq!(index.get(".nu"), Some(&"9".to_string()));
        assert_eq!(index.len(), 2);
    }
}
