//! Shared types for the reseller adapter.
//!
//! Upstream responses are dynamically shaped (optional fields, mixed
//! string/number ids and priorities), so records are normalised into
//! these types at the boundary instead of leaking `serde_json::Value`
//! into callers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// DNS record types the host UI may manage. Everything else, SOA and
/// NS included, is system-protected and never created, updated or
/// deleted by the reconciler.
pub const MANAGEABLE_DNS_TYPES: [&str; 5] = ["A", "AAAA", "MX", "CNAME", "TXT"];

pub fn is_manageable_dns_type(record_type: &str) -> bool {
    let upper = record_type.trim().to_uppercase();
    MANAGEABLE_DNS_TYPES.contains(&upper.as_str())
}

/// Opaque upstream id, which the API serialises as either a string or
/// a number depending on the endpoint.
pub(crate) fn opaque_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A DNS record in the host's native shape: hostname relative to the
/// zone (empty string for the apex), string priority ("N/A" and `None`
/// both mean no priority) and the upstream record id when the record
/// was previously synced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    pub hostname: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub address: String,
    pub priority: Option<String>,
    pub ttl: Option<u32>,
    #[serde(rename = "recid")]
    pub record_id: Option<String>,
}

impl HostRecord {
    pub fn new(hostname: &str, record_type: &str, address: &str) -> Self {
        Self {
            hostname: hostname.to_string(),
            record_type: record_type.to_string(),
            address: address.to_string(),
            priority: None,
            ttl: None,
            record_id: None,
        }
    }
}

/// Domain lifecycle status in the host's vocabulary. Derived from the
/// raw upstream status on every sync, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DomainStatus {
    Active,
    Pending,
    Expired,
    Cancelled,
    TransferredAway,
    Suspended,
    Unknown,
}

/// Canonical record supplied to the host domain model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainInformation {
    pub domain: String,
    /// Up to 5 entries.
    pub nameservers: Vec<String>,
    /// Raw upstream registration status, uppercased.
    pub status: String,
    pub transfer_lock: bool,
    pub id_protection: bool,
    /// Canonical `YYYY-MM-DD` expiry date.
    pub expiry_date: String,
}

/// Registrant contact in the host's field shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrantContact {
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub email: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub country: String,
    pub phone_number: String,
    /// National organisation/person number, when the host collected one.
    pub identification_number: Option<String>,
}

impl RegistrantContact {
    pub fn is_organisation(&self) -> bool {
        !self.company_name.trim().is_empty()
    }
}

/// Input for a register or transfer order.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub sld: String,
    pub tld: String,
    pub years: u32,
    /// Up to 5 custom nameservers; empty means upstream defaults.
    pub nameservers: Vec<String>,
    pub contact: RegistrantContact,
    /// EPP/auth code, required for transfers.
    pub epp_code: Option<String>,
}

impl OrderRequest {
    pub fn new(sld: &str, tld: &str, contact: RegistrantContact) -> Self {
        Self {
            sld: sld.to_string(),
            tld: tld.trim_start_matches('.').to_string(),
            years: 1,
            nameservers: Vec::new(),
            contact,
            epp_code: None,
        }
    }

    pub fn domain(&self) -> String {
        format!("{}.{}", self.sld, self.tld.trim_start_matches('.'))
    }
}

/// Outcome of a register/transfer order after post-order verification.
#[derive(Debug, Clone)]
pub struct OrderOutcome {
    /// The order went through but the domain is still provisioning.
    pub pending: bool,
    pub order_id: Option<String>,
    /// Raw upstream status at verification time, uppercased.
    pub status: String,
    pub raw: Value,
}

/// Result of a lifecycle sync.
#[derive(Debug, Clone)]
pub struct SyncResult {
    pub status: DomainStatus,
    pub expiry_date: String,
    pub next_due_date: String,
}

/// Result of polling an inbound transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferSyncResult {
    Completed { expiry_date: String },
    /// Still in progress, no status change for the host.
    Pending,
    Failed { reason: String },
}

/// Availability verdict for one searched domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    NotRegistered,
    Registered,
    Reserved,
    TldNotSupported,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PremiumPricing {
    pub register: f64,
    pub renew: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub sld: String,
    pub tld: String,
    pub availability: Availability,
    pub premium: Option<PremiumPricing>,
}
